// ==========================================
// 艺术品导出API
// ==========================================
// 职责: 从仓储加载记录（按客户/关键字过滤）→ 调用导出层生成文件
// 约束: 空结果不产生文件（返回 None）
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::artwork::ArtworkRecord;
use crate::domain::client::ClientRecord;
use crate::export::archive::FALLBACK_ARCHIVE_LABEL;
use crate::export::{
    export_inventory_csv, export_inventory_xlsx, fact_sheet_file, render_fact_sheets_archive,
    ExportFile,
};
use crate::repository::{ArtworkRepository, ClientRepository};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};

/// CSV 导出的文件名前缀
pub const DEFAULT_CSV_NAME: &str = "inventory";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Zip,
}

/// 导出范围
#[derive(Debug, Clone, Default)]
pub struct ExportQuery {
    /// 仅导出该客户的艺术品
    pub client_id: Option<String>,
    /// 标题/艺术家关键字
    pub search: Option<String>,
}

/// 导出API
pub struct ExportApi {
    clients: Arc<dyn ClientRepository>,
    artworks: Arc<dyn ArtworkRepository>,
    config: Arc<ConfigManager>,
}

impl ExportApi {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        artworks: Arc<dyn ArtworkRepository>,
        config: Arc<ConfigManager>,
    ) -> Self {
        Self {
            clients,
            artworks,
            config,
        }
    }

    async fn find_client(&self, client_id: &str) -> ApiResult<ClientRecord> {
        self.clients
            .find_by_id(client_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("client (id={})", client_id)))
    }

    /// 按查询条件加载艺术品
    pub async fn load_artworks(&self, query: &ExportQuery) -> ApiResult<Vec<ArtworkRecord>> {
        let records = match query.client_id.as_deref() {
            Some(client_id) => {
                self.find_client(client_id).await?;
                self.artworks.list_by_client(client_id).await?
            }
            None => self.artworks.list_all().await?,
        };

        let search = query.search.as_deref().unwrap_or_default();
        let filtered: Vec<ArtworkRecord> = records
            .into_iter()
            .filter(|a| a.matches_search(search))
            .collect();
        debug!(count = filtered.len(), "导出记录加载完成");
        Ok(filtered)
    }

    /// 导出文件
    ///
    /// # 返回
    /// - Ok(None): 没有匹配的记录
    pub async fn export(
        &self,
        format: ExportFormat,
        query: &ExportQuery,
        today: NaiveDate,
    ) -> ApiResult<Option<ExportFile>> {
        let records = self.load_artworks(query).await?;

        let file = match format {
            ExportFormat::Xlsx => export_inventory_xlsx(&records, today)?,
            ExportFormat::Csv => export_inventory_csv(&records, DEFAULT_CSV_NAME, today)?,
            ExportFormat::Zip => {
                let label = match query.client_id.as_deref() {
                    Some(client_id) => self.find_client(client_id).await?.archive_label(),
                    None => FALLBACK_ARCHIVE_LABEL.to_string(),
                };
                let layout = self.config.load_fact_sheet_layout()?;
                render_fact_sheets_archive(&records, &label, today, &layout)?
            }
        };

        match &file {
            Some(f) => info!(?format, file = %f.file_name, size = f.bytes.len(), "导出完成"),
            None => info!(?format, "无记录，跳过导出"),
        }
        Ok(file)
    }

    /// 单件艺术品事实表
    pub async fn fact_sheet(&self, artwork_id: &str) -> ApiResult<ExportFile> {
        let artwork = self
            .artworks
            .find_by_id(artwork_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("artwork (id={})", artwork_id)))?;
        let layout = self.config.load_fact_sheet_layout()?;
        Ok(fact_sheet_file(&artwork, &layout)?)
    }
}
