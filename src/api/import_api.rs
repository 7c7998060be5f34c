// ==========================================
// 艺术品批量导入API
// ==========================================
// 职责: 组装导入器（配置缺省值 + 仓储回调），执行导入并生成错误报告
// ==========================================

use crate::api::error::ApiResult;
use crate::config::ConfigManager;
use crate::domain::import::BulkImportOutcome;
use crate::export::error_report::build_error_report;
use crate::export::format::ExportFile;
use crate::importer::{
    BulkImporter, FieldMapperImpl, RepositoryArtworkSink, UniversalFileParser,
};
use crate::repository::{ArtworkRepository, ClientRepository};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// 导入API响应
#[derive(Debug, Clone)]
pub struct ImportApiResponse {
    /// 成功数 + 行级错误
    pub outcome: BulkImportOutcome,
    /// 行级错误报告（bulk_errors.csv，无错误时为空）
    pub error_report: Option<ExportFile>,
    /// 导入耗时（毫秒）
    pub elapsed_ms: i64,
}

/// 导入API
pub struct ImportApi {
    clients: Arc<dyn ClientRepository>,
    artworks: Arc<dyn ArtworkRepository>,
    config: Arc<ConfigManager>,
}

impl ImportApi {
    /// 创建新的ImportApi实例
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

    /// 导入艺术品
    ///
    /// # 参数
    /// - sheet: CSV/XLSX 文件（必填，缺失时返回 "Upload a CSV/XLSX file"）
    /// - images: 图片压缩包（可选）
    ///
    /// # 返回
    /// - Ok(ImportApiResponse): 导入结果（可能含行级错误）
    /// - Err(ApiError): 前置条件失败
    pub async fn import_artworks(
        &self,
        sheet: Option<&Path>,
        images: Option<&Path>,
    ) -> ApiResult<ImportApiResponse> {
        let started = Instant::now();
        let defaults = self.config.load_import_defaults()?;

        let importer = BulkImporter::new(
            Box::new(UniversalFileParser),
            Box::new(FieldMapperImpl::new(defaults.condition)),
        );
        let sink = RepositoryArtworkSink::new(
            self.clients.clone(),
            self.artworks.clone(),
            defaults.client_type,
        );

        let outcome = importer.import(sheet, images, &sink).await?;
        let error_report = build_error_report(&outcome.errors)?;
        let elapsed_ms = started.elapsed().as_millis() as i64;

        info!(
            created = outcome.created,
            failed = outcome.errors.len(),
            elapsed_ms,
            "艺术品导入完成"
        );

        Ok(ImportApiResponse {
            outcome,
            error_report,
            elapsed_ms,
        })
    }
}
