// ==========================================
// 艺术品顾问系统 - 驾驶舱 API
// ==========================================
// 职责: 概览统计 + 客户收藏汇总
// 口径: 缺失金额按 0 计
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::artwork::ArtworkRecord;
use crate::domain::client::ClientRecord;
use crate::repository::{ArtworkRepository, ClientRepository};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// 概览统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_artworks: usize,
    /// 出现过的不同客户数（忽略未分配）
    pub collections: usize,
    pub active_clients: usize,
}

/// 单个客户的收藏汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientCollectionSummary {
    pub client_id: String,
    pub client_name: String,
    pub artwork_count: usize,
    pub total_appraisal_value: f64,
    pub total_insurance_value: f64,
}

pub fn compute_stats(artworks: &[ArtworkRecord], clients: &[ClientRecord]) -> DashboardStats {
    let collections: HashSet<&str> = artworks
        .iter()
        .filter_map(|a| a.client_id.as_deref())
        .filter(|id| !id.is_empty())
        .collect();

    DashboardStats {
        total_artworks: artworks.len(),
        collections: collections.len(),
        active_clients: clients.len(),
    }
}

/// 每个客户一行，按艺术品数量降序（同数量保持客户原顺序）
pub fn summarize_collections(
    artworks: &[ArtworkRecord],
    clients: &[ClientRecord],
) -> Vec<ClientCollectionSummary> {
    let mut summaries: Vec<ClientCollectionSummary> = clients
        .iter()
        .map(|client| {
            let owned = artworks
                .iter()
                .filter(|a| a.client_id.as_deref() == Some(client.id.as_str()));
            let mut summary = ClientCollectionSummary {
                client_id: client.id.clone(),
                client_name: client.name.clone(),
                artwork_count: 0,
                total_appraisal_value: 0.0,
                total_insurance_value: 0.0,
            };
            for artwork in owned {
                summary.artwork_count += 1;
                summary.total_appraisal_value += artwork.price_or_zero();
                summary.total_insurance_value += artwork.insurance_value_or_zero();
            }
            summary
        })
        .collect();

    summaries.sort_by(|a, b| b.artwork_count.cmp(&a.artwork_count));
    summaries
}

/// 驾驶舱API
pub struct DashboardApi {
    clients: Arc<dyn ClientRepository>,
    artworks: Arc<dyn ArtworkRepository>,
}

impl DashboardApi {
    pub fn new(clients: Arc<dyn ClientRepository>, artworks: Arc<dyn ArtworkRepository>) -> Self {
        Self { clients, artworks }
    }

    pub async fn get_stats(&self) -> ApiResult<DashboardStats> {
        let artworks = self.artworks.list_all().await?;
        let clients = self.clients.list_all().await?;
        Ok(compute_stats(&artworks, &clients))
    }

    pub async fn list_collections(&self) -> ApiResult<Vec<ClientCollectionSummary>> {
        let artworks = self.artworks.list_all().await?;
        let clients = self.clients.list_all().await?;
        Ok(summarize_collections(&artworks, &clients))
    }
}
