// ==========================================
// 艺术品顾问系统 - 仓储落库回调
// ==========================================
// 职责: 逐行解析客户引用 + 写入艺术品
// 规则:
// - 空引用 → 不关联客户
// - 36 位连字符 UUID → 视为已解析的客户 ID
// - 其他 → 视为邮箱，按邮箱 upsert（名称取 @ 之前部分）
// ==========================================

use crate::domain::artwork::BulkArtwork;
use crate::domain::client::ClientType;
use crate::importer::artwork_importer_trait::ArtworkSink;
use crate::repository::{ArtworkRepository, ClientRepository, RepositoryResult};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// 是否为连字符格式的 UUID（8-4-4-4-12）
pub fn is_uuid_reference(reference: &str) -> bool {
    reference.len() == 36 && Uuid::parse_str(reference).is_ok()
}

/// 解析客户引用为客户 ID
///
/// # 返回
/// - Ok(None): 空引用（未分配客户）
/// - Ok(Some(id)): 客户 ID
pub async fn resolve_client_reference(
    reference: &str,
    clients: &dyn ClientRepository,
    default_type: &ClientType,
) -> RepositoryResult<Option<String>> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Ok(None);
    }
    if is_uuid_reference(reference) {
        return Ok(Some(reference.to_string()));
    }
    if !reference.contains('@') {
        // 沿用既有行为：非邮箱字符串也按邮箱建客户
        warn!(reference = %reference, "客户引用既非 UUID 也非邮箱");
    }
    clients
        .upsert_by_email(reference, default_type)
        .await
        .map(Some)
}

// ==========================================
// RepositoryArtworkSink
// ==========================================
pub struct RepositoryArtworkSink {
    clients: Arc<dyn ClientRepository>,
    artworks: Arc<dyn ArtworkRepository>,
    default_client_type: ClientType,
}

impl RepositoryArtworkSink {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        artworks: Arc<dyn ArtworkRepository>,
        default_client_type: ClientType,
    ) -> Self {
        Self {
            clients,
            artworks,
            default_client_type,
        }
    }
}

#[async_trait]
impl ArtworkSink for RepositoryArtworkSink {
    async fn persist(&self, artwork: BulkArtwork) -> anyhow::Result<()> {
        let client_id = resolve_client_reference(
            &artwork.client_id,
            self.clients.as_ref(),
            &self.default_client_type,
        )
        .await?;

        let row_number = artwork.row_number;
        let saved = self.artworks.insert(artwork.into_record(client_id)).await?;
        debug!(row = row_number, artwork_id = ?saved.id, "艺术品已落库");
        Ok(())
    }
}
