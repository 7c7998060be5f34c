// ==========================================
// 艺术品顾问系统 - 艺术品领域模型
// ==========================================
// 职责: 艺术品记录、批量导入中间结构、内联图片
// ==========================================

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 导入时 condition 缺省值
pub const DEFAULT_CONDITION: &str = "Excellent";

// ==========================================
// ArtworkRecord - 艺术品记录（已落库）
// ==========================================
// 用途: 导出层输入；仓储层读写
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtworkRecord {
    // ===== 主键 =====
    pub id: Option<String>, // 后端分配，落库前为空

    // ===== 作者与作品 =====
    pub artist: String,
    pub title: String,
    pub year: Option<String>,
    pub medium: Option<String>,
    pub dimensions: Option<String>,

    // ===== 估值 =====
    pub cost: Option<f64>,
    pub price: Option<f64>, // 评估价
    pub insurance_value: Option<f64>,

    // ===== 品相 =====
    pub condition: String,

    // ===== 叙述字段 =====
    pub location: Option<String>,
    pub provenance: Option<String>,
    pub exhibition: Option<String>,
    pub literature: Option<String>,
    pub notes: Option<String>,
    pub owner_info: Option<String>,

    // ===== 图片 =====
    pub image_data: Option<InlineImage>,

    // ===== 关联（弱引用，不拥有客户）=====
    pub client_id: Option<String>,

    // ===== 审计字段 =====
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ArtworkRecord {
    /// 评估价，缺失按 0 计
    pub fn price_or_zero(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    /// 保险价，缺失按 0 计
    pub fn insurance_value_or_zero(&self) -> f64 {
        self.insurance_value.unwrap_or(0.0)
    }

    /// 标题或艺术家包含关键字（不区分大小写；空关键字匹配全部）
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.title.to_lowercase().contains(&query)
            || self.artist.to_lowercase().contains(&query)
    }
}

// ==========================================
// BulkArtwork - 批量导入行（瞬时结构）
// ==========================================
// 生命周期: 仅在导入流程内
// 注意: client_id 此时可能仍是原始邮箱字符串，由 ArtworkSink 解析
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkArtwork {
    pub client_id: String,
    pub artist: String,
    pub title: String,
    pub year: Option<String>,
    pub medium: Option<String>,
    pub dimensions: Option<String>,
    pub condition: String,
    pub location: Option<String>,
    pub cost: Option<f64>,
    pub price: Option<f64>,
    pub insurance_value: Option<f64>,
    pub provenance: Option<String>,
    pub exhibition: Option<String>,
    pub literature: Option<String>,
    pub notes: Option<String>,
    pub owner_info: Option<String>,
    pub image_data: Option<InlineImage>,

    // 元信息
    pub row_number: usize, // 表格行号（含表头偏移）
}

impl BulkArtwork {
    /// 以已解析的客户 ID 生成待落库记录
    pub fn into_record(self, client_id: Option<String>) -> ArtworkRecord {
        ArtworkRecord {
            id: None,
            artist: self.artist,
            title: self.title,
            year: self.year,
            medium: self.medium,
            dimensions: self.dimensions,
            cost: self.cost,
            price: self.price,
            insurance_value: self.insurance_value,
            condition: self.condition,
            location: self.location,
            provenance: self.provenance,
            exhibition: self.exhibition,
            literature: self.literature,
            notes: self.notes,
            owner_info: self.owner_info,
            image_data: self.image_data,
            client_id,
            created_at: None,
            updated_at: None,
        }
    }
}

// ==========================================
// InlineImage - 内联图片（data URL）
// ==========================================
// 红线: 落库的图片永远是自包含的编码串，不是文件路径
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InlineImage(String);

impl InlineImage {
    /// 由原始字节生成 `data:{mime};base64,...`
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
    }

    /// 包装已有的 data URL（或裸 base64 串）
    pub fn from_data_url(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// MIME 类型（裸 base64 时为 None）
    pub fn mime_type(&self) -> Option<&str> {
        let rest = self.0.strip_prefix("data:")?;
        let end = rest.find([';', ','])?;
        Some(&rest[..end])
    }

    /// 解码为原始字节
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        let payload = match self.0.strip_prefix("data:") {
            Some(rest) => rest.split_once(',').map(|(_, data)| data).unwrap_or(""),
            None => self.0.as_str(),
        };
        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        STANDARD.decode(compact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_search() {
        let art = ArtworkRecord {
            artist: "Agnes Martin".to_string(),
            title: "Untitled #5".to_string(),
            ..Default::default()
        };
        assert!(art.matches_search(""));
        assert!(art.matches_search("agnes"));
        assert!(art.matches_search("UNTITLED"));
        assert!(!art.matches_search("rothko"));
    }

    #[test]
    fn test_inline_image_roundtrip_bytes() {
        let image = InlineImage::from_bytes("image/png", &[1, 2, 3, 250]);
        assert!(image.as_str().starts_with("data:image/png;base64,"));
        assert_eq!(image.mime_type(), Some("image/png"));
        assert_eq!(image.decode().unwrap(), vec![1, 2, 3, 250]);
    }

    #[test]
    fn test_inline_image_bare_base64() {
        let image = InlineImage::from_data_url("AQID");
        assert_eq!(image.mime_type(), None);
        assert_eq!(image.decode().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_inline_image_invalid_payload() {
        let image = InlineImage::from_data_url("data:image/jpeg;base64,@@@");
        assert!(image.decode().is_err());
    }

    #[test]
    fn test_money_defaults_to_zero() {
        let record = ArtworkRecord {
            price: Some(1200.0),
            ..Default::default()
        };
        assert_eq!(record.price_or_zero(), 1200.0);
        assert_eq!(record.insurance_value_or_zero(), 0.0);
    }

    #[test]
    fn test_into_record_keeps_fields() {
        let row = BulkArtwork {
            client_id: "a@b.com".to_string(),
            artist: "Jane Doe".to_string(),
            title: "Untitled".to_string(),
            condition: DEFAULT_CONDITION.to_string(),
            notes: Some("n".to_string()),
            row_number: 2,
            ..Default::default()
        };
        let record = row.into_record(Some("client-1".to_string()));
        assert_eq!(record.id, None);
        assert_eq!(record.client_id.as_deref(), Some("client-1"));
        assert_eq!(record.condition, "Excellent");
        assert_eq!(record.notes.as_deref(), Some("n"));
    }
}
