// ==========================================
// 艺术品顾问系统 - 字段映射器实现
// ==========================================
// 职责: 列名规范化 + 源字段 → BulkArtwork 映射 + 尺寸合成
// 规范化: 去首尾空白、小写、连续空白 → 下划线（"Client Email" ≡ client_email）
// ==========================================

use crate::domain::artwork::{BulkArtwork, DEFAULT_CONDITION};
use crate::importer::artwork_importer_trait::FieldMapper as FieldMapperTrait;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashMap;

/// 必填列（规范化后）
pub const REQUIRED_COLUMNS: [&str; 3] = ["client_email", "artist", "title"];

/// 规范化列名
pub fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// 规范化整行的键（同名列后者覆盖前者）
pub fn normalize_row(cells: &HashMap<String, String>) -> HashMap<String, String> {
    cells
        .iter()
        .map(|(k, v)| (normalize_header(k), v.clone()))
        .collect()
}

/// 由 height/width/depth（及 framed_*）合成尺寸字符串
///
/// # 示例
/// - height=20, width=16, units=in → "20 × 16 in"
/// - 再加 framed_height=24, framed_width=20 → "20 × 16 in; Framed: 24 × 20 in"
pub fn compose_dimensions(row: &HashMap<String, String>) -> String {
    let value = |key: &str| row.get(key).map(|v| v.trim()).unwrap_or("");
    let units = [value("units"), value("unit")]
        .into_iter()
        .find(|u| !u.is_empty())
        .unwrap_or("");

    let join = |keys: [&str; 3]| {
        keys.into_iter()
            .map(|k| value(k))
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(" × ")
    };

    let parts = join(["height", "width", "depth"]);
    let framed = join(["framed_height", "framed_width", "framed_depth"]);

    let mut segments = Vec::new();
    if !parts.is_empty() {
        segments.push(format!("{} {}", parts, units).trim().to_string());
    }
    if !framed.is_empty() {
        segments.push(format!("Framed: {} {}", framed, units).trim().to_string());
    }
    segments.join("; ")
}

// ==========================================
// FieldMapper - 字段映射器
// ==========================================
pub struct FieldMapper {
    cleaner: DataCleaner,
    default_condition: String,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new(DEFAULT_CONDITION)
    }
}

impl FieldMapper {
    pub fn new(default_condition: impl Into<String>) -> Self {
        Self {
            cleaner: DataCleaner,
            default_condition: default_condition.into(),
        }
    }

    /// 提取字符串字段，按别名顺序取第一个非空值
    fn get_string(&self, row: &HashMap<String, String>, keys: &[&str]) -> Option<String> {
        keys.iter()
            .find_map(|k| self.cleaner.normalize_null(row.get(*k).map(String::as_str)))
    }

    /// 解析金额字段，按别名顺序取第一个非空列
    fn get_money(&self, row: &HashMap<String, String>, keys: &[&str]) -> ImportResult<Option<f64>> {
        for key in keys {
            let value = row.get(*key).map(String::as_str);
            if let Some(amount) = self.cleaner.parse_money(key, value)? {
                return Ok(Some(amount));
            }
        }
        Ok(None)
    }

    fn require(&self, row: &HashMap<String, String>, key: &str) -> ImportResult<String> {
        self.get_string(row, &[key])
            .ok_or_else(|| ImportError::MissingValue(key.to_string()))
    }
}

impl FieldMapperTrait for FieldMapper {
    fn map_row(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<BulkArtwork> {
        let dimensions = self
            .get_string(row, &["dimensions"])
            .or_else(|| Some(compose_dimensions(row)).filter(|d| !d.is_empty()));

        Ok(BulkArtwork {
            // 原始客户引用，稍后由 ArtworkSink 解析
            client_id: self
                .get_string(row, &["client", "client_id", "client_email"])
                .unwrap_or_default(),

            artist: self.require(row, "artist")?,
            title: self.require(row, "title")?,
            year: self.get_string(row, &["year"]),
            medium: self.get_string(row, &["medium"]),
            dimensions,
            condition: self
                .get_string(row, &["condition"])
                .unwrap_or_else(|| self.default_condition.clone()),
            location: self.get_string(row, &["location"]),

            cost: self.get_money(row, &["cost"])?,
            price: self.get_money(row, &["price", "appraisal_value"])?,
            insurance_value: self.get_money(row, &["insurance_value"])?,

            provenance: self.get_string(row, &["provenance"]),
            exhibition: self.get_string(row, &["exhibition", "exhibition_history"]),
            literature: self.get_string(row, &["literature"]),
            notes: self.get_string(row, &["notes"]),
            owner_info: self.get_string(row, &["owner_info"]),

            // 图片由导入器按 primary_image_filename 挂载
            image_data: None,

            row_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Client Email"), "client_email");
        assert_eq!(normalize_header("  Primary   Image\tFilename "), "primary_image_filename");
        assert_eq!(normalize_header("TITLE"), "title");
    }

    #[test]
    fn test_compose_dimensions_basic() {
        let r = row(&[("height", "20"), ("width", "16"), ("units", "in")]);
        assert_eq!(compose_dimensions(&r), "20 × 16 in");
    }

    #[test]
    fn test_compose_dimensions_framed() {
        let r = row(&[
            ("height", "20"),
            ("width", "16"),
            ("units", "in"),
            ("framed_height", "24"),
            ("framed_width", "20"),
        ]);
        assert_eq!(compose_dimensions(&r), "20 × 16 in; Framed: 24 × 20 in");
    }

    #[test]
    fn test_compose_dimensions_unit_alias_and_empty() {
        let r = row(&[("height", "10"), ("depth", "3"), ("unit", "cm")]);
        assert_eq!(compose_dimensions(&r), "10 × 3 cm");
        assert_eq!(compose_dimensions(&row(&[("units", "in")])), "");
    }

    #[test]
    fn test_field_mapper_basic() {
        let r = row(&[
            ("client_email", "a@b.com"),
            ("artist", "Jane Doe"),
            ("title", "Untitled"),
            ("appraisal_value", "$1,500"),
            ("exhibition_history", "Venice 2019"),
        ]);

        let art = FieldMapper::default().map_row(&r, 2).unwrap();

        assert_eq!(art.client_id, "a@b.com");
        assert_eq!(art.artist, "Jane Doe");
        assert_eq!(art.condition, "Excellent");
        assert_eq!(art.price, Some(1500.0));
        assert_eq!(art.exhibition.as_deref(), Some("Venice 2019"));
        assert_eq!(art.dimensions, None);
        assert_eq!(art.row_number, 2);
    }

    #[test]
    fn test_field_mapper_client_priority() {
        let r = row(&[
            ("client", "3f2504e0-4f89-11d3-9a0c-0305e82c3301"),
            ("client_id", "other"),
            ("client_email", "a@b.com"),
            ("artist", "A"),
            ("title", "T"),
        ]);
        let art = FieldMapper::default().map_row(&r, 2).unwrap();
        assert_eq!(art.client_id, "3f2504e0-4f89-11d3-9a0c-0305e82c3301");
    }

    #[test]
    fn test_field_mapper_explicit_dimensions_win() {
        let r = row(&[
            ("artist", "A"),
            ("title", "T"),
            ("dimensions", "30 x 40 cm"),
            ("height", "20"),
            ("width", "16"),
        ]);
        let art = FieldMapper::default().map_row(&r, 2).unwrap();
        assert_eq!(art.dimensions.as_deref(), Some("30 x 40 cm"));
    }

    #[test]
    fn test_field_mapper_price_preferred_over_appraisal() {
        let r = row(&[("artist", "A"), ("title", "T"), ("price", "10"), ("appraisal_value", "20")]);
        let art = FieldMapper::default().map_row(&r, 2).unwrap();
        assert_eq!(art.price, Some(10.0));
    }

    #[test]
    fn test_field_mapper_invalid_number() {
        let r = row(&[("artist", "A"), ("title", "T"), ("insurance_value", "n/a")]);
        let result = FieldMapper::default().map_row(&r, 5);
        assert!(matches!(result, Err(ImportError::InvalidNumber { .. })));
    }

    #[test]
    fn test_field_mapper_missing_title_value() {
        let r = row(&[("artist", "A"), ("title", "  ")]);
        let err = FieldMapper::default().map_row(&r, 2).unwrap_err();
        assert_eq!(err.to_string(), "Missing value for title");
    }

    #[test]
    fn test_field_mapper_custom_default_condition() {
        let r = row(&[("artist", "A"), ("title", "T")]);
        let art = FieldMapper::new("Good").map_row(&r, 2).unwrap();
        assert_eq!(art.condition, "Good");
    }
}
