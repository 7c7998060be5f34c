// ==========================================
// 艺术品顾问系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 金额解析
// ==========================================

use crate::importer::error::{ImportError, ImportResult};

pub struct DataCleaner;

impl DataCleaner {
    /// 标准化 NULL 值（空字符串/空白 → None）
    pub fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 解析金额（允许 `$` 前缀与千分位逗号）
    ///
    /// # 参数
    /// - field: 列名（用于错误信息）
    /// - value: 原始值
    ///
    /// # 返回
    /// - Ok(None): 空值
    /// - Ok(Some(f64)): 解析成功
    /// - Err: 非数字
    pub fn parse_money(&self, field: &str, value: Option<&str>) -> ImportResult<Option<f64>> {
        let Some(raw) = self.normalize_null(value) else {
            return Ok(None);
        };

        let cleaned: String = raw
            .chars()
            .filter(|c| !matches!(c, '$' | ',' | ' '))
            .collect();

        cleaned
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or(ImportError::InvalidNumber {
                field: field.to_string(),
                value: raw,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_null() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_null(Some("  ")), None);
        assert_eq!(cleaner.normalize_null(None), None);
        assert_eq!(cleaner.normalize_null(Some(" oil ")), Some("oil".to_string()));
    }

    #[test]
    fn test_parse_money_plain_and_formatted() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_money("price", Some("1200")).unwrap(), Some(1200.0));
        assert_eq!(cleaner.parse_money("price", Some("$12,500.50")).unwrap(), Some(12500.5));
        assert_eq!(cleaner.parse_money("price", Some("")).unwrap(), None);
    }

    #[test]
    fn test_parse_money_invalid() {
        let cleaner = DataCleaner;
        let err = cleaner.parse_money("price", Some("call us")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid number in column price: call us");
    }
}
