// ==========================================
// 艺术品顾问系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 前置条件错误（整体失败）/ 行级错误（记录后继续）
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 前置条件错误 =====
    #[error("Upload a CSV/XLSX file")]
    SpreadsheetMissing,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    // ===== 文件相关错误 =====
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported file format: {0} (expected .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("Failed to read file: {0}")]
    FileReadError(String),

    #[error("Failed to parse spreadsheet: {0}")]
    ExcelParseError(String),

    #[error("Failed to parse CSV: {0}")]
    CsvParseError(String),

    #[error("Failed to read image archive: {0}")]
    ArchiveError(String),

    // ===== 行级映射错误 =====
    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Invalid number in column {field}: {value}")]
    InvalidNumber { field: String, value: String },
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

impl From<zip::result::ZipError> for ImportError {
    fn from(err: zip::result::ZipError) -> Self {
        ImportError::ArchiveError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message() {
        let err = ImportError::MissingColumns(vec!["client_email".to_string(), "title".to_string()]);
        assert_eq!(err.to_string(), "Missing required columns: client_email, title");
    }

    #[test]
    fn test_spreadsheet_missing_message() {
        assert_eq!(ImportError::SpreadsheetMissing.to_string(), "Upload a CSV/XLSX file");
    }
}
