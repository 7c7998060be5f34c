// ==========================================
// 艺术品顾问系统 - API层错误类型
// ==========================================
// 职责: 汇总导入/导出/仓储错误，转换为面向用户的错误消息
// 约束: 前置条件失败（缺少表格、缺少必填列）原文透传
// ==========================================

use crate::export::error::ExportError;
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Business rule violated: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    // ==========================================
    // 导入 / 导出错误
    // ==========================================
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Export(#[from] ExportError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 RepositoryError 转换
// 目的: 将Repository层的技术错误转换为用户友好的业务错误
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} (id={})", entity, id))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseError(format!("failed to acquire lock: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("unique constraint: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("foreign key constraint: {}", msg))
            }
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("{}: {}", field, message))
            }
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_errors_pass_through_verbatim() {
        let err: ApiError = ImportError::SpreadsheetMissing.into();
        assert_eq!(err.to_string(), "Upload a CSV/XLSX file");

        let err: ApiError =
            ImportError::MissingColumns(vec!["artist".to_string(), "title".to_string()]).into();
        assert_eq!(err.to_string(), "Missing required columns: artist, title");
    }

    #[test]
    fn test_repository_error_mapping() {
        let err: ApiError = RepositoryError::NotFound {
            entity: "Artwork".to_string(),
            id: "a1".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = RepositoryError::FieldValueError {
            field: "email".to_string(),
            message: "empty".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Invalid input: email: empty");
    }

    #[test]
    fn test_io_failures_arrive_through_layer_errors() {
        let io = || std::io::Error::new(std::io::ErrorKind::Other, "disk full");

        let err: ApiError = ExportError::Io(io()).into();
        assert!(matches!(err, ApiError::Export(ExportError::Io(_))));

        let err: ApiError = ImportError::from(io()).into();
        assert!(matches!(err, ApiError::Import(ImportError::FileReadError(_))));
    }
}
