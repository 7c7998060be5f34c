// ==========================================
// 艺术品顾问系统 - 导出层错误类型
// ==========================================
// 职责: PDF / ZIP / XLSX / CSV 生成失败
// 注意: 图片缺失或损坏不是错误（降级为占位框）
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to build archive: {0}")]
    ArchiveError(#[from] zip::result::ZipError),

    #[error("Failed to build spreadsheet: {0}")]
    SpreadsheetError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to build CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl<W> From<csv::IntoInnerError<W>> for ExportError {
    fn from(err: csv::IntoInnerError<W>) -> Self {
        ExportError::Io(err.into_error())
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
