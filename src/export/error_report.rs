// ==========================================
// 艺术品顾问系统 - 导入错误报告
// ==========================================
// 格式: bulk_errors.csv，表头 row,error
// ==========================================

use crate::domain::import::RowError;
use crate::export::error::ExportResult;
use crate::export::format::{ExportFile, MIME_CSV};
use csv::{QuoteStyle, WriterBuilder};

pub const ERROR_REPORT_FILE_NAME: &str = "bulk_errors.csv";

/// 生成导入错误报告（无错误时返回 None）
pub fn build_error_report(errors: &[RowError]) -> ExportResult<Option<ExportFile>> {
    if errors.is_empty() {
        return Ok(None);
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(["row", "error"])?;
    for err in errors {
        writer.write_record([err.row.to_string(), err.error.clone()])?;
    }
    let bytes = writer.into_inner()?;

    Ok(Some(ExportFile::new(ERROR_REPORT_FILE_NAME, MIME_CSV, bytes)))
}
