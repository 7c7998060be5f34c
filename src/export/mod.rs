// ==========================================
// 艺术品顾问系统 - 导出层
// ==========================================
// 职责: 事实表 PDF、事实表 ZIP、库存 XLSX/CSV、导入错误报告
// 约束: 输入为已加载记录，不访问数据库；空输入不产生文件
// ==========================================

pub mod archive;
pub mod error;
pub mod error_report;
pub mod fact_sheet;
pub mod format;
pub mod spreadsheet;

// 重导出核心接口
pub use archive::{archive_entry_name, render_fact_sheets_archive};
pub use error::{ExportError, ExportResult};
pub use error_report::{build_error_report, ERROR_REPORT_FILE_NAME};
pub use fact_sheet::{
    fact_sheet_file, fact_sheet_file_name, layout_fact_sheet, render_fact_sheet,
    FactSheetDocument,
};
pub use format::{dated_file_name, format_money, sanitize_file_component, ExportFile};
pub use spreadsheet::{export_inventory_csv, export_inventory_xlsx, INVENTORY_HEADERS};
