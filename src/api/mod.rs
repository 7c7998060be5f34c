// ==========================================
// 艺术品顾问系统 - API 层
// ==========================================
// 职责: 组合导入/导出/仓储，供命令行调用
// ==========================================

pub mod dashboard_api;
pub mod error;
pub mod export_api;
pub mod import_api;

// 重导出核心类型
pub use dashboard_api::{ClientCollectionSummary, DashboardApi, DashboardStats};
pub use error::{ApiError, ApiResult};
pub use export_api::{ExportApi, ExportFormat, ExportQuery};
pub use import_api::{ImportApi, ImportApiResponse};
