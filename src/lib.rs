// ==========================================
// 艺术品顾问系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 核心流程: 批量导入（表格 + 图片包）/ 事实表与库存导出
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 外部数据
pub mod importer;

// 导出层 - PDF / ZIP / XLSX / CSV
pub mod export;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    ArtworkRecord, BulkArtwork, BulkImportOutcome, ClientRecord, ClientType, InlineImage,
    NewClient, RowError,
};

// 导入 / 导出
pub use export::{
    export_inventory_csv, export_inventory_xlsx, format_money, render_fact_sheet,
    render_fact_sheets_archive, sanitize_file_component, ExportFile,
};
pub use importer::{ArtworkSink, BulkImporter};

// API
pub use api::{DashboardApi, ExportApi, ImportApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Art Advisory";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
