// ==========================================
// 艺术品顾问系统 - 配置层
// ==========================================
// 职责: 系统配置管理（事实表版式、导入缺省值、语言）
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod layout_config;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use layout_config::{FactSheetLayoutConfig, ImportDefaults};
