// ==========================================
// 艺术品顾问系统 - 领域模型层
// ==========================================
// 职责: 定义艺术品、客户、导入结果等领域实体
// 红线: 不含数据访问逻辑,不含导出/渲染逻辑
// ==========================================

pub mod artwork;
pub mod client;
pub mod import;

// 重导出核心类型
pub use artwork::{ArtworkRecord, BulkArtwork, InlineImage, DEFAULT_CONDITION};
pub use client::{email_local_part, ClientRecord, ClientType, NewClient};
pub use import::{BulkImportOutcome, RowError};
