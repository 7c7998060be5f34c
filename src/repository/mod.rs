// ==========================================
// 艺术品顾问系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod artwork_repo;
pub mod client_repo;
pub mod error;

// 重导出核心仓储
pub use artwork_repo::{ArtworkRepository, ArtworkRepositoryImpl};
pub use client_repo::{ClientRepository, ClientRepositoryImpl};
pub use error::{RepositoryError, RepositoryResult};
