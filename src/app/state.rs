// ==========================================
// 艺术品顾问系统 - 应用状态
// ==========================================
// 职责: 打开数据库、建表，并组装共享的仓储与 API 实例
// ==========================================

use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::api::{DashboardApi, ExportApi, ImportApi};
use crate::config::ConfigManager;
use crate::db::{init_schema, open_sqlite_connection};
use crate::repository::{
    ArtworkRepository, ArtworkRepositoryImpl, ClientRepository, ClientRepositoryImpl,
    RepositoryResult,
};

/// 应用状态
///
/// 所有仓储共享同一个 SQLite 连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 配置管理器
    pub config: Arc<ConfigManager>,

    /// 客户仓储
    pub client_repo: Arc<dyn ClientRepository>,

    /// 艺术品仓储
    pub artwork_repo: Arc<dyn ArtworkRepository>,

    /// 批量导入API
    pub import_api: Arc<ImportApi>,

    /// 导出API
    pub export_api: Arc<ExportApi>,

    /// 驾驶舱API
    pub dashboard_api: Arc<DashboardApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（":memory:" 表示内存库）
    pub fn new(db_path: String) -> RepositoryResult<Self> {
        tracing::info!(db_path = %db_path, "初始化AppState");

        let conn = open_sqlite_connection(&db_path)?;
        Self::from_connection(db_path, conn)
    }

    /// 从已打开的连接创建（测试使用内存库）
    pub fn from_connection(db_path: String, conn: Connection) -> RepositoryResult<Self> {
        init_schema(&conn)?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let config = Arc::new(ConfigManager::from_connection(conn.clone())?);
        let client_repo: Arc<dyn ClientRepository> =
            Arc::new(ClientRepositoryImpl::from_connection(conn.clone()));
        let artwork_repo: Arc<dyn ArtworkRepository> =
            Arc::new(ArtworkRepositoryImpl::from_connection(conn));

        // ==========================================
        // 初始化API层
        // ==========================================
        let import_api = Arc::new(ImportApi::new(
            client_repo.clone(),
            artwork_repo.clone(),
            config.clone(),
        ));
        let export_api = Arc::new(ExportApi::new(
            client_repo.clone(),
            artwork_repo.clone(),
            config.clone(),
        ));
        let dashboard_api = Arc::new(DashboardApi::new(client_repo.clone(), artwork_repo.clone()));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            config,
            client_repo,
            artwork_repo,
            import_api,
            export_api,
            dashboard_api,
        })
    }
}

/// 默认数据库路径
///
/// 优先级: 环境变量 ART_ADVISORY_DB_PATH → 用户数据目录 → 当前目录
pub fn get_default_db_path() -> String {
    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("ART_ADVISORY_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./art_advisory.db");
    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("art-advisory");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("art_advisory.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_app_state_in_memory() {
        let conn = open_sqlite_connection(":memory:").unwrap();
        let state = AppState::from_connection(":memory:".to_string(), conn).unwrap();

        let stats = state.dashboard_api.get_stats().await.unwrap();
        assert_eq!(stats.total_artworks, 0);
        assert_eq!(state.config.locale().unwrap(), "en");
    }
}
