// ==========================================
// 艺术品顾问系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写
// 存储: config_kv 表 (key-value)，缺失键回落到默认值
// ==========================================

use crate::config::layout_config::{FactSheetLayoutConfig, ImportDefaults};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let conn_guard = conn.lock()?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.conn.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 读取配置值，带默认值
    pub fn get_or_default(&self, key: &str, default: &str) -> RepositoryResult<String> {
        Ok(self.get_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// 写入配置值（存在则覆盖）
    ///
    /// 数值类键在写入前校验为正数
    pub fn set_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let key = key.trim();
        if key.is_empty() {
            return Err(RepositoryError::FieldValueError {
                field: "key".to_string(),
                message: "config key must not be empty".to_string(),
            });
        }
        if config_keys::NUMERIC_KEYS.contains(&key) {
            let parsed = value.trim().parse::<f32>().ok().filter(|v| *v > 0.0);
            if parsed.is_none() {
                return Err(RepositoryError::FieldValueError {
                    field: key.to_string(),
                    message: format!("expected a positive number, got '{}'", value),
                });
            }
        }
        if !config_keys::ALL_KEYS.contains(&key) {
            warn!(key = %key, "写入未知配置键");
        }

        let conn = self.conn.lock()?;
        conn.execute(
            "INSERT INTO config_kv (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value.trim()],
        )?;
        debug!(key = %key, "配置已更新");
        Ok(())
    }

    /// 全部配置（按键排序）
    pub fn list_values(&self) -> RepositoryResult<Vec<(String, String)>> {
        let conn = self.conn.lock()?;
        let mut stmt = conn.prepare("SELECT key, value FROM config_kv ORDER BY key")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        let values = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(values)
    }

    /// 读取数值配置；无法解析时记录告警并使用默认值
    fn get_f32(&self, key: &str, default: f32) -> RepositoryResult<f32> {
        let Some(raw) = self.get_value(key)? else {
            return Ok(default);
        };
        match raw.trim().parse::<f32>() {
            Ok(v) if v > 0.0 => Ok(v),
            _ => {
                warn!(key = %key, value = %raw, default, "配置值非法，使用默认值");
                Ok(default)
            }
        }
    }

    // ===== 事实表版式 =====

    pub fn load_fact_sheet_layout(&self) -> RepositoryResult<FactSheetLayoutConfig> {
        let defaults = FactSheetLayoutConfig::default();
        Ok(FactSheetLayoutConfig {
            margin: self.get_f32(config_keys::FACT_SHEET_MARGIN, defaults.margin)?,
            image_max_height: self
                .get_f32(config_keys::FACT_SHEET_IMAGE_MAX_HEIGHT, defaults.image_max_height)?,
            placeholder_height: self.get_f32(
                config_keys::FACT_SHEET_PLACEHOLDER_HEIGHT,
                defaults.placeholder_height,
            )?,
            low_water_mark: self
                .get_f32(config_keys::FACT_SHEET_LOW_WATER_MARK, defaults.low_water_mark)?,
            ..defaults
        })
    }

    // ===== 导入缺省值 =====

    pub fn load_import_defaults(&self) -> RepositoryResult<ImportDefaults> {
        let defaults = ImportDefaults::default();
        let condition = self
            .get_value(config_keys::IMPORT_DEFAULT_CONDITION)?
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.condition);
        let client_type = match self.get_value(config_keys::IMPORT_DEFAULT_CLIENT_TYPE)? {
            Some(raw) => raw.parse().unwrap_or(defaults.client_type),
            None => defaults.client_type,
        };
        Ok(ImportDefaults {
            condition,
            client_type,
        })
    }

    /// 界面语言（默认 en）
    pub fn locale(&self) -> RepositoryResult<String> {
        self.get_or_default(config_keys::APP_LOCALE, config_keys::DEFAULT_LOCALE)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 事实表版式（pt）
    pub const FACT_SHEET_MARGIN: &str = "fact_sheet/margin_pt";
    pub const FACT_SHEET_IMAGE_MAX_HEIGHT: &str = "fact_sheet/image_max_height_pt";
    pub const FACT_SHEET_PLACEHOLDER_HEIGHT: &str = "fact_sheet/placeholder_height_pt";
    pub const FACT_SHEET_LOW_WATER_MARK: &str = "fact_sheet/low_water_mark_pt";

    // 批量导入
    pub const IMPORT_DEFAULT_CONDITION: &str = "import/default_condition";
    pub const IMPORT_DEFAULT_CLIENT_TYPE: &str = "import/default_client_type";

    // 语言
    pub const APP_LOCALE: &str = "app/locale";
    pub const DEFAULT_LOCALE: &str = "en";

    pub const NUMERIC_KEYS: [&str; 4] = [
        FACT_SHEET_MARGIN,
        FACT_SHEET_IMAGE_MAX_HEIGHT,
        FACT_SHEET_PLACEHOLDER_HEIGHT,
        FACT_SHEET_LOW_WATER_MARK,
    ];

    pub const ALL_KEYS: [&str; 7] = [
        FACT_SHEET_MARGIN,
        FACT_SHEET_IMAGE_MAX_HEIGHT,
        FACT_SHEET_PLACEHOLDER_HEIGHT,
        FACT_SHEET_LOW_WATER_MARK,
        IMPORT_DEFAULT_CONDITION,
        IMPORT_DEFAULT_CLIENT_TYPE,
        APP_LOCALE,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;
    use crate::domain::client::ClientType;

    fn manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_defaults_when_empty() {
        let cfg = manager();
        assert_eq!(cfg.load_fact_sheet_layout().unwrap(), FactSheetLayoutConfig::default());
        assert_eq!(cfg.load_import_defaults().unwrap(), ImportDefaults::default());
        assert_eq!(cfg.locale().unwrap(), "en");
    }

    #[test]
    fn test_set_value_overrides() {
        let cfg = manager();
        cfg.set_value(config_keys::FACT_SHEET_LOW_WATER_MARK, "700").unwrap();
        cfg.set_value(config_keys::FACT_SHEET_LOW_WATER_MARK, "720").unwrap();
        cfg.set_value(config_keys::IMPORT_DEFAULT_CLIENT_TYPE, "Institution").unwrap();

        assert_eq!(cfg.load_fact_sheet_layout().unwrap().low_water_mark, 720.0);
        assert_eq!(
            cfg.load_import_defaults().unwrap().client_type,
            ClientType::Institution
        );
        assert_eq!(cfg.list_values().unwrap().len(), 2);
    }

    #[test]
    fn test_set_value_rejects_bad_number() {
        let cfg = manager();
        let result = cfg.set_value(config_keys::FACT_SHEET_MARGIN, "-3");
        assert!(matches!(result, Err(RepositoryError::FieldValueError { .. })));
        assert!(cfg.get_value(config_keys::FACT_SHEET_MARGIN).unwrap().is_none());
    }
}
