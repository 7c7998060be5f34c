// ==========================================
// 艺术品顾问系统 - 客户 Repository
// ==========================================
// 职责: 客户 CRUD + 按邮箱幂等 upsert（批量导入用）
// 红线: Repository 不含业务规则，只做数据访问
// ==========================================

use crate::domain::client::{ClientRecord, ClientType, NewClient};
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ==========================================
// ClientRepository Trait
// ==========================================
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// 按邮箱精确匹配；不存在则以邮箱本地部分为名称创建
    ///
    /// # 返回
    /// - Ok(String): 客户 ID（已存在或新建）
    async fn upsert_by_email(
        &self,
        email: &str,
        default_type: &ClientType,
    ) -> RepositoryResult<String>;

    async fn insert(&self, client: NewClient) -> RepositoryResult<ClientRecord>;

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<ClientRecord>>;

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<ClientRecord>>;

    async fn list_all(&self) -> RepositoryResult<Vec<ClientRecord>>;
}

// ==========================================
// ClientRepositoryImpl（rusqlite）
// ==========================================
pub struct ClientRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

const CLIENT_COLUMNS: &str =
    "id, name, email, phone, address, notes, type, created_at, updated_at";

impl ClientRepositoryImpl {
    /// 从已有连接创建
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<ClientRecord> {
        let client_type: String = row.get(6)?;
        Ok(ClientRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            phone: row.get(3)?,
            address: row.get(4)?,
            notes: row.get(5)?,
            client_type: client_type.parse().unwrap_or_default(),
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    fn insert_locked(conn: &Connection, client: NewClient) -> RepositoryResult<ClientRecord> {
        let now = Utc::now();
        let record = ClientRecord {
            id: Uuid::new_v4().to_string(),
            name: client.name,
            email: client.email,
            phone: client.phone,
            address: client.address,
            notes: client.notes,
            client_type: client.client_type,
            created_at: now,
            updated_at: now,
        };

        conn.execute(
            r#"
            INSERT INTO clients (
                id, name, email, phone, address, notes, type, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                record.id,
                record.name,
                record.email,
                record.phone,
                record.address,
                record.notes,
                record.client_type.to_string(),
                record.created_at,
                record.updated_at,
            ],
        )?;

        Ok(record)
    }

    fn find_id_by_email_locked(conn: &Connection, email: &str) -> RepositoryResult<Option<String>> {
        let id = conn
            .query_row(
                "SELECT id FROM clients WHERE email = ?1 ORDER BY created_at LIMIT 1",
                params![email],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(id)
    }
}

#[async_trait]
impl ClientRepository for ClientRepositoryImpl {
    async fn upsert_by_email(
        &self,
        email: &str,
        default_type: &ClientType,
    ) -> RepositoryResult<String> {
        let email = email.trim();
        if email.is_empty() {
            return Err(RepositoryError::FieldValueError {
                field: "email".to_string(),
                message: "empty client reference".to_string(),
            });
        }

        // 查询与插入在同一把锁内完成，保证幂等
        let conn = self.conn.lock()?;
        if let Some(id) = Self::find_id_by_email_locked(&conn, email)? {
            return Ok(id);
        }

        let created = Self::insert_locked(
            &conn,
            NewClient::minimal_from_email(email, default_type.clone()),
        )?;
        tracing::info!(client_id = %created.id, email = %email, "按邮箱新建客户");
        Ok(created.id)
    }

    async fn insert(&self, client: NewClient) -> RepositoryResult<ClientRecord> {
        let conn = self.conn.lock()?;
        Self::insert_locked(&conn, client)
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<ClientRecord>> {
        let conn = self.conn.lock()?;
        let sql = format!("SELECT {} FROM clients WHERE id = ?1", CLIENT_COLUMNS);
        let record = conn.query_row(&sql, params![id], Self::map_row).optional()?;
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<ClientRecord>> {
        let conn = self.conn.lock()?;
        let sql = format!(
            "SELECT {} FROM clients WHERE email = ?1 ORDER BY created_at LIMIT 1",
            CLIENT_COLUMNS
        );
        let record = conn.query_row(&sql, params![email], Self::map_row).optional()?;
        Ok(record)
    }

    async fn list_all(&self) -> RepositoryResult<Vec<ClientRecord>> {
        let conn = self.conn.lock()?;
        let sql = format!("SELECT {} FROM clients ORDER BY name", CLIENT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], Self::map_row)?;
        let clients = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(clients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;

    fn repo() -> ClientRepositoryImpl {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        ClientRepositoryImpl::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[tokio::test]
    async fn test_upsert_by_email_is_idempotent() {
        let repo = repo();

        let first = repo.upsert_by_email("jane@example.com", &ClientType::Collector).await.unwrap();
        let second = repo.upsert_by_email("jane@example.com", &ClientType::Collector).await.unwrap();

        assert_eq!(first, second);
        let clients = repo.list_all().await.unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].name, "jane");
        assert_eq!(clients[0].client_type, ClientType::Collector);
    }

    #[tokio::test]
    async fn test_upsert_matches_existing_client() {
        let repo = repo();
        let existing = repo
            .insert(NewClient {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                client_type: ClientType::Institution,
                ..Default::default()
            })
            .await
            .unwrap();

        let id = repo.upsert_by_email("jane@example.com", &ClientType::Collector).await.unwrap();

        assert_eq!(id, existing.id);
        let found = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(found.name, "Jane Doe");
        assert_eq!(found.client_type, ClientType::Institution);
    }

    #[tokio::test]
    async fn test_upsert_rejects_empty_email() {
        let repo = repo();
        let result = repo.upsert_by_email("  ", &ClientType::Collector).await;
        assert!(matches!(result, Err(RepositoryError::FieldValueError { .. })));
    }

    #[tokio::test]
    async fn test_find_by_email_missing() {
        let repo = repo();
        assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
    }
}
