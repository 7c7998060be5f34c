// ==========================================
// 艺术品顾问系统 - 艺术品 Repository
// ==========================================
// 职责: 艺术品写入 / 查询（导出层的记录来源）
// 红线: Repository 不含业务规则，只做数据访问
// ==========================================

use crate::domain::artwork::{ArtworkRecord, InlineImage};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ==========================================
// ArtworkRepository Trait
// ==========================================
#[async_trait]
pub trait ArtworkRepository: Send + Sync {
    /// 写入新艺术品（分配 id 与时间戳）
    ///
    /// # 返回
    /// - Ok(ArtworkRecord): 落库后的完整记录
    /// - Err: client_id 指向不存在的客户时为外键错误
    async fn insert(&self, artwork: ArtworkRecord) -> RepositoryResult<ArtworkRecord>;

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<ArtworkRecord>>;

    /// 全部艺术品（按创建时间倒序）
    async fn list_all(&self) -> RepositoryResult<Vec<ArtworkRecord>>;

    async fn list_by_client(&self, client_id: &str) -> RepositoryResult<Vec<ArtworkRecord>>;
}

// ==========================================
// ArtworkRepositoryImpl（rusqlite）
// ==========================================
pub struct ArtworkRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

const ARTWORK_COLUMNS: &str = r#"
    id, client_id, artist, title, year, medium, dimensions, condition, location,
    cost, price, insurance_value, provenance, exhibition, literature, notes,
    owner_info, image_data, created_at, updated_at
"#;

impl ArtworkRepositoryImpl {
    /// 从已有连接创建
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<ArtworkRecord> {
        let image_data: Option<String> = row.get(17)?;
        Ok(ArtworkRecord {
            id: row.get(0)?,
            client_id: row.get(1)?,
            artist: row.get(2)?,
            title: row.get(3)?,
            year: row.get(4)?,
            medium: row.get(5)?,
            dimensions: row.get(6)?,
            condition: row.get(7)?,
            location: row.get(8)?,
            cost: row.get(9)?,
            price: row.get(10)?,
            insurance_value: row.get(11)?,
            provenance: row.get(12)?,
            exhibition: row.get(13)?,
            literature: row.get(14)?,
            notes: row.get(15)?,
            owner_info: row.get(16)?,
            image_data: image_data.map(InlineImage::from_data_url),
            created_at: row.get(18)?,
            updated_at: row.get(19)?,
        })
    }

    fn query_list(&self, filter: &str, args: &[&dyn rusqlite::ToSql]) -> RepositoryResult<Vec<ArtworkRecord>> {
        let conn = self.conn.lock()?;
        let sql = format!(
            "SELECT {} FROM artworks {} ORDER BY created_at DESC, rowid DESC",
            ARTWORK_COLUMNS, filter
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(args, Self::map_row)?;
        let artworks = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(artworks)
    }
}

#[async_trait]
impl ArtworkRepository for ArtworkRepositoryImpl {
    async fn insert(&self, artwork: ArtworkRecord) -> RepositoryResult<ArtworkRecord> {
        let now = Utc::now();
        let record = ArtworkRecord {
            id: Some(Uuid::new_v4().to_string()),
            created_at: Some(now),
            updated_at: Some(now),
            ..artwork
        };

        let conn = self.conn.lock()?;
        conn.execute(
            r#"
            INSERT INTO artworks (
                id, client_id, artist, title, year, medium, dimensions, condition,
                location, cost, price, insurance_value, provenance, exhibition,
                literature, notes, owner_info, image_data, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20
            )
            "#,
            params![
                record.id,
                record.client_id,
                record.artist,
                record.title,
                record.year,
                record.medium,
                record.dimensions,
                record.condition,
                record.location,
                record.cost,
                record.price,
                record.insurance_value,
                record.provenance,
                record.exhibition,
                record.literature,
                record.notes,
                record.owner_info,
                record.image_data.as_ref().map(InlineImage::as_str),
                record.created_at,
                record.updated_at,
            ],
        )?;

        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<ArtworkRecord>> {
        let conn = self.conn.lock()?;
        let sql = format!("SELECT {} FROM artworks WHERE id = ?1", ARTWORK_COLUMNS);
        let record = conn.query_row(&sql, params![id], Self::map_row).optional()?;
        Ok(record)
    }

    async fn list_all(&self) -> RepositoryResult<Vec<ArtworkRecord>> {
        self.query_list("", &[])
    }

    async fn list_by_client(&self, client_id: &str) -> RepositoryResult<Vec<ArtworkRecord>> {
        self.query_list("WHERE client_id = ?1", &[&client_id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;
    use crate::domain::client::{ClientType, NewClient};
    use crate::repository::client_repo::{ClientRepository, ClientRepositoryImpl};
    use crate::repository::error::RepositoryError;

    fn shared_conn() -> Arc<Mutex<Connection>> {
        let conn = crate::db::open_sqlite_connection(":memory:").unwrap();
        init_schema(&conn).unwrap();
        Arc::new(Mutex::new(conn))
    }

    fn artwork(title: &str, client_id: Option<String>) -> ArtworkRecord {
        ArtworkRecord {
            artist: "Jane Doe".to_string(),
            title: title.to_string(),
            condition: "Excellent".to_string(),
            price: Some(1000.0),
            image_data: Some(InlineImage::from_bytes("image/png", &[1, 2, 3])),
            client_id,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = ArtworkRepositoryImpl::from_connection(shared_conn());

        let saved = repo.insert(artwork("One", None)).await.unwrap();
        let id = saved.id.clone().unwrap();

        let found = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(found.title, "One");
        assert_eq!(found.price, Some(1000.0));
        assert_eq!(found.image_data, saved.image_data);
        assert!(found.created_at.is_some());
    }

    #[tokio::test]
    async fn test_list_by_client() {
        let conn = shared_conn();
        let clients = ClientRepositoryImpl::from_connection(conn.clone());
        let repo = ArtworkRepositoryImpl::from_connection(conn);

        let client = clients
            .insert(NewClient::minimal_from_email("a@b.com", ClientType::Collector))
            .await
            .unwrap();
        repo.insert(artwork("Mine", Some(client.id.clone()))).await.unwrap();
        repo.insert(artwork("Unassigned", None)).await.unwrap();

        let mine = repo.list_by_client(&client.id).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "Mine");
        assert_eq!(repo.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_client_is_rejected() {
        let repo = ArtworkRepositoryImpl::from_connection(shared_conn());
        let result = repo.insert(artwork("Orphan", Some("no-such-client".to_string()))).await;
        assert!(matches!(result, Err(RepositoryError::ForeignKeyViolation(_))));
    }
}
