//! Repository durevole su SQLite (sqlx).
//!
//! Gli id sono salvati come TEXT (UUID) e i timestamp come TEXT RFC3339, come
//! nelle altre tabelle del server. Lo schema è creato da [`crate::run_migrations`].

use async_trait::async_trait;
use orgboard_core::{validation::titles_match, Message};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use super::MessageRepository;
use crate::error::{RepositoryError, RepositoryResult};

#[derive(Clone)]
pub struct SqliteMessageRepository {
    pool: SqlitePool,
}

impl SqliteMessageRepository {
    /// Wraps an already migrated pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn format_ts(ts: OffsetDateTime) -> RepositoryResult<String> {
    ts.format(&Rfc3339)
        .map_err(|e| RepositoryError::Corrupt(format!("format timestamp: {}", e)))
}

fn parse_ts(raw: &str) -> RepositoryResult<OffsetDateTime> {
    OffsetDateTime::parse(raw, &Rfc3339)
        .map_err(|e| RepositoryError::Corrupt(format!("parse timestamp {:?}: {}", raw, e)))
}

fn parse_id(raw: &str) -> RepositoryResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| RepositoryError::Corrupt(format!("parse id {:?}: {}", raw, e)))
}

// da riga SQLite a Message; ogni colonna malformata diventa RepositoryError::Corrupt
fn message_from_row(row: &SqliteRow) -> RepositoryResult<Message> {
    let id: String = row.try_get("id")?;
    let organization_id: String = row.try_get("organization_id")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: Option<String> = row.try_get("updated_at")?;
    Ok(Message {
        id: parse_id(&id)?,
        organization_id: parse_id(&organization_id)?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        is_active: row.try_get("is_active")?,
        created_at: parse_ts(&created_at)?,
        updated_at: updated_at.as_deref().map(parse_ts).transpose()?,
    })
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    async fn list_all(&self, organization_id: Uuid) -> RepositoryResult<Vec<Message>> {
        let rows = sqlx::query(
            "SELECT id, organization_id, title, content, is_active, created_at, updated_at \
             FROM messages WHERE organization_id = ?",
        )
        .bind(organization_id.to_string())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(message_from_row).collect()
    }

    async fn get(&self, organization_id: Uuid, id: Uuid) -> RepositoryResult<Option<Message>> {
        let row = sqlx::query(
            "SELECT id, organization_id, title, content, is_active, created_at, updated_at \
             FROM messages WHERE id = ? AND organization_id = ?",
        )
        .bind(id.to_string())
        .bind(organization_id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(message_from_row).transpose()
    }

    async fn add(&self, message: &Message) -> RepositoryResult<()> {
        let updated_at = message.updated_at.map(format_ts).transpose()?;
        sqlx::query(
            "INSERT OR REPLACE INTO messages \
             (id, organization_id, title, content, is_active, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(message.id.to_string())
        .bind(message.organization_id.to_string())
        .bind(&message.title)
        .bind(&message.content)
        .bind(message.is_active)
        .bind(format_ts(message.created_at)?)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;
        debug!(message_id = %message.id, "inserted message row");
        Ok(())
    }

    async fn update(&self, message: &Message) -> RepositoryResult<()> {
        let updated_at = message.updated_at.map(format_ts).transpose()?;
        sqlx::query(
            "INSERT INTO messages \
             (id, organization_id, title, content, is_active, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(id) DO UPDATE SET \
                organization_id = excluded.organization_id, \
                title = excluded.title, \
                content = excluded.content, \
                is_active = excluded.is_active, \
                created_at = excluded.created_at, \
                updated_at = excluded.updated_at",
        )
        .bind(message.id.to_string())
        .bind(message.organization_id.to_string())
        .bind(&message.title)
        .bind(&message.content)
        .bind(message.is_active)
        .bind(format_ts(message.created_at)?)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;
        debug!(message_id = %message.id, "replaced message row");
        Ok(())
    }

    async fn delete(&self, organization_id: Uuid, id: Uuid) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ? AND organization_id = ?")
            .bind(id.to_string())
            .bind(organization_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists_title(
        &self,
        organization_id: Uuid,
        title: &str,
        exclude_id: Option<Uuid>,
    ) -> RepositoryResult<bool> {
        // lower() di SQLite conosce solo l'ASCII: il confronto avviene lato Rust
        let rows = sqlx::query("SELECT id, title FROM messages WHERE organization_id = ?")
            .bind(organization_id.to_string())
            .fetch_all(&self.pool)
            .await?;
        let exclude = exclude_id.map(|id| id.to_string());
        for row in &rows {
            let id: String = row.try_get("id")?;
            let existing: String = row.try_get("title")?;
            if exclude.as_deref() != Some(id.as_str()) && titles_match(&existing, title) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn ping(&self) -> RepositoryResult<()> {
        self.pool.acquire().await?;
        Ok(())
    }
}
