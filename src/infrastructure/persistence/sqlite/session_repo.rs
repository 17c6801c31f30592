//! SQLite Session Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::{database_error, format_timestamp, parse_timestamp, DbPool};
use crate::application::ports::{RepositoryError, SessionRecord, SessionRepositoryPort};

/// SQLite Session Repository
pub struct SqliteSessionRepository {
    pool: DbPool,
}

impl SqliteSessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct SessionRow {
    id: String,
    token: String,
    user_id: String,
    expires_at: String,
    ip_address: Option<String>,
    user_agent: Option<String>,
    created_at: String,
}

impl TryFrom<SessionRow> for SessionRecord {
    type Error = RepositoryError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        Ok(SessionRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            token: row.token,
            user_id: Uuid::parse_str(&row.user_id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            expires_at: parse_timestamp(&row.expires_at)?,
            ip_address: row.ip_address,
            user_agent: row.user_agent,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

#[async_trait]
impl SessionRepositoryPort for SqliteSessionRepository {
    async fn save(&self, session: &SessionRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (id, token, user_id, expires_at, ip_address, user_agent, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                expires_at = excluded.expires_at,
                ip_address = excluded.ip_address,
                user_agent = excluded.user_agent
            "#,
        )
        .bind(session.id.to_string())
        .bind(&session.token)
        .bind(session.user_id.to_string())
        .bind(format_timestamp(session.expires_at))
        .bind(&session.ip_address)
        .bind(&session.user_agent)
        .bind(format_timestamp(session.created_at))
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<SessionRecord>, RepositoryError> {
        let row: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT id, token, user_id, expires_at, ip_address, user_agent, created_at
            FROM sessions WHERE token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(SessionRecord::try_from).transpose()
    }

    async fn delete_by_token(&self, token: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(format_timestamp(now))
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        let removed = result.rows_affected();
        if removed > 0 {
            tracing::info!(removed, "Expired sessions cleaned up");
        }
        Ok(removed)
    }
}
