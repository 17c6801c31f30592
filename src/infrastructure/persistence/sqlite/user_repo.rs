//! SQLite User Repository

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::{database_error, format_timestamp, parse_timestamp, DbPool};
use crate::application::ports::{
    CredentialRecord, RepositoryError, UserRecord, UserRepositoryPort,
};

const CREDENTIAL_PROVIDER: &str = "credential";

/// SQLite User Repository
pub struct SqliteUserRepository {
    pool: DbPool,
}

impl SqliteUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    email_verified: bool,
    created_at: String,
    updated_at: String,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(UserRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            name: row.name,
            email: row.email,
            email_verified: row.email_verified,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

#[derive(FromRow)]
struct CredentialRow {
    user_id: String,
    password_hash: String,
    created_at: String,
}

impl TryFrom<CredentialRow> for CredentialRecord {
    type Error = RepositoryError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        Ok(CredentialRecord {
            user_id: Uuid::parse_str(&row.user_id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            password_hash: row.password_hash,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

/// 唯一约束冲突 -> Duplicate
fn map_insert_error(err: sqlx::Error, email: &str) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::Duplicate(format!("User already exists: {}", email))
        }
        _ => database_error(err),
    }
}

#[async_trait]
impl UserRepositoryPort for SqliteUserRepository {
    async fn create(
        &self,
        user: &UserRecord,
        credential: &CredentialRecord,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, email_verified, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.email_verified)
        .bind(format_timestamp(user.created_at))
        .bind(format_timestamp(user.updated_at))
        .execute(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, &user.email))?;

        sqlx::query(
            r#"
            INSERT INTO accounts (user_id, provider_id, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(credential.user_id.to_string())
        .bind(CREDENTIAL_PROVIDER)
        .bind(&credential.password_hash)
        .bind(format_timestamp(credential.created_at))
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, name, email, email_verified, created_at, updated_at FROM users WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, name, email, email_verified, created_at, updated_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn find_credential(
        &self,
        user_id: Uuid,
    ) -> Result<Option<CredentialRecord>, RepositoryError> {
        let row: Option<CredentialRow> = sqlx::query_as(
            "SELECT user_id, password_hash, created_at FROM accounts WHERE user_id = ? AND provider_id = ?",
        )
        .bind(user_id.to_string())
        .bind(CREDENTIAL_PROVIDER)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(CredentialRecord::try_from).transpose()
    }
}
