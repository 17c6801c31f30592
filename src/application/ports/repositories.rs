//! Repository Ports - 出站端口
//!
//! 定义认证数据持久化的抽象接口
//! 具体实现在 infrastructure 层（如 SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// User Repository
// ============================================================================

/// 用户实体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    /// 已规范化（小写、去空白）
    pub email: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 邮箱密码凭证
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub user_id: Uuid,
    /// PHC 格式密码哈希
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User Repository Port
#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    /// 创建用户及其凭证（同一事务）
    ///
    /// 邮箱已存在时返回 `Duplicate`
    async fn create(
        &self,
        user: &UserRecord,
        credential: &CredentialRecord,
    ) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError>;

    async fn find_credential(
        &self,
        user_id: Uuid,
    ) -> Result<Option<CredentialRecord>, RepositoryError>;
}

// ============================================================================
// Session Repository
// ============================================================================

/// 登录会话
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub id: Uuid,
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Session Repository Port
#[async_trait]
pub trait SessionRepositoryPort: Send + Sync {
    async fn save(&self, session: &SessionRecord) -> Result<(), RepositoryError>;

    async fn find_by_token(&self, token: &str) -> Result<Option<SessionRecord>, RepositoryError>;

    /// 删除会话，不存在时也返回 Ok
    async fn delete_by_token(&self, token: &str) -> Result<(), RepositoryError>;

    /// 清理过期会话，返回删除数量
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError>;
}
