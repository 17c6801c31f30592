//! Password Hasher Port - 密码哈希
//!
//! 哈希计算是 CPU 密集操作，实现方不得阻塞异步运行时

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("Failed to hash password: {0}")]
    Hash(String),

    #[error("Malformed password hash: {0}")]
    Malformed(String),
}

/// Password Hasher Port
#[async_trait]
pub trait PasswordHasherPort: Send + Sync {
    /// 生成 PHC 格式的哈希串
    async fn hash(&self, password: &str) -> Result<String, HashError>;

    /// 校验密码，不匹配返回 Ok(false)
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError>;
}
