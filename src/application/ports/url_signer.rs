//! URL Signer Port - 对象存储预签名
//!
//! 给定对象 key，生成有时效的只读访问 URL。
//! bucket / region / 凭证由具体实现持有。

use chrono::{DateTime, Utc};
use thiserror::Error;

/// 签名错误
#[derive(Debug, Error)]
pub enum SignerError {
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Invalid expiry: {0}s (allowed 1..=604800)")]
    InvalidExpiry(u64),

    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

/// 预签名 URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedUrl {
    pub url: String,
    /// 有效期（秒）
    pub expires_in: u64,
    /// 签名时间
    pub signed_at: DateTime<Utc>,
}

impl PresignedUrl {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.signed_at + chrono::Duration::seconds(self.expires_in as i64)
    }
}

/// URL Signer Port
///
/// 不重试、不转换错误，签名失败原样返回给调用方
pub trait UrlSignerPort: Send + Sync {
    /// 生成 GET 对象的预签名 URL
    fn presign_get(&self, key: &str) -> Result<PresignedUrl, SignerError>;

    /// 预签名有效期（秒）
    fn expires_in(&self) -> u64;
}
