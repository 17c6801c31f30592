//! Argon2 Password Hasher
//!
//! 实现 PasswordHasherPort，输出 PHC 格式字符串（$argon2id$...）
//! 计算在 tokio 阻塞线程池中执行

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;

use crate::application::ports::{HashError, PasswordHasherPort};

/// Argon2id 密码哈希（默认参数）
#[derive(Default, Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    fn hash_blocking(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HashError::Hash(e.to_string()))
    }

    fn verify_blocking(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        let parsed = PasswordHash::new(hash).map_err(|e| HashError::Malformed(e.to_string()))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(HashError::Hash(e.to_string())),
        }
    }
}

#[async_trait]
impl PasswordHasherPort for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, HashError> {
        let hasher = self.clone();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash_blocking(&password))
            .await
            .map_err(|e| HashError::Hash(format!("hash task failed: {}", e)))?
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        let hasher = self.clone();
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify_blocking(&password, &hash))
            .await
            .map_err(|e| HashError::Hash(format!("verify task failed: {}", e)))?
    }
}
