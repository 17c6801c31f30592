//! Auth Command Handlers

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{ClientInfo, SignInEmail, SignOut, SignUpEmail};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    CredentialRecord, PasswordHasherPort, SessionRecord, SessionRepositoryPort, UserRecord,
    UserRepositoryPort,
};
use crate::domain::account::{Email, Password, UserName};

/// 邮箱不存在和密码错误使用同一条消息
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// 未知邮箱时用于校验的诱饵哈希（默认 Argon2id 参数），使两条失败路径耗时一致
pub const DECOY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$JABJfHmxMDK+jknS+GeLAg$V0yXfn54aCYf1PtMhwy5tRXd6WN1kmao6+9CEPp/vVk";

/// 登录 / 注册响应
#[derive(Debug, Clone)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserRecord,
    pub expires_at: DateTime<Utc>,
}

/// 生成会话 token: 32 字节随机数，URL-safe base64 无填充
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// 会话签发
#[derive(Clone)]
pub struct SessionIssuer {
    session_repo: Arc<dyn SessionRepositoryPort>,
    ttl: Duration,
}

impl SessionIssuer {
    pub fn new(session_repo: Arc<dyn SessionRepositoryPort>, ttl: Duration) -> Self {
        Self { session_repo, ttl }
    }

    pub async fn issue(
        &self,
        user_id: Uuid,
        client: ClientInfo,
    ) -> Result<SessionRecord, ApplicationError> {
        let now = Utc::now();
        let session = SessionRecord {
            id: Uuid::new_v4(),
            token: generate_session_token(),
            user_id,
            expires_at: now + self.ttl,
            ip_address: client.ip_address,
            user_agent: client.user_agent,
            created_at: now,
        };

        self.session_repo.save(&session).await?;

        tracing::debug!(
            session_id = %session.id,
            user_id = %user_id,
            expires_at = %session.expires_at,
            "Session issued"
        );

        Ok(session)
    }
}

// ============================================================================
// SignUpEmail
// ============================================================================

/// SignUpEmail Handler
pub struct SignUpEmailHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    hasher: Arc<dyn PasswordHasherPort>,
    issuer: SessionIssuer,
}

impl SignUpEmailHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepositoryPort>,
        hasher: Arc<dyn PasswordHasherPort>,
        issuer: SessionIssuer,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            issuer,
        }
    }

    pub async fn handle(&self, command: SignUpEmail) -> Result<AuthResponse, ApplicationError> {
        let name = UserName::parse(&command.name)?;
        let email = Email::parse(&command.email)?;
        let password = Password::parse(command.password)?;

        if self.user_repo.find_by_email(email.as_str()).await?.is_some() {
            return Err(ApplicationError::Conflict(format!(
                "User already exists: {}",
                email
            )));
        }

        let now = Utc::now();
        let user = UserRecord {
            id: Uuid::new_v4(),
            name: name.as_str().to_string(),
            email: email.as_str().to_string(),
            email_verified: false,
            created_at: now,
            updated_at: now,
        };
        let credential = CredentialRecord {
            user_id: user.id,
            password_hash: self.hasher.hash(password.expose()).await?,
            created_at: now,
        };

        self.user_repo.create(&user, &credential).await?;
        let session = self.issuer.issue(user.id, command.client).await?;

        tracing::info!(user_id = %user.id, email = %user.email, "User signed up");

        Ok(AuthResponse {
            token: session.token,
            expires_at: session.expires_at,
            user,
        })
    }
}

// ============================================================================
// SignInEmail
// ============================================================================

/// SignInEmail Handler
pub struct SignInEmailHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    hasher: Arc<dyn PasswordHasherPort>,
    issuer: SessionIssuer,
}

impl SignInEmailHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepositoryPort>,
        hasher: Arc<dyn PasswordHasherPort>,
        issuer: SessionIssuer,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            issuer,
        }
    }

    pub async fn handle(&self, command: SignInEmail) -> Result<AuthResponse, ApplicationError> {
        let email = Email::parse(&command.email)?;

        let Some(user) = self.user_repo.find_by_email(email.as_str()).await? else {
            tracing::warn!(email = %email, "Sign-in for unknown email");
            return Err(self.reject_after_decoy(&command.password).await);
        };

        let Some(credential) = self.user_repo.find_credential(user.id).await? else {
            tracing::warn!(user_id = %user.id, "Sign-in for user without credential");
            return Err(self.reject_after_decoy(&command.password).await);
        };

        if !self
            .hasher
            .verify(&command.password, &credential.password_hash)
            .await?
        {
            tracing::warn!(user_id = %user.id, "Sign-in with wrong password");
            return Err(ApplicationError::unauthorized(INVALID_CREDENTIALS));
        }

        let session = self.issuer.issue(user.id, command.client).await?;

        tracing::info!(user_id = %user.id, "User signed in");

        Ok(AuthResponse {
            token: session.token,
            expires_at: session.expires_at,
            user,
        })
    }
}

impl SignInEmailHandler {
    /// 对诱饵哈希做一次完整校验后拒绝
    async fn reject_after_decoy(&self, password: &str) -> ApplicationError {
        if let Err(e) = self.hasher.verify(password, DECOY_PASSWORD_HASH).await {
            tracing::warn!(error = %e, "Decoy password verification failed");
        }
        ApplicationError::unauthorized(INVALID_CREDENTIALS)
    }
}

// ============================================================================
// SignOut
// ============================================================================

/// SignOut Handler
pub struct SignOutHandler {
    session_repo: Arc<dyn SessionRepositoryPort>,
}

impl SignOutHandler {
    pub fn new(session_repo: Arc<dyn SessionRepositoryPort>) -> Self {
        Self { session_repo }
    }

    /// 幂等：token 不存在也视为成功
    pub async fn handle(&self, command: SignOut) -> Result<(), ApplicationError> {
        self.session_repo.delete_by_token(&command.token).await?;
        tracing::info!("Session signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{HashError, RepositoryError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// 记录每次校验用到的哈希，不做真实计算
    #[derive(Default)]
    struct CountingHasher {
        verified: Mutex<Vec<String>>,
        hashes: AtomicUsize,
    }

    #[async_trait]
    impl PasswordHasherPort for CountingHasher {
        async fn hash(&self, password: &str) -> Result<String, HashError> {
            self.hashes.fetch_add(1, Ordering::SeqCst);
            Ok(format!("plain:{}", password))
        }

        async fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError> {
            self.verified.lock().unwrap().push(hash.to_string());
            Ok(hash == format!("plain:{}", password))
        }
    }

    #[derive(Default)]
    struct MemoryUsers {
        users: Mutex<Vec<(UserRecord, CredentialRecord)>>,
    }

    #[async_trait]
    impl UserRepositoryPort for MemoryUsers {
        async fn create(
            &self,
            user: &UserRecord,
            credential: &CredentialRecord,
        ) -> Result<(), RepositoryError> {
            self.users
                .lock()
                .unwrap()
                .push((user.clone(), credential.clone()));
            Ok(())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepositoryError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|(u, _)| u.id == id)
                .map(|(u, _)| u.clone()))
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|(u, _)| u.email == email)
                .map(|(u, _)| u.clone()))
        }

        async fn find_credential(
            &self,
            user_id: Uuid,
        ) -> Result<Option<CredentialRecord>, RepositoryError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|(u, _)| u.id == user_id)
                .map(|(_, c)| c.clone()))
        }
    }

    #[derive(Default)]
    struct MemorySessions {
        saved: Mutex<Vec<SessionRecord>>,
    }

    #[async_trait]
    impl SessionRepositoryPort for MemorySessions {
        async fn save(&self, session: &SessionRecord) -> Result<(), RepositoryError> {
            self.saved.lock().unwrap().push(session.clone());
            Ok(())
        }

        async fn find_by_token(
            &self,
            token: &str,
        ) -> Result<Option<SessionRecord>, RepositoryError> {
            Ok(self
                .saved
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.token == token)
                .cloned())
        }

        async fn delete_by_token(&self, token: &str) -> Result<(), RepositoryError> {
            self.saved.lock().unwrap().retain(|s| s.token != token);
            Ok(())
        }

        async fn delete_expired(&self, _now: DateTime<Utc>) -> Result<u64, RepositoryError> {
            Ok(0)
        }
    }

    struct Fixture {
        hasher: Arc<CountingHasher>,
        sessions: Arc<MemorySessions>,
        sign_up: SignUpEmailHandler,
        sign_in: SignInEmailHandler,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(MemoryUsers::default());
        let sessions = Arc::new(MemorySessions::default());
        let hasher = Arc::new(CountingHasher::default());
        let issuer = SessionIssuer::new(sessions.clone(), Duration::days(7));

        Fixture {
            sign_up: SignUpEmailHandler::new(users.clone(), hasher.clone(), issuer.clone()),
            sign_in: SignInEmailHandler::new(users, hasher.clone(), issuer),
            hasher,
            sessions,
        }
    }

    fn sign_in(email: &str, password: &str) -> SignInEmail {
        SignInEmail {
            email: email.to_string(),
            password: password.to_string(),
            client: ClientInfo::default(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_hashes_and_issues_session() {
        let fx = fixture();
        let auth = fx
            .sign_up
            .handle(SignUpEmail {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "hunter2hunter2".to_string(),
                client: ClientInfo::default(),
            })
            .await
            .unwrap();

        assert_eq!(fx.hasher.hashes.load(Ordering::SeqCst), 1);
        assert_eq!(fx.sessions.saved.lock().unwrap()[0].token, auth.token);
    }

    #[tokio::test]
    async fn test_unknown_email_still_verifies_decoy() {
        let fx = fixture();

        let result = fx.sign_in.handle(sign_in("ghost@example.com", "whatever1")).await;

        match result {
            Err(ApplicationError::Unauthorized(msg)) => assert_eq!(msg, INVALID_CREDENTIALS),
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(
            *fx.hasher.verified.lock().unwrap(),
            vec![DECOY_PASSWORD_HASH.to_string()]
        );
        assert!(fx.sessions.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_match() {
        let fx = fixture();
        fx.sign_up
            .handle(SignUpEmail {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "hunter2hunter2".to_string(),
                client: ClientInfo::default(),
            })
            .await
            .unwrap();

        let wrong = fx.sign_in.handle(sign_in("ada@example.com", "nope-nope")).await;
        let unknown = fx.sign_in.handle(sign_in("bob@example.com", "nope-nope")).await;

        assert_eq!(
            wrong.unwrap_err().to_string(),
            unknown.unwrap_err().to_string()
        );
        assert_eq!(fx.hasher.verified.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_session_token_shape() {
        let a = generate_session_token();
        let b = generate_session_token();

        // 32 字节 -> 43 个 base64 字符（无填充）
        assert_eq!(a.len(), 43);
        assert_ne!(a, b);
        assert!(a
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
