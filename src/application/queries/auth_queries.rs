//! Auth Queries

/// 根据 token 获取当前会话
#[derive(Debug, Clone)]
pub struct GetSession {
    pub token: String,
}
