//! Auth Commands

/// 请求来源信息（写入会话记录）
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// 邮箱注册命令
#[derive(Debug, Clone)]
pub struct SignUpEmail {
    pub name: String,
    pub email: String,
    pub password: String,
    pub client: ClientInfo,
}

/// 邮箱登录命令
#[derive(Debug, Clone)]
pub struct SignInEmail {
    pub email: String,
    pub password: String,
    pub client: ClientInfo,
}

/// 登出命令
#[derive(Debug, Clone)]
pub struct SignOut {
    pub token: String,
}
