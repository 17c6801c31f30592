//! Persistence Layer - 数据持久化
//!
//! SQLite 存储实现（用户、凭证、登录会话）

pub mod sqlite;
