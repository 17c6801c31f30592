//! Perzona - 声音克隆服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice: 预置音色与进程级音色目录
//! - Playback: 单一音源试听状态
//! - Chooser: Choose Voice 弹窗与音色卡片（无渲染的视图模型）
//! - Account: 邮箱 / 密码 / 用户名值对象
//!
//! 应用层 (application/):
//! - Ports: UrlSigner, Repositories, PasswordHasher, SpeechService
//! - Commands: 注册、登录、登出、语音生成、视频生成、文件导入
//! - Queries: 音色目录、预签名地址、当前会话
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Persistence: SQLite 用户与会话存储
//! - Adapters: S3 预签名、Argon2 密码哈希、语音服务 HTTP 客户端

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
