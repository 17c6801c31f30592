//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作

mod auth_queries;
mod storage_queries;
mod voice_queries;

pub mod handlers;

pub use auth_queries::*;
pub use storage_queries::*;
pub use voice_queries::*;
