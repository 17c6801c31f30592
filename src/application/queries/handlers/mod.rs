//! Query Handlers 实现

mod auth_handlers;
mod storage_handlers;
mod voice_handlers;

pub use auth_handlers::*;
pub use storage_handlers::*;
pub use voice_handlers::*;
