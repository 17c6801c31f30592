//! HTTP Handlers

mod auth;
mod ping;
mod speech;
mod storage;
mod voice;

pub use auth::*;
pub use ping::*;
pub use speech::*;
pub use storage::*;
pub use voice::*;
