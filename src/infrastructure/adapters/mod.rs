//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod password;
pub mod speech;
pub mod storage;

pub use password::*;
pub use speech::*;
pub use storage::*;
