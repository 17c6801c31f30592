//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 预置音色（Perzona Library）定义
//! - 进程级只读音色目录
//! - 音色查找

mod catalog;
mod errors;
mod value_objects;

pub use catalog::{builtin_voices, install_library, library, VoiceCatalog};
pub use errors::VoiceError;
pub use value_objects::Voice;
