//! Domain Layer - 领域层
//!
//! 包含四个限界上下文:
//! - Account Context: 账号（邮箱 / 密码）
//! - Voice Context: 预置音色与音色目录
//! - Playback Context: 单音源试听播放
//! - Chooser Context: "Choose Voice" 弹窗视图模型

pub mod account;
pub mod chooser;
pub mod playback;
pub mod voice;
