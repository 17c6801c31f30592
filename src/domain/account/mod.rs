//! Account Context - 账号限界上下文
//!
//! 职责:
//! - 邮箱 / 密码 / 显示名的校验与规范化

mod errors;
mod value_objects;

pub use errors::AccountError;
pub use value_objects::{Email, Password, UserName, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
