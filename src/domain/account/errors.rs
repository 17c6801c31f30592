//! Account Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("无效的邮箱: {0}")]
    InvalidEmail(String),

    #[error("密码太短，至少 {0} 个字符")]
    PasswordTooShort(usize),

    #[error("密码太长，最多 {0} 个字符")]
    PasswordTooLong(usize),

    #[error("无效的用户名: {0}")]
    InvalidName(String),
}
