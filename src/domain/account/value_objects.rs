//! Account Context - Value Objects

use std::fmt;

use super::AccountError;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// 邮箱（去首尾空白并转小写）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, AccountError> {
        let email = raw.trim().to_lowercase();

        let Some((local, domain)) = email.split_once('@') else {
            return Err(AccountError::InvalidEmail(raw.to_string()));
        };
        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || email.chars().any(char::is_whitespace)
        {
            return Err(AccountError::InvalidEmail(raw.to_string()));
        }

        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 明文密码（只在内存中短暂存在，Debug 不输出内容）
#[derive(Clone)]
pub struct Password(String);

impl Password {
    pub fn parse(raw: impl Into<String>) -> Result<Self, AccountError> {
        let raw = raw.into();
        let len = raw.chars().count();
        if len < MIN_PASSWORD_LENGTH {
            return Err(AccountError::PasswordTooShort(MIN_PASSWORD_LENGTH));
        }
        if len > MAX_PASSWORD_LENGTH {
            return Err(AccountError::PasswordTooLong(MAX_PASSWORD_LENGTH));
        }
        Ok(Self(raw))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// 用户显示名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    pub fn parse(raw: &str) -> Result<Self, AccountError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(AccountError::InvalidName("用户名不能为空".to_string()));
        }
        if name.chars().count() > 100 {
            return Err(AccountError::InvalidName(
                "用户名长度不能超过100字符".to_string(),
            ));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        let email = Email::parse("  Ada@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_email_rejects_malformed() {
        for raw in ["", "ada", "@example.com", "ada@", "a@b@c", "a da@example.com"] {
            assert!(Email::parse(raw).is_err(), "accepted {:?}", raw);
        }
    }

    #[test]
    fn test_password_length_bounds() {
        assert_eq!(
            Password::parse("short").unwrap_err(),
            AccountError::PasswordTooShort(8)
        );
        assert!(Password::parse("12345678").is_ok());
        assert_eq!(
            Password::parse("x".repeat(129)).unwrap_err(),
            AccountError::PasswordTooLong(128)
        );
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::parse("correct horse").unwrap();
        assert_eq!(format!("{:?}", password), "Password(***)");
    }

    #[test]
    fn test_user_name_trimmed() {
        assert_eq!(UserName::parse("  Ada ").unwrap().as_str(), "Ada");
        assert!(UserName::parse("   ").is_err());
    }
}
