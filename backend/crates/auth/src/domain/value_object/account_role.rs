use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum AccountRole {
    #[default]
    User = 0,
    Admin = 1,
}

impl AccountRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            AccountRole::User => "user",
            AccountRole::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, AccountRole::Admin)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(AccountRole::User),
            1 => Some(AccountRole::Admin),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "user" => Some(AccountRole::User),
            "admin" => Some(AccountRole::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_id() {
        assert_eq!(AccountRole::from_id(0), Some(AccountRole::User));
        assert_eq!(AccountRole::from_id(1), Some(AccountRole::Admin));
        assert_eq!(AccountRole::from_id(9), None);
    }

    #[test]
    fn test_role_from_code() {
        assert_eq!(AccountRole::from_code("user"), Some(AccountRole::User));
        assert_eq!(AccountRole::from_code("admin"), Some(AccountRole::Admin));
        assert_eq!(AccountRole::from_code("root"), None);
    }

    #[test]
    fn test_role_checks() {
        assert!(!AccountRole::User.is_admin());
        assert!(AccountRole::Admin.is_admin());
        assert_eq!(AccountRole::default(), AccountRole::User);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(AccountRole::User.to_string(), "user");
        assert_eq!(AccountRole::Admin.to_string(), "admin");
    }
}
