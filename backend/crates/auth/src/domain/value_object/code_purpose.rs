//! Code Purpose Value Object
//!
//! Distinguishes what a one-time code was issued for. At most one live
//! code exists per (account, purpose); reissuing overwrites it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Purpose of an issued one-time code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i16)]
pub enum CodePurpose {
    /// Prove email ownership and flip the account to verified
    VerifyAccount = 0,

    /// Authorize a password reset
    ResetPassword = 1,
}

impl CodePurpose {
    /// Get numeric ID for database storage
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    /// Get string code for serialization/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::VerifyAccount => "verify_account",
            Self::ResetPassword => "reset_password",
        }
    }

    /// Create from numeric ID
    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::VerifyAccount),
            1 => Some(Self::ResetPassword),
            _ => None,
        }
    }

    /// Create from string code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "verify_account" => Some(Self::VerifyAccount),
            "reset_password" => Some(Self::ResetPassword),
            _ => None,
        }
    }
}

impl fmt::Display for CodePurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id() {
        assert_eq!(CodePurpose::from_id(0), Some(CodePurpose::VerifyAccount));
        assert_eq!(CodePurpose::from_id(1), Some(CodePurpose::ResetPassword));
        assert_eq!(CodePurpose::from_id(7), None);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(
            CodePurpose::from_code("verify_account"),
            Some(CodePurpose::VerifyAccount)
        );
        assert_eq!(
            CodePurpose::from_code("reset_password"),
            Some(CodePurpose::ResetPassword)
        );
        assert_eq!(CodePurpose::from_code("other"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(CodePurpose::VerifyAccount.to_string(), "verify_account");
        assert_eq!(CodePurpose::ResetPassword.to_string(), "reset_password");
    }
}
