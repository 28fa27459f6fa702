//! Account Status Value Object
//!
//! Two states only: an account starts out `Unverified` and becomes
//! `Verified` once the owner proves the email address with a one-time
//! code. Soft deletion is tracked on the account entity itself
//! (`deleted_at`), not here, so a restored account keeps its status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account verification status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum AccountStatus {
    /// Freshly registered, email ownership not yet proven
    #[default]
    Unverified = 0,

    /// Email ownership proven via one-time code
    Verified = 1,
}

impl AccountStatus {
    /// Get numeric ID for database storage
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    /// Get string code for serialization/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unverified => "unverified",
            Self::Verified => "verified",
        }
    }

    /// Check whether a password-only login is allowed.
    ///
    /// Unverified accounts must complete the one-time code step first.
    #[inline]
    pub const fn can_login(&self) -> bool {
        matches!(self, Self::Verified)
    }

    /// Create from numeric ID
    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Unverified),
            1 => Some(Self::Verified),
            _ => None,
        }
    }

    /// Create from string code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "unverified" => Some(Self::Unverified),
            "verified" => Some(Self::Verified),
            _ => None,
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
