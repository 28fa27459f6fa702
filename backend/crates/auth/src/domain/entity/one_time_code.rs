//! One-Time Code Entity
//!
//! A short-lived numeric code issued for account verification or a
//! password reset. Only the Argon2 hash of the code is stored; the
//! plain code travels by email and is never persisted.

use chrono::{DateTime, Duration, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{account_id::AccountId, code_purpose::CodePurpose};

/// One-time code entity
///
/// At most one row exists per (account, purpose); issuing a new code
/// overwrites the previous one. A code that validates successfully is
/// deleted, so it can never be replayed.
#[derive(Debug, Clone)]
pub struct OneTimeCode {
    /// Owning account
    pub account_id: AccountId,
    /// Argon2 hash of the numeric code (PHC string)
    pub code_hash: HashedPassword,
    /// What the code was issued for
    pub purpose: CodePurpose,
    /// Issued timestamp
    pub created_at: DateTime<Utc>,
    /// Hard expiry, checked before the hash comparison
    pub expires_at: DateTime<Utc>,
}

impl OneTimeCode {
    /// Create a new code record
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(
        account_id: AccountId,
        code_hash: HashedPassword,
        purpose: CodePurpose,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            account_id,
            code_hash,
            purpose,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Check if the code has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_hash() -> HashedPassword {
        HashedPassword::hash_bytes(b"483920").unwrap()
    }

    #[test]
    fn test_fresh_code_not_expired() {
        let code = OneTimeCode::new(
            AccountId::new(),
            code_hash(),
            CodePurpose::VerifyAccount,
            Duration::minutes(5),
        );
        assert!(!code.is_expired());
    }

    #[test]
    fn test_past_expiry_detected() {
        let mut code = OneTimeCode::new(
            AccountId::new(),
            code_hash(),
            CodePurpose::ResetPassword,
            Duration::minutes(5),
        );
        code.expires_at = Utc::now() - Duration::seconds(1);
        assert!(code.is_expired());
    }
}
