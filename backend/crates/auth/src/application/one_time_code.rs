//! One-Time Code Service
//!
//! Issues and validates the 6-digit codes used for account
//! verification and password reset authorization. Codes are stored
//! hashed with Argon2, the same primitive used for passwords, so the
//! comparison is constant time and a database leak exposes no codes.

use std::sync::Arc;

use chrono::Duration;
use platform::password::HashedPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::one_time_code::OneTimeCode;
use crate::domain::repository::OneTimeCodeRepository;
use crate::domain::value_object::{account_id::AccountId, code_purpose::CodePurpose};
use crate::error::{AuthError, AuthResult};

/// One-time code service
pub struct CodeService<C>
where
    C: OneTimeCodeRepository,
{
    code_repo: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<C> CodeService<C>
where
    C: OneTimeCodeRepository,
{
    pub fn new(code_repo: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self { code_repo, config }
    }

    /// Issue a fresh code for (account, purpose)
    ///
    /// Overwrites any previous code for the same pair. Returns the
    /// plain code for delivery by email; only its hash is stored.
    pub async fn issue(&self, account_id: &AccountId, purpose: CodePurpose) -> AuthResult<String> {
        let plain = platform::crypto::random_numeric_code();
        let code_hash = HashedPassword::hash_bytes(plain.as_bytes())?;

        let ttl = Duration::seconds(self.config.code_ttl.as_secs() as i64);
        let code = OneTimeCode::new(*account_id, code_hash, purpose, ttl);
        self.code_repo.upsert(&code).await?;

        tracing::info!(
            account_id = %account_id,
            purpose = %purpose,
            "One-time code issued"
        );

        Ok(plain)
    }

    /// Validate a submitted code and consume it
    ///
    /// Expiry is checked before the hash comparison, so an expired code
    /// reports as expired even when the digits match. A code that
    /// validates is deleted and cannot be used twice.
    pub async fn validate(
        &self,
        account_id: &AccountId,
        purpose: CodePurpose,
        submitted: &str,
    ) -> AuthResult<()> {
        let code = self
            .code_repo
            .find(account_id, purpose)
            .await?
            .ok_or(AuthError::CodeExpiredOrMissing)?;

        if code.is_expired() {
            self.code_repo.delete(account_id, purpose).await?;
            return Err(AuthError::CodeExpiredOrMissing);
        }

        if !code.code_hash.verify_bytes(submitted.as_bytes()) {
            return Err(AuthError::CodeMismatch);
        }

        // Consume on success
        self.code_repo.delete(account_id, purpose).await?;

        tracing::info!(
            account_id = %account_id,
            purpose = %purpose,
            "One-time code validated"
        );

        Ok(())
    }
}
