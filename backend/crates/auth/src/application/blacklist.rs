//! Token Blacklist Service
//!
//! Denylist of tokens revoked before their natural expiry (logout).
//! Entries carry the token's own expiry; a lookup that hits a stale
//! entry deletes it on the spot, so the table is self-cleaning and an
//! entry never outlives the token it denies.

use std::sync::Arc;

use chrono::Duration;

use crate::domain::entity::revoked_token::RevokedToken;
use crate::domain::repository::RevokedTokenRepository;
use crate::error::AuthResult;

/// Token blacklist service
pub struct BlacklistService<R>
where
    R: RevokedTokenRepository,
{
    token_repo: Arc<R>,
}

impl<R> BlacklistService<R>
where
    R: RevokedTokenRepository,
{
    pub fn new(token_repo: Arc<R>) -> Self {
        Self { token_repo }
    }

    /// Record a revoked token for the remainder of its lifetime
    ///
    /// A token with no remaining lifetime is already rejected by expiry
    /// checks, so nothing is stored for it.
    pub async fn record(&self, token: &str, remaining_ttl: Duration) -> AuthResult<()> {
        if remaining_ttl <= Duration::zero() {
            return Ok(());
        }

        let entry = RevokedToken::new(token.to_string(), remaining_ttl);
        self.token_repo.insert(&entry).await?;

        tracing::info!(expires_at = %entry.expires_at, "Token revoked");
        Ok(())
    }

    /// Check whether a token has been revoked
    pub async fn is_revoked(&self, token: &str) -> AuthResult<bool> {
        match self.token_repo.find_by_token(token).await? {
            None => Ok(false),
            Some(entry) if entry.is_expired() => {
                // Stale entry, the token itself is already dead
                self.token_repo.delete_by_token(token).await?;
                Ok(false)
            }
            Some(_) => Ok(true),
        }
    }
}
