//! Logout Use Case
//!
//! Revokes the presented access token for the rest of its lifetime.

use std::sync::Arc;

use crate::application::blacklist::BlacklistService;
use crate::application::token::TokenSigner;
use crate::domain::repository::RevokedTokenRepository;
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<R>
where
    R: RevokedTokenRepository,
{
    blacklist: BlacklistService<R>,
    signer: Arc<TokenSigner>,
}

impl<R> LogoutUseCase<R>
where
    R: RevokedTokenRepository,
{
    pub fn new(token_repo: Arc<R>, signer: Arc<TokenSigner>) -> Self {
        Self {
            blacklist: BlacklistService::new(token_repo),
            signer,
        }
    }

    /// Revoke the exact token string presented on the request
    pub async fn execute(&self, token: &str) -> AuthResult<String> {
        let claims = self.signer.verify_session(token)?;
        self.blacklist.record(token, claims.remaining_ttl()).await?;

        tracing::info!(account_id = %claims.sub, "Logged out");

        Ok("Logged out successfully".to_string())
    }
}
