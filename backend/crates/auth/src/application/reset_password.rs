//! Reset Password Use Case
//!
//! Verifies a reset token and stores the new password hash.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::token::TokenSigner;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};

/// Reset password use case
pub struct ResetPasswordUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
    signer: Arc<TokenSigner>,
    config: Arc<AuthConfig>,
}

impl<A> ResetPasswordUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>, signer: Arc<TokenSigner>, config: Arc<AuthConfig>) -> Self {
        Self {
            account_repo,
            signer,
            config,
        }
    }

    pub async fn execute(&self, token: &str, new_password: String) -> AuthResult<String> {
        let claims = self.signer.verify_reset(token)?;
        let account_id = claims.account_id()?;

        // The account may have been deleted since the link was mailed
        let mut account = self
            .account_repo
            .find_by_id(&account_id)
            .await?
            .ok_or(AuthError::ResetTokenInvalid)?;

        let password = ClearTextPassword::new(new_password)?;
        let password_hash = password.hash(self.config.pepper())?;

        account.set_password_hash(password_hash);
        self.account_repo.update(&account).await?;

        tracing::info!(account_id = %account.account_id, "Password reset");

        Ok("Password reset successfully".to_string())
    }
}
