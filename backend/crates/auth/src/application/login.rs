//! Login Use Case
//!
//! Authenticates an account and issues an access token. An unverified
//! account may supply its one-time code alongside the credentials; the
//! code is validated inline and the account flips to verified before
//! the token is issued.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::one_time_code::CodeService;
use crate::application::token::TokenSigner;
use crate::domain::repository::{AccountRepository, OneTimeCodeRepository};
use crate::domain::value_object::{
    account_id::AccountId, code_purpose::CodePurpose, email::Email,
};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
    /// One-time code, only meaningful for unverified accounts
    pub code: Option<String>,
}

/// Login outcome
#[derive(Debug)]
pub enum LoginOutcome {
    /// Credentials are valid but the account is unverified and no code
    /// was supplied. No token is issued.
    OtpRequired { message: String },
    /// Authenticated
    Success {
        access_token: String,
        account_id: AccountId,
        email: String,
    },
}

/// Login use case
pub struct LoginUseCase<A, C>
where
    A: AccountRepository,
    C: OneTimeCodeRepository,
{
    account_repo: Arc<A>,
    codes: CodeService<C>,
    signer: Arc<TokenSigner>,
    config: Arc<AuthConfig>,
}

impl<A, C> LoginUseCase<A, C>
where
    A: AccountRepository,
    C: OneTimeCodeRepository,
{
    pub fn new(
        account_repo: Arc<A>,
        code_repo: Arc<C>,
        signer: Arc<TokenSigner>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            account_repo,
            codes: CodeService::new(code_repo, config.clone()),
            signer,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutcome> {
        // An unparsable email can never match an account
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let mut account = self
            .account_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // A password that fails policy can never match a stored hash
        let password = platform::password::ClearTextPassword::new(input.password)
            .map_err(|_| AuthError::InvalidCredentials)?;

        if !account.password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        if !account.status.can_login() {
            match &input.code {
                None => {
                    return Ok(LoginOutcome::OtpRequired {
                        message: "Account is not verified. Submit the OTP sent to your email, \
                                  or request a new one."
                            .to_string(),
                    });
                }
                Some(code) => {
                    self.codes
                        .validate(&account.account_id, CodePurpose::VerifyAccount, code)
                        .await?;

                    account.mark_verified();
                    self.account_repo.update(&account).await?;
                }
            }
        }

        let access_token = self
            .signer
            .issue_session(&account.account_id, &account.email)?;

        tracing::info!(
            account_id = %account.account_id,
            email = %account.email,
            "Login succeeded"
        );

        Ok(LoginOutcome::Success {
            access_token,
            account_id: account.account_id,
            email: account.email.to_string(),
        })
    }
}
