//! Request Code Use Case
//!
//! Re-issues the verification code, or mails a password reset link.

use std::sync::Arc;

use platform::mailer::MailSender;

use crate::application::config::AuthConfig;
use crate::application::mail;
use crate::application::one_time_code::CodeService;
use crate::application::token::TokenSigner;
use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountRepository, OneTimeCodeRepository};
use crate::domain::value_object::{code_purpose::CodePurpose, email::Email};
use crate::error::{AuthError, AuthResult};

/// Request code use case
pub struct RequestCodeUseCase<A, C, M>
where
    A: AccountRepository,
    C: OneTimeCodeRepository,
    M: MailSender,
{
    account_repo: Arc<A>,
    codes: CodeService<C>,
    signer: Arc<TokenSigner>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<A, C, M> RequestCodeUseCase<A, C, M>
where
    A: AccountRepository,
    C: OneTimeCodeRepository,
    M: MailSender,
{
    pub fn new(
        account_repo: Arc<A>,
        code_repo: Arc<C>,
        signer: Arc<TokenSigner>,
        mailer: Arc<M>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            account_repo,
            codes: CodeService::new(code_repo, config.clone()),
            signer,
            mailer,
            config,
        }
    }

    async fn find_account(&self, email: &str) -> AuthResult<Account> {
        let email = Email::new(email)?;
        self.account_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::AccountNotFound)
    }

    /// Re-issue and mail the account verification code
    pub async fn request_verification(&self, email: &str) -> AuthResult<String> {
        let account = self.find_account(email).await?;

        let code = self
            .codes
            .issue(&account.account_id, CodePurpose::VerifyAccount)
            .await?;

        self.mailer
            .send(
                &[account.email.to_string()],
                mail::VERIFICATION_SUBJECT,
                &mail::verification_body(&code),
            )
            .await?;

        Ok("OTP sent successfully. Please check email".to_string())
    }

    /// Mail a password reset link carrying a self-verifying token
    pub async fn forgot_password(&self, email: &str) -> AuthResult<String> {
        let account = self.find_account(email).await?;

        let token = self
            .signer
            .issue_reset(&account.account_id, &account.email)?;
        let link = format!("{}?token={}", self.config.frontend_reset_url, token);

        self.mailer
            .send(
                &[account.email.to_string()],
                mail::RESET_SUBJECT,
                &mail::reset_body(&link),
            )
            .await?;

        tracing::info!(account_id = %account.account_id, "Password reset link sent");

        Ok("Password reset link has been sent. Please check your email.".to_string())
    }
}
