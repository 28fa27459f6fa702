//! Register Use Case
//!
//! Creates an unverified account and mails a verification code.

use std::sync::Arc;

use platform::mailer::MailSender;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::mail;
use crate::application::one_time_code::CodeService;
use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountRepository, OneTimeCodeRepository};
use crate::domain::value_object::{
    account_id::AccountId, code_purpose::CodePurpose, email::Email,
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub account_id: AccountId,
    pub message: String,
}

/// Register use case
pub struct RegisterUseCase<A, C, M>
where
    A: AccountRepository,
    C: OneTimeCodeRepository,
    M: MailSender,
{
    account_repo: Arc<A>,
    codes: CodeService<C>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<A, C, M> RegisterUseCase<A, C, M>
where
    A: AccountRepository,
    C: OneTimeCodeRepository,
    M: MailSender,
{
    pub fn new(
        account_repo: Arc<A>,
        code_repo: Arc<C>,
        mailer: Arc<M>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            account_repo,
            codes: CodeService::new(code_repo, config.clone()),
            mailer,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let email = Email::new(input.email)?;

        if self.account_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password = ClearTextPassword::new(input.password)?;
        let password_hash = password.hash(self.config.pepper())?;

        let account = Account::new(email.clone(), password_hash);
        self.account_repo.create(&account).await?;

        let code = self
            .codes
            .issue(&account.account_id, CodePurpose::VerifyAccount)
            .await?;

        self.mailer
            .send(
                &[email.to_string()],
                mail::VERIFICATION_SUBJECT,
                &mail::verification_body(&code),
            )
            .await?;

        tracing::info!(
            account_id = %account.account_id,
            email = %email,
            "Account registered"
        );

        Ok(RegisterOutput {
            account_id: account.account_id,
            message: "User created successfully and OTP sent to email.".to_string(),
        })
    }
}
