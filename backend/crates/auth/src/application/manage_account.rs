//! Account Management Use Case
//!
//! Profile lookup plus the admin-guarded operations: listing, soft
//! delete, restore, role changes, and the one-off admin bootstrap.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_id::AccountId, account_role::AccountRole, account_status::AccountStatus, email::Email,
};
use crate::error::{AuthError, AuthResult};

/// Account management use case
pub struct ManageAccountUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<A> ManageAccountUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self {
            account_repo,
            config,
        }
    }

    /// Fetch an active account by ID
    pub async fn profile(&self, account_id: &AccountId) -> AuthResult<Account> {
        self.account_repo
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)
    }

    /// List all active accounts
    pub async fn list_accounts(&self) -> AuthResult<Vec<Account>> {
        self.account_repo.list_active().await
    }

    /// Soft-delete an account; its row survives and can be restored
    pub async fn soft_delete(&self, account_id: &AccountId) -> AuthResult<String> {
        let mut account = self.profile(account_id).await?;

        account.mark_deleted();
        self.account_repo.update(&account).await?;

        tracing::info!(account_id = %account_id, "Account soft-deleted");
        Ok("User deleted successfully".to_string())
    }

    /// Fetch a soft-deleted account by ID
    pub async fn get_deleted(&self, account_id: &AccountId) -> AuthResult<Account> {
        self.account_repo
            .find_deleted_by_id(account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)
    }

    /// Clear the soft-delete mark
    pub async fn restore(&self, account_id: &AccountId) -> AuthResult<String> {
        let mut account = self.get_deleted(account_id).await?;

        account.mark_restored();
        self.account_repo.update(&account).await?;

        tracing::info!(account_id = %account_id, "Account restored");
        Ok("User restored successfully".to_string())
    }

    /// Change an account's role, effective on the next guarded request
    pub async fn set_role(&self, account_id: &AccountId, role: AccountRole) -> AuthResult<String> {
        let mut account = self.profile(account_id).await?;

        account.set_role(role);
        self.account_repo.update(&account).await?;

        tracing::info!(account_id = %account_id, role = %role, "Account role updated");
        Ok(format!("User roles updated to {role}"))
    }

    /// Create the first admin account; refused once any admin exists
    pub async fn setup_admin(&self, email: String, password: String) -> AuthResult<String> {
        if self.account_repo.exists_admin().await? {
            return Err(AuthError::Validation(
                "An admin user already exists".to_string(),
            ));
        }

        let email = Email::new(email)?;
        if self.account_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = ClearTextPassword::new(password)?.hash(self.config.pepper())?;

        let mut account = Account::new(email.clone(), password_hash);
        account.status = AccountStatus::Verified;
        account.role = AccountRole::Admin;
        self.account_repo.create(&account).await?;

        tracing::info!(account_id = %account.account_id, "Admin account bootstrapped");
        Ok(format!("Admin user created with email {email}"))
    }
}
