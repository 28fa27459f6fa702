//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{
    account::Account, one_time_code::OneTimeCode, revoked_token::RevokedToken,
};
use crate::domain::value_object::{account_id::AccountId, code_purpose::CodePurpose, email::Email};
use crate::error::AuthResult;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Create a new account
    async fn create(&self, account: &Account) -> AuthResult<()>;

    /// Find an active (not soft-deleted) account by ID
    async fn find_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>>;

    /// Find an active account by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>>;

    /// Find a soft-deleted account by ID (for restore)
    async fn find_deleted_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>>;

    /// Check if an email is taken by an active account
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Persist changed fields (status, role, password hash, delete marks)
    async fn update(&self, account: &Account) -> AuthResult<()>;

    /// List all active accounts
    async fn list_active(&self) -> AuthResult<Vec<Account>>;

    /// Check if any active admin account exists (bootstrap guard)
    async fn exists_admin(&self) -> AuthResult<bool>;
}

/// One-time code repository trait
#[trait_variant::make(OneTimeCodeRepository: Send)]
pub trait LocalOneTimeCodeRepository {
    /// Insert or overwrite the code for (account, purpose)
    async fn upsert(&self, code: &OneTimeCode) -> AuthResult<()>;

    /// Find the stored code for (account, purpose), expired or not
    async fn find(
        &self,
        account_id: &AccountId,
        purpose: CodePurpose,
    ) -> AuthResult<Option<OneTimeCode>>;

    /// Delete the code for (account, purpose)
    async fn delete(&self, account_id: &AccountId, purpose: CodePurpose) -> AuthResult<()>;

    /// Delete all expired codes, returning the number removed
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}

/// Revoked token repository trait
#[trait_variant::make(RevokedTokenRepository: Send)]
pub trait LocalRevokedTokenRepository {
    /// Insert a denylist entry
    async fn insert(&self, entry: &RevokedToken) -> AuthResult<()>;

    /// Find a denylist entry by exact token string
    async fn find_by_token(&self, token: &str) -> AuthResult<Option<RevokedToken>>;

    /// Delete a denylist entry by exact token string
    async fn delete_by_token(&self, token: &str) -> AuthResult<()>;

    /// Delete all expired entries, returning the number removed
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
