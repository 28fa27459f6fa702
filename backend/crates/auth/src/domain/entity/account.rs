//! Account Entity
//!
//! Core account entity carrying credentials and lifecycle state.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{
    account_id::AccountId, account_role::AccountRole, account_status::AccountStatus, email::Email,
};

/// Account entity
///
/// Soft deletion is modeled with `deleted_at`: a deleted account keeps
/// its row and can be restored by an admin.
#[derive(Debug, Clone)]
pub struct Account {
    /// Internal UUID identifier
    pub account_id: AccountId,
    /// Email address (unique, used for login)
    pub email: Email,
    /// Argon2id password hash (PHC string)
    pub password_hash: HashedPassword,
    /// Verification status (Unverified, Verified)
    pub status: AccountStatus,
    /// Role (User, Admin)
    pub role: AccountRole,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp, None while the account is active
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Create a new unverified account
    pub fn new(email: Email, password_hash: HashedPassword) -> Self {
        let now = Utc::now();

        Self {
            account_id: AccountId::new(),
            email,
            password_hash,
            status: AccountStatus::default(),
            role: AccountRole::default(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Flip the account to verified after a successful code check
    pub fn mark_verified(&mut self) {
        self.status = AccountStatus::Verified;
        self.updated_at = Utc::now();
    }

    /// Check if a password-only login is allowed
    pub fn can_login(&self) -> bool {
        self.status.can_login() && !self.is_deleted()
    }

    /// Update account role
    pub fn set_role(&mut self, role: AccountRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    /// Replace the stored password hash
    pub fn set_password_hash(&mut self, password_hash: HashedPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Check if the account is soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Mark the account as soft-deleted
    pub fn mark_deleted(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    /// Clear the soft-delete mark
    pub fn mark_restored(&mut self) {
        self.deleted_at = None;
        self.updated_at = Utc::now();
    }
}
