//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    account::Account, one_time_code::OneTimeCode, revoked_token::RevokedToken,
};
use crate::domain::repository::{AccountRepository, OneTimeCodeRepository, RevokedTokenRepository};
use crate::domain::value_object::{
    account_id::AccountId, account_role::AccountRole, account_status::AccountStatus,
    code_purpose::CodePurpose, email::Email,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Bulk-delete expired one-time codes and revoked-token entries
    ///
    /// Run at startup; the lazy per-lookup cleanup handles the rest.
    pub async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now = Utc::now();

        let codes = sqlx::query("DELETE FROM one_time_codes WHERE expires_at < $1")
            .bind(now)
            .execute(&self.pool)
            .await?
            .rows_affected();

        let tokens = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < $1")
            .bind(now)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(
            codes_deleted = codes,
            tokens_deleted = tokens,
            "Cleaned up expired rows"
        );

        Ok(codes + tokens)
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgAuthRepository {
    async fn create(&self, account: &Account) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                email,
                password_hash,
                account_status,
                account_role,
                created_at,
                updated_at,
                deleted_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.email.as_str())
        .bind(account.password_hash.as_phc_string())
        .bind(account.status.id())
        .bind(account.role.id())
        .bind(account.created_at)
        .bind(account.updated_at)
        .bind(account.deleted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                password_hash,
                account_status,
                account_role,
                created_at,
                updated_at,
                deleted_at
            FROM accounts
            WHERE account_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                password_hash,
                account_status,
                account_role,
                created_at,
                updated_at,
                deleted_at
            FROM accounts
            WHERE email = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_deleted_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                password_hash,
                account_status,
                account_role,
                created_at,
                updated_at,
                deleted_at
            FROM accounts
            WHERE account_id = $1 AND deleted_at IS NOT NULL
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1 AND deleted_at IS NULL)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, account: &Account) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE accounts SET
                password_hash = $2,
                account_status = $3,
                account_role = $4,
                updated_at = $5,
                deleted_at = $6
            WHERE account_id = $1
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.password_hash.as_phc_string())
        .bind(account.status.id())
        .bind(account.role.id())
        .bind(account.updated_at)
        .bind(account.deleted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_active(&self) -> AuthResult<Vec<Account>> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                password_hash,
                account_status,
                account_role,
                created_at,
                updated_at,
                deleted_at
            FROM accounts
            WHERE deleted_at IS NULL
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_account()).collect()
    }

    async fn exists_admin(&self) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE account_role = $1 AND deleted_at IS NULL)",
        )
        .bind(AccountRole::Admin.id())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

// ============================================================================
// One-Time Code Repository Implementation
// ============================================================================

impl OneTimeCodeRepository for PgAuthRepository {
    async fn upsert(&self, code: &OneTimeCode) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO one_time_codes (
                account_id,
                code_hash,
                purpose,
                created_at,
                expires_at
            ) VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (account_id, purpose) DO UPDATE SET
                code_hash = EXCLUDED.code_hash,
                created_at = EXCLUDED.created_at,
                expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(code.account_id.as_uuid())
        .bind(code.code_hash.as_phc_string())
        .bind(code.purpose.id())
        .bind(code.created_at)
        .bind(code.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(
        &self,
        account_id: &AccountId,
        purpose: CodePurpose,
    ) -> AuthResult<Option<OneTimeCode>> {
        let row = sqlx::query_as::<_, OneTimeCodeRow>(
            r#"
            SELECT
                account_id,
                code_hash,
                purpose,
                created_at,
                expires_at
            FROM one_time_codes
            WHERE account_id = $1 AND purpose = $2
            "#,
        )
        .bind(account_id.as_uuid())
        .bind(purpose.id())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_code()).transpose()
    }

    async fn delete(&self, account_id: &AccountId, purpose: CodePurpose) -> AuthResult<()> {
        sqlx::query("DELETE FROM one_time_codes WHERE account_id = $1 AND purpose = $2")
            .bind(account_id.as_uuid())
            .bind(purpose.id())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM one_time_codes WHERE expires_at < $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Revoked Token Repository Implementation
// ============================================================================

impl RevokedTokenRepository for PgAuthRepository {
    async fn insert(&self, entry: &RevokedToken) -> AuthResult<()> {
        // Revoking an already revoked token is a no-op
        sqlx::query(
            r#"
            INSERT INTO revoked_tokens (token, created_at, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (token) DO NOTHING
            "#,
        )
        .bind(&entry.token)
        .bind(entry.created_at)
        .bind(entry.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> AuthResult<Option<RevokedToken>> {
        let row = sqlx::query_as::<_, RevokedTokenRow>(
            r#"
            SELECT token, created_at, expires_at
            FROM revoked_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_entry()))
    }

    async fn delete_by_token(&self, token: &str) -> AuthResult<()> {
        sqlx::query("DELETE FROM revoked_tokens WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    email: String,
    password_hash: String,
    account_status: i16,
    account_role: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl AccountRow {
    fn into_account(self) -> AuthResult<Account> {
        let password_hash = HashedPassword::from_phc_string(&self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Account {
            account_id: AccountId::from_uuid(self.account_id),
            email: Email::from_db(self.email),
            password_hash,
            status: AccountStatus::from_id(self.account_status).unwrap_or_default(),
            role: AccountRole::from_id(self.account_role).unwrap_or_default(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct OneTimeCodeRow {
    account_id: Uuid,
    code_hash: String,
    purpose: i16,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl OneTimeCodeRow {
    fn into_code(self) -> AuthResult<OneTimeCode> {
        let code_hash = HashedPassword::from_phc_string(&self.code_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid code hash: {}", e)))?;

        let purpose = CodePurpose::from_id(self.purpose)
            .ok_or_else(|| AuthError::Internal(format!("Invalid code purpose: {}", self.purpose)))?;

        Ok(OneTimeCode {
            account_id: AccountId::from_uuid(self.account_id),
            code_hash,
            purpose,
            created_at: self.created_at,
            expires_at: self.expires_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RevokedTokenRow {
    token: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl RevokedTokenRow {
    fn into_entry(self) -> RevokedToken {
        RevokedToken {
            token: self.token,
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}
