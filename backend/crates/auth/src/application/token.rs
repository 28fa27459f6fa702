//! Token Service
//!
//! Issues and verifies the two JWT kinds the system uses: HS256 access
//! tokens and password reset tokens. Each kind is signed with its own
//! secret, so one can never be presented where the other is expected.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::value_object::{account_id::AccountId, email::Email};
use crate::error::{AuthError, AuthResult};

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account UUID
    pub sub: String,
    /// Account email at issue time
    pub email: String,
    /// Issued-at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
}

impl SessionClaims {
    /// Parse the subject claim back into an account ID
    pub fn account_id(&self) -> AuthResult<AccountId> {
        AccountId::from_str(&self.sub).map_err(|_| AuthError::InvalidSignature)
    }

    /// Time left until the expiry claim, zero if already past
    pub fn remaining_ttl(&self) -> Duration {
        let secs = self.exp - Utc::now().timestamp();
        Duration::seconds(secs.max(0))
    }
}

/// Claims carried by a password reset token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetClaims {
    /// Account UUID
    pub sub: String,
    /// Account email at issue time
    pub email: String,
    /// Issued-at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
}

impl ResetClaims {
    /// Parse the subject claim back into an account ID
    pub fn account_id(&self) -> AuthResult<AccountId> {
        AccountId::from_str(&self.sub).map_err(|_| AuthError::ResetTokenInvalid)
    }
}

/// JWT signer/verifier for both token kinds
pub struct TokenSigner {
    session_encoding: EncodingKey,
    session_decoding: DecodingKey,
    reset_encoding: EncodingKey,
    reset_decoding: DecodingKey,
    config: Arc<AuthConfig>,
}

impl TokenSigner {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self {
            session_encoding: EncodingKey::from_secret(&config.session_secret),
            session_decoding: DecodingKey::from_secret(&config.session_secret),
            reset_encoding: EncodingKey::from_secret(&config.reset_secret),
            reset_decoding: DecodingKey::from_secret(&config.reset_secret),
            config,
        }
    }

    /// Expiry is enforced exactly, with no leeway
    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation
    }

    /// Issue an access token for an authenticated account
    pub fn issue_session(&self, account_id: &AccountId, email: &Email) -> AuthResult<String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: account_id.to_string(),
            email: email.to_string(),
            iat: now,
            exp: now + self.config.session_ttl_secs(),
        };

        encode(&Header::default(), &claims, &self.session_encoding)
            .map_err(|e| AuthError::Internal(format!("Failed to sign access token: {e}")))
    }

    /// Verify an access token and return its claims
    pub fn verify_session(&self, token: &str) -> AuthResult<SessionClaims> {
        decode::<SessionClaims>(token, &self.session_decoding, &Self::validation())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredCredential,
                _ => AuthError::InvalidSignature,
            })
    }

    /// Issue a password reset token
    pub fn issue_reset(&self, account_id: &AccountId, email: &Email) -> AuthResult<String> {
        let now = Utc::now().timestamp();
        let claims = ResetClaims {
            sub: account_id.to_string(),
            email: email.to_string(),
            iat: now,
            exp: now + self.config.reset_ttl_secs(),
        };

        encode(&Header::default(), &claims, &self.reset_encoding)
            .map_err(|e| AuthError::Internal(format!("Failed to sign reset token: {e}")))
    }

    /// Verify a password reset token and return its claims
    pub fn verify_reset(&self, token: &str) -> AuthResult<ResetClaims> {
        decode::<ResetClaims>(token, &self.reset_decoding, &Self::validation())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ResetTokenExpired,
                _ => AuthError::ResetTokenInvalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(Arc::new(AuthConfig::development()))
    }

    #[test]
    fn test_session_roundtrip() {
        let signer = signer();
        let account_id = AccountId::new();
        let email = Email::new("user@example.com").unwrap();

        let token = signer.issue_session(&account_id, &email).unwrap();
        let claims = signer.verify_session(&token).unwrap();

        assert_eq!(claims.account_id().unwrap(), account_id);
        assert_eq!(claims.email, "user@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signer_a = signer();
        let signer_b = signer();
        let token = signer_a
            .issue_session(&AccountId::new(), &Email::new("a@b.co").unwrap())
            .unwrap();

        assert!(matches!(
            signer_b.verify_session(&token),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_reset_token_not_valid_as_session() {
        let signer = signer();
        let account_id = AccountId::new();
        let email = Email::new("user@example.com").unwrap();

        let reset = signer.issue_reset(&account_id, &email).unwrap();
        assert!(matches!(
            signer.verify_session(&reset),
            Err(AuthError::InvalidSignature)
        ));

        let session = signer.issue_session(&account_id, &email).unwrap();
        assert!(matches!(
            signer.verify_reset(&session),
            Err(AuthError::ResetTokenInvalid)
        ));
    }

    #[test]
    fn test_expired_session_rejected() {
        let config = Arc::new(AuthConfig::development());
        let signer = TokenSigner::new(config.clone());

        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: AccountId::new().to_string(),
            email: "user@example.com".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(&config.session_secret),
        )
        .unwrap();

        assert!(matches!(
            signer.verify_session(&token),
            Err(AuthError::ExpiredCredential)
        ));
    }

    #[test]
    fn test_remaining_ttl_never_negative() {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: AccountId::new().to_string(),
            email: "user@example.com".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        assert_eq!(claims.remaining_ttl(), Duration::zero());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let signer = signer();
        assert!(matches!(
            signer.verify_session("not.a.jwt"),
            Err(AuthError::InvalidSignature)
        ));
    }
}
