//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed input rejected before reaching core logic
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Account not found
    #[error("Account not found")]
    AccountNotFound,

    /// Email already registered
    #[error("Email already exists")]
    EmailTaken,

    /// Wrong email/password combination
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No bearer credential on the request, or a malformed header
    #[error("Missing or malformed bearer credential")]
    MissingCredential,

    /// Bearer credential past its expiry claim
    #[error("Credential has expired")]
    ExpiredCredential,

    /// Bearer credential signature did not verify
    #[error("Credential signature is invalid")]
    InvalidSignature,

    /// Bearer credential was revoked by logout
    #[error("Credential has been revoked")]
    RevokedCredential,

    /// No authenticated identity on the request
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Authenticated but the required role is missing
    #[error("Insufficient role for this operation")]
    InsufficientRole,

    /// Authenticated but not the owner of the resource
    #[error("Not allowed to access this resource")]
    NotResourceOwner,

    /// No live one-time code for the account
    #[error("OTP is expired or missing, request a new one")]
    CodeExpiredOrMissing,

    /// Submitted one-time code did not match the stored hash
    #[error("Invalid OTP provided. Please try again.")]
    CodeMismatch,

    /// Password reset token past its expiry
    #[error("Reset token has expired")]
    ResetTokenExpired,

    /// Password reset token failed verification
    #[error("Reset token is invalid")]
    ResetTokenInvalid,

    /// Outbound mail could not be delivered
    #[error("Email delivery failed: {0}")]
    EmailDeliveryFailed(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::AccountNotFound => StatusCode::NOT_FOUND,
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::InvalidCredentials
            | AuthError::MissingCredential
            | AuthError::ExpiredCredential
            | AuthError::InvalidSignature
            | AuthError::RevokedCredential
            | AuthError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientRole | AuthError::NotResourceOwner => StatusCode::FORBIDDEN,
            AuthError::CodeExpiredOrMissing | AuthError::CodeMismatch => StatusCode::BAD_REQUEST,
            AuthError::ResetTokenExpired | AuthError::ResetTokenInvalid => StatusCode::BAD_REQUEST,
            AuthError::EmailDeliveryFailed(_) => StatusCode::BAD_GATEWAY,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::CodeExpiredOrMissing
            | AuthError::CodeMismatch
            | AuthError::ResetTokenExpired
            | AuthError::ResetTokenInvalid => ErrorKind::BadRequest,
            AuthError::AccountNotFound => ErrorKind::NotFound,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::MissingCredential
            | AuthError::ExpiredCredential
            | AuthError::InvalidSignature
            | AuthError::RevokedCredential
            | AuthError::NotAuthenticated => ErrorKind::Unauthorized,
            AuthError::InsufficientRole | AuthError::NotResourceOwner => ErrorKind::Forbidden,
            AuthError::EmailDeliveryFailed(_) => ErrorKind::BadGateway,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::EmailDeliveryFailed(msg) => {
                tracing::error!(message = %msg, "Outbound mail failed");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::RevokedCredential => {
                tracing::warn!("Replay of a revoked credential");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<platform::mailer::MailError> for AuthError {
    fn from(err: platform::mailer::MailError) -> Self {
        AuthError::EmailDeliveryFailed(err.to_string())
    }
}

impl From<platform::password::PasswordPolicyError> for AuthError {
    fn from(err: platform::password::PasswordPolicyError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
