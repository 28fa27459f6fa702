//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for access tokens
    pub session_secret: Vec<u8>,
    /// HMAC secret for password reset tokens, distinct from the session
    /// secret so a reset token can never pass as an access token
    pub reset_secret: Vec<u8>,
    /// Access token TTL (1 hour)
    pub session_ttl: Duration,
    /// One-time code TTL (5 minutes)
    pub code_ttl: Duration,
    /// Password reset token TTL (15 minutes)
    pub reset_ttl: Duration,
    /// Base URL the reset link points at; the token is appended as
    /// `?token=...`
    pub frontend_reset_url: String,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: Vec::new(),
            reset_secret: Vec::new(),
            session_ttl: Duration::from_secs(3600), // 1 hour
            code_ttl: Duration::from_secs(5 * 60),  // 5 minutes
            reset_ttl: Duration::from_secs(15 * 60), // 15 minutes
            frontend_reset_url: "http://localhost:3000/reset-password".to_string(),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with random secrets (for development)
    pub fn with_random_secrets() -> Self {
        Self {
            session_secret: platform::crypto::random_bytes(32),
            reset_secret: platform::crypto::random_bytes(32),
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secrets()
    }

    /// Load config from environment variables
    ///
    /// `JWT_SECRET` and `RESET_SECRET` are required; the rest fall back
    /// to defaults.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let defaults = Self::default();
        Ok(Self {
            session_secret: std::env::var("JWT_SECRET")?.into_bytes(),
            reset_secret: std::env::var("RESET_SECRET")?.into_bytes(),
            frontend_reset_url: std::env::var("FRONTEND_RESET_URL")
                .unwrap_or(defaults.frontend_reset_url),
            password_pepper: std::env::var("PASSWORD_PEPPER")
                .ok()
                .map(String::into_bytes),
            ..defaults
        })
    }

    /// Get access token TTL in whole seconds
    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl.as_secs() as i64
    }

    /// Get reset token TTL in whole seconds
    pub fn reset_ttl_secs(&self) -> i64 {
        self.reset_ttl.as_secs() as i64
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
