//! Revoked Token Entity
//!
//! A denylist entry created at logout. The entry carries the token's
//! own expiry, so a lookup that finds a stale entry can delete it on
//! the spot and the denylist never outlives the tokens it denies.

use chrono::{DateTime, Duration, Utc};

/// Revoked token entity
#[derive(Debug, Clone)]
pub struct RevokedToken {
    /// The exact bearer token string that was revoked
    pub token: String,
    /// Revocation timestamp
    pub created_at: DateTime<Utc>,
    /// Expiry copied from the token itself
    pub expires_at: DateTime<Utc>,
}

impl RevokedToken {
    /// Create a denylist entry living as long as the token's remaining TTL
    pub fn new(token: String, remaining_ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            token,
            created_at: now,
            expires_at: now + remaining_ttl,
        }
    }

    /// Check if the entry has outlived the token it denies
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}
