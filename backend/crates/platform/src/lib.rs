//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (secure randomness, one-time numeric codes)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Outbound mail (SMTP sender behind a trait seam)

pub mod crypto;
pub mod mailer;
pub mod password;
