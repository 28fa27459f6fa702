//! Entity Module

pub mod account;
pub mod one_time_code;
pub mod revoked_token;
