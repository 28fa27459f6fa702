//! Value Object Module

pub mod account_id;
pub mod account_role;
pub mod account_status;
pub mod code_purpose;
pub mod email;
