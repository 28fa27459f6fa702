//! Application Layer
//!
//! Use cases and application services.

pub mod blacklist;
pub mod config;
pub mod login;
pub mod logout;
pub mod mail;
pub mod manage_account;
pub mod one_time_code;
pub mod register;
pub mod request_code;
pub mod reset_password;
pub mod token;

// Re-exports
pub use blacklist::BlacklistService;
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutcome, LoginUseCase};
pub use logout::LogoutUseCase;
pub use manage_account::ManageAccountUseCase;
pub use one_time_code::CodeService;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use request_code::RequestCodeUseCase;
pub use reset_password::ResetPasswordUseCase;
pub use token::{ResetClaims, SessionClaims, TokenSigner};
