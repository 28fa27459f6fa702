//! Crate-level integration tests
//!
//! Drive the use cases end to end against in-memory repository and
//! mailer fakes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use platform::mailer::{MailError, MailSender};

use crate::application::blacklist::BlacklistService;
use crate::application::config::AuthConfig;
use crate::application::login::{LoginInput, LoginOutcome, LoginUseCase};
use crate::application::logout::LogoutUseCase;
use crate::application::manage_account::ManageAccountUseCase;
use crate::application::one_time_code::CodeService;
use crate::application::register::{RegisterInput, RegisterUseCase};
use crate::application::request_code::RequestCodeUseCase;
use crate::application::reset_password::ResetPasswordUseCase;
use crate::application::token::TokenSigner;
use crate::domain::entity::{
    account::Account, one_time_code::OneTimeCode, revoked_token::RevokedToken,
};
use crate::domain::repository::{
    AccountRepository, OneTimeCodeRepository, RevokedTokenRepository,
};
use crate::domain::value_object::{
    account_id::AccountId, account_role::AccountRole, code_purpose::CodePurpose, email::Email,
};
use crate::error::{AuthError, AuthResult};
use crate::presentation::router::auth_router_generic;

// ============================================================================
// In-memory fakes
// ============================================================================

#[derive(Clone, Default)]
struct MemRepo {
    accounts: Arc<Mutex<HashMap<Uuid, Account>>>,
    codes: Arc<Mutex<HashMap<(Uuid, i16), OneTimeCode>>>,
    revoked: Arc<Mutex<HashMap<String, RevokedToken>>>,
}

impl MemRepo {
    /// Force the stored code for (account, purpose) into the past
    fn expire_code(&self, account_id: &AccountId, purpose: CodePurpose) {
        let mut codes = self.codes.lock().unwrap();
        if let Some(code) = codes.get_mut(&(*account_id.as_uuid(), purpose.id())) {
            code.expires_at = Utc::now() - Duration::seconds(1);
        }
    }

    fn insert_stale_revocation(&self, token: &str) {
        let mut entry = RevokedToken::new(token.to_string(), Duration::seconds(10));
        entry.expires_at = Utc::now() - Duration::seconds(1);
        self.revoked
            .lock()
            .unwrap()
            .insert(token.to_string(), entry);
    }

    fn has_revocation(&self, token: &str) -> bool {
        self.revoked.lock().unwrap().contains_key(token)
    }
}

impl AccountRepository for MemRepo {
    async fn create(&self, account: &Account) -> AuthResult<()> {
        self.accounts
            .lock()
            .unwrap()
            .insert(*account.account_id.as_uuid(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .get(account_id.as_uuid())
            .filter(|a| !a.is_deleted())
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .values()
            .find(|a| &a.email == email && !a.is_deleted())
            .cloned())
    }

    async fn find_deleted_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .get(account_id.as_uuid())
            .filter(|a| a.is_deleted())
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .values()
            .any(|a| &a.email == email && !a.is_deleted()))
    }

    async fn update(&self, account: &Account) -> AuthResult<()> {
        self.accounts
            .lock()
            .unwrap()
            .insert(*account.account_id.as_uuid(), account.clone());
        Ok(())
    }

    async fn list_active(&self) -> AuthResult<Vec<Account>> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .values()
            .filter(|a| !a.is_deleted())
            .cloned()
            .collect())
    }

    async fn exists_admin(&self) -> AuthResult<bool> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .values()
            .any(|a| a.role.is_admin() && !a.is_deleted()))
    }
}

impl OneTimeCodeRepository for MemRepo {
    async fn upsert(&self, code: &OneTimeCode) -> AuthResult<()> {
        self.codes
            .lock()
            .unwrap()
            .insert((*code.account_id.as_uuid(), code.purpose.id()), code.clone());
        Ok(())
    }

    async fn find(
        &self,
        account_id: &AccountId,
        purpose: CodePurpose,
    ) -> AuthResult<Option<OneTimeCode>> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .get(&(*account_id.as_uuid(), purpose.id()))
            .cloned())
    }

    async fn delete(&self, account_id: &AccountId, purpose: CodePurpose) -> AuthResult<()> {
        self.codes
            .lock()
            .unwrap()
            .remove(&(*account_id.as_uuid(), purpose.id()));
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let mut codes = self.codes.lock().unwrap();
        let before = codes.len();
        codes.retain(|_, c| !c.is_expired());
        Ok((before - codes.len()) as u64)
    }
}

impl RevokedTokenRepository for MemRepo {
    async fn insert(&self, entry: &RevokedToken) -> AuthResult<()> {
        self.revoked
            .lock()
            .unwrap()
            .insert(entry.token.clone(), entry.clone());
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> AuthResult<Option<RevokedToken>> {
        Ok(self.revoked.lock().unwrap().get(token).cloned())
    }

    async fn delete_by_token(&self, token: &str) -> AuthResult<()> {
        self.revoked.lock().unwrap().remove(token);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let mut revoked = self.revoked.lock().unwrap();
        let before = revoked.len();
        revoked.retain(|_, e| !e.is_expired());
        Ok((before - revoked.len()) as u64)
    }
}

#[derive(Clone, Default)]
struct MemMailer {
    sent: Arc<Mutex<Vec<(Vec<String>, String, String)>>>,
}

impl MemMailer {
    fn last(&self) -> (Vec<String>, String, String) {
        self.sent.lock().unwrap().last().cloned().unwrap()
    }

    fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl MailSender for MemMailer {
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        html_body: &str,
    ) -> Result<(), MailError> {
        self.sent.lock().unwrap().push((
            recipients.to_vec(),
            subject.to_string(),
            html_body.to_string(),
        ));
        Ok(())
    }
}

// ============================================================================
// Test harness
// ============================================================================

struct Stack {
    repo: Arc<MemRepo>,
    mailer: Arc<MemMailer>,
    signer: Arc<TokenSigner>,
    config: Arc<AuthConfig>,
}

fn stack() -> Stack {
    let config = Arc::new(AuthConfig::development());
    Stack {
        repo: Arc::new(MemRepo::default()),
        mailer: Arc::new(MemMailer::default()),
        signer: Arc::new(TokenSigner::new(config.clone())),
        config,
    }
}

impl Stack {
    fn register(&self) -> RegisterUseCase<MemRepo, MemRepo, MemMailer> {
        RegisterUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.mailer.clone(),
            self.config.clone(),
        )
    }

    fn login(&self) -> LoginUseCase<MemRepo, MemRepo> {
        LoginUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.signer.clone(),
            self.config.clone(),
        )
    }

    fn logout(&self) -> LogoutUseCase<MemRepo> {
        LogoutUseCase::new(self.repo.clone(), self.signer.clone())
    }

    fn request_code(&self) -> RequestCodeUseCase<MemRepo, MemRepo, MemMailer> {
        RequestCodeUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.signer.clone(),
            self.mailer.clone(),
            self.config.clone(),
        )
    }

    fn reset_password(&self) -> ResetPasswordUseCase<MemRepo> {
        ResetPasswordUseCase::new(self.repo.clone(), self.signer.clone(), self.config.clone())
    }

    fn manage(&self) -> ManageAccountUseCase<MemRepo> {
        ManageAccountUseCase::new(self.repo.clone(), self.config.clone())
    }

    fn codes(&self) -> CodeService<MemRepo> {
        CodeService::new(self.repo.clone(), self.config.clone())
    }

    fn blacklist(&self) -> BlacklistService<MemRepo> {
        BlacklistService::new(self.repo.clone())
    }

    async fn register_account(&self, email: &str, password: &str) -> AccountId {
        self.register()
            .execute(RegisterInput {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .unwrap()
            .account_id
    }

    /// Register, pull the code from the mailed body, and log in with it
    async fn register_verified(&self, email: &str, password: &str) -> (AccountId, String) {
        let account_id = self.register_account(email, password).await;
        let code = extract_code(&self.mailer.last().2);

        let outcome = self
            .login()
            .execute(LoginInput {
                email: email.to_string(),
                password: password.to_string(),
                code: Some(code),
            })
            .await
            .unwrap();

        match outcome {
            LoginOutcome::Success { access_token, .. } => (account_id, access_token),
            LoginOutcome::OtpRequired { .. } => panic!("expected verified login"),
        }
    }
}

/// Pull the first run of six digits out of a mail body
fn extract_code(body: &str) -> String {
    let bytes = body.as_bytes();
    for start in 0..bytes.len() {
        if bytes[start..].len() >= 6 && bytes[start..start + 6].iter().all(u8::is_ascii_digit) {
            return body[start..start + 6].to_string();
        }
    }
    panic!("no code in mail body: {body}");
}

// ============================================================================
// Registration and verification
// ============================================================================

#[tokio::test]
async fn register_creates_unverified_account_and_mails_code() {
    let stack = stack();
    let account_id = stack.register_account("user@example.com", "correct horse battery").await;

    let (recipients, subject, body) = stack.mailer.last();
    assert_eq!(recipients, vec!["user@example.com".to_string()]);
    assert_eq!(subject, "OTP for verification");
    extract_code(&body);

    // Password-only login is refused until verified
    let outcome = stack
        .login()
        .execute(LoginInput {
            email: "user@example.com".to_string(),
            password: "correct horse battery".to_string(),
            code: None,
        })
        .await
        .unwrap();
    assert!(matches!(outcome, LoginOutcome::OtpRequired { .. }));

    let account = stack.repo.find_by_id(&account_id).await.unwrap().unwrap();
    assert!(!account.status.can_login());
}

#[tokio::test]
async fn duplicate_email_rejected() {
    let stack = stack();
    stack.register_account("user@example.com", "correct horse battery").await;

    let err = stack
        .register()
        .execute(RegisterInput {
            email: "User@Example.com".to_string(),
            password: "another password".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::EmailTaken));
}

#[tokio::test]
async fn login_with_code_verifies_and_issues_token() {
    let stack = stack();
    let (account_id, token) = stack
        .register_verified("user@example.com", "correct horse battery")
        .await;

    let claims = stack.signer.verify_session(&token).unwrap();
    assert_eq!(claims.account_id().unwrap(), account_id);
    assert_eq!(claims.email, "user@example.com");

    // Verified now, so password-only login succeeds
    let outcome = stack
        .login()
        .execute(LoginInput {
            email: "user@example.com".to_string(),
            password: "correct horse battery".to_string(),
            code: None,
        })
        .await
        .unwrap();
    assert!(matches!(outcome, LoginOutcome::Success { .. }));
}

#[tokio::test]
async fn wrong_password_rejected() {
    let stack = stack();
    stack
        .register_verified("user@example.com", "correct horse battery")
        .await;

    let err = stack
        .login()
        .execute(LoginInput {
            email: "user@example.com".to_string(),
            password: "wrong password!!".to_string(),
            code: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));

    // Unknown email reads the same as a wrong password
    let err = stack
        .login()
        .execute(LoginInput {
            email: "nobody@example.com".to_string(),
            password: "correct horse battery".to_string(),
            code: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

// ============================================================================
// One-time code lifecycle
// ============================================================================

#[tokio::test]
async fn code_is_consumed_by_successful_validation() {
    let stack = stack();
    let account_id = stack.register_account("user@example.com", "correct horse battery").await;
    let code = extract_code(&stack.mailer.last().2);

    stack
        .codes()
        .validate(&account_id, CodePurpose::VerifyAccount, &code)
        .await
        .unwrap();

    // Replay reads as expired-or-missing, not as a mismatch
    let err = stack
        .codes()
        .validate(&account_id, CodePurpose::VerifyAccount, &code)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::CodeExpiredOrMissing));
}

#[tokio::test]
async fn expired_code_rejected_even_when_digits_match() {
    let stack = stack();
    let account_id = stack.register_account("user@example.com", "correct horse battery").await;
    let code = extract_code(&stack.mailer.last().2);

    stack.repo.expire_code(&account_id, CodePurpose::VerifyAccount);

    let err = stack
        .codes()
        .validate(&account_id, CodePurpose::VerifyAccount, &code)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::CodeExpiredOrMissing));
}

#[tokio::test]
async fn wrong_code_rejected_but_not_consumed() {
    let stack = stack();
    let account_id = stack.register_account("user@example.com", "correct horse battery").await;
    let code = extract_code(&stack.mailer.last().2);

    let wrong = if code == "000000" { "000001" } else { "000000" };
    let err = stack
        .codes()
        .validate(&account_id, CodePurpose::VerifyAccount, wrong)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::CodeMismatch));

    // The real code still works after a failed attempt
    stack
        .codes()
        .validate(&account_id, CodePurpose::VerifyAccount, &code)
        .await
        .unwrap();
}

#[tokio::test]
async fn reissue_overwrites_previous_code() {
    let stack = stack();
    let account_id = stack.register_account("user@example.com", "correct horse battery").await;
    let first = extract_code(&stack.mailer.last().2);

    stack
        .request_code()
        .request_verification("user@example.com")
        .await
        .unwrap();
    let second = extract_code(&stack.mailer.last().2);
    assert_eq!(stack.mailer.count(), 2);

    if first != second {
        let err = stack
            .codes()
            .validate(&account_id, CodePurpose::VerifyAccount, &first)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::CodeMismatch));
    }

    stack
        .codes()
        .validate(&account_id, CodePurpose::VerifyAccount, &second)
        .await
        .unwrap();
}

// ============================================================================
// Logout and the blacklist
// ============================================================================

#[tokio::test]
async fn logout_revokes_the_presented_token() {
    let stack = stack();
    let (_, token) = stack
        .register_verified("user@example.com", "correct horse battery")
        .await;

    assert!(!stack.blacklist().is_revoked(&token).await.unwrap());

    let message = stack.logout().execute(&token).await.unwrap();
    assert_eq!(message, "Logged out successfully");
    assert!(stack.blacklist().is_revoked(&token).await.unwrap());
}

#[tokio::test]
async fn stale_blacklist_entry_is_self_cleaned() {
    let stack = stack();
    stack.repo.insert_stale_revocation("dead-token");

    assert!(!stack.blacklist().is_revoked("dead-token").await.unwrap());
    // The lookup deleted the stale row
    assert!(!stack.repo.has_revocation("dead-token"));
}

#[tokio::test]
async fn revoking_an_expired_token_stores_nothing() {
    let stack = stack();
    stack
        .blacklist()
        .record("expired-token", Duration::zero())
        .await
        .unwrap();

    assert!(!stack.repo.has_revocation("expired-token"));
}

// ============================================================================
// Password reset
// ============================================================================

#[tokio::test]
async fn forgot_password_mails_a_link_with_a_reset_token() {
    let stack = stack();
    stack
        .register_verified("user@example.com", "correct horse battery")
        .await;

    let message = stack
        .request_code()
        .forgot_password("user@example.com")
        .await
        .unwrap();
    assert_eq!(
        message,
        "Password reset link has been sent. Please check your email."
    );

    let (_, subject, body) = stack.mailer.last();
    assert_eq!(subject, "Password Reset Link");
    assert!(body.contains(&format!("{}?token=", stack.config.frontend_reset_url)));
}

#[tokio::test]
async fn reset_password_replaces_the_stored_hash() {
    let stack = stack();
    let (account_id, _) = stack
        .register_verified("user@example.com", "correct horse battery")
        .await;

    let token = stack
        .signer
        .issue_reset(&account_id, &Email::new("user@example.com").unwrap())
        .unwrap();

    stack
        .reset_password()
        .execute(&token, "a brand new password".to_string())
        .await
        .unwrap();

    let err = stack
        .login()
        .execute(LoginInput {
            email: "user@example.com".to_string(),
            password: "correct horse battery".to_string(),
            code: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));

    let outcome = stack
        .login()
        .execute(LoginInput {
            email: "user@example.com".to_string(),
            password: "a brand new password".to_string(),
            code: None,
        })
        .await
        .unwrap();
    assert!(matches!(outcome, LoginOutcome::Success { .. }));
}

#[tokio::test]
async fn garbage_reset_token_rejected() {
    let stack = stack();
    let err = stack
        .reset_password()
        .execute("not-a-token", "a brand new password".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::ResetTokenInvalid));
}

// ============================================================================
// Administration
// ============================================================================

#[tokio::test]
async fn setup_admin_works_once() {
    let stack = stack();

    let message = stack
        .manage()
        .setup_admin("admin@example.com".to_string(), "super secret pass".to_string())
        .await
        .unwrap();
    assert_eq!(message, "Admin user created with email admin@example.com");

    // Bootstrapped admin can log in straight away
    let outcome = stack
        .login()
        .execute(LoginInput {
            email: "admin@example.com".to_string(),
            password: "super secret pass".to_string(),
            code: None,
        })
        .await
        .unwrap();
    assert!(matches!(outcome, LoginOutcome::Success { .. }));

    let err = stack
        .manage()
        .setup_admin("other@example.com".to_string(), "super secret pass".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));
}

#[tokio::test]
async fn role_change_is_visible_on_next_fetch() {
    let stack = stack();
    let (account_id, _) = stack
        .register_verified("user@example.com", "correct horse battery")
        .await;

    let message = stack
        .manage()
        .set_role(&account_id, AccountRole::Admin)
        .await
        .unwrap();
    assert_eq!(message, "User roles updated to admin");

    let account = stack.manage().profile(&account_id).await.unwrap();
    assert!(account.role.is_admin());
}

#[tokio::test]
async fn soft_delete_hides_account_and_restore_brings_it_back() {
    let stack = stack();
    let (account_id, _) = stack
        .register_verified("user@example.com", "correct horse battery")
        .await;

    stack.manage().soft_delete(&account_id).await.unwrap();

    // Hidden from normal lookups and from login
    assert!(matches!(
        stack.manage().profile(&account_id).await.unwrap_err(),
        AuthError::AccountNotFound
    ));
    assert!(matches!(
        stack
            .login()
            .execute(LoginInput {
                email: "user@example.com".to_string(),
                password: "correct horse battery".to_string(),
                code: None,
            })
            .await
            .unwrap_err(),
        AuthError::InvalidCredentials
    ));

    // Still reachable through the deleted lookup
    let deleted = stack.manage().get_deleted(&account_id).await.unwrap();
    assert!(deleted.is_deleted());

    stack.manage().restore(&account_id).await.unwrap();
    let restored = stack.manage().profile(&account_id).await.unwrap();
    assert!(!restored.is_deleted());

    // Verification status survived the round trip
    let outcome = stack
        .login()
        .execute(LoginInput {
            email: "user@example.com".to_string(),
            password: "correct horse battery".to_string(),
            code: None,
        })
        .await
        .unwrap();
    assert!(matches!(outcome, LoginOutcome::Success { .. }));
}

// ============================================================================
// Router-level tests
// ============================================================================

impl Stack {
    /// Build a router sharing this stack's repository and mailer
    fn router(&self) -> Router {
        auth_router_generic(
            (*self.repo).clone(),
            (*self.mailer).clone(),
            (*self.config).clone(),
        )
    }
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_with_bearer(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

fn post_json_with_bearer(uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Register through the router, verify with the mailed code, and log in
async fn login_via_router(stack: &Stack, app: &Router, email: &str, password: &str) -> (String, String) {
    let (status, _) = send(
        app,
        post_json("/user/register", json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let code = extract_code(&stack.mailer.last().2);
    let (status, body) = send(
        app,
        post_json(
            "/auth/login",
            json!({ "email": email, "password": password, "otp": code }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let token = body["accessToken"].as_str().unwrap().to_string();
    let id = body["user"]["id"].as_str().unwrap().to_string();
    (token, id)
}

#[tokio::test]
async fn logged_out_token_is_rejected_by_protected_routes() {
    let stack = stack();
    let app = stack.router();
    let (token, _) =
        login_via_router(&stack, &app, "user@example.com", "correct horse battery").await;

    let (status, body) = send(&app, get_with_bearer("/auth/profile", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to your profile");

    let (status, body) =
        send(&app, post_json_with_bearer("/auth/logout", &token, json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out successfully");

    // Replaying the revoked token fails on any authenticated endpoint
    let (status, _) = send(&app, get_with_bearer("/auth/profile", &token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // And no bearer at all reads the same class
    let request = Request::builder()
        .method("GET")
        .uri("/auth/profile")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn promotion_to_admin_takes_effect_on_the_next_request() {
    let stack = stack();
    let app = stack.router();

    let (status, _) = send(
        &app,
        post_json(
            "/admin/setup",
            json!({ "email": "admin@example.com", "password": "super secret pass" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        post_json(
            "/auth/login",
            json!({ "email": "admin@example.com", "password": "super secret pass" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let admin_token = body["accessToken"].as_str().unwrap().to_string();

    let (user_token, user_id) =
        login_via_router(&stack, &app, "user@example.com", "correct horse battery").await;

    // A plain user is turned away from the admin surface
    let (status, _) = send(&app, get_with_bearer("/user/all", &user_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        post_json_with_bearer(
            &format!("/admin/set-role/{user_id}"),
            &admin_token,
            json!({ "role": "admin" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Same session token; the guard re-reads the role from storage
    let (status, body) = send(&app, get_with_bearer("/user/all", &user_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn list_accounts_excludes_deleted() {
    let stack = stack();
    let (kept, _) = stack
        .register_verified("kept@example.com", "correct horse battery")
        .await;
    let (dropped, _) = stack
        .register_verified("dropped@example.com", "correct horse battery")
        .await;

    stack.manage().soft_delete(&dropped).await.unwrap();

    let accounts = stack.manage().list_accounts().await.unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].account_id, kept);
}
