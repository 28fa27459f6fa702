//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;
use uuid::Uuid;

use platform::mailer::MailSender;

use crate::application::config::AuthConfig;
use crate::application::token::TokenSigner;
use crate::application::{
    LoginInput, LoginOutcome, LoginUseCase, LogoutUseCase, ManageAccountUseCase, RegisterInput,
    RegisterUseCase, RequestCodeUseCase, ResetPasswordUseCase,
};
use crate::domain::repository::{AccountRepository, OneTimeCodeRepository, RevokedTokenRepository};
use crate::domain::value_object::{account_id::AccountId, account_role::AccountRole};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AccountResponse, EmailRequest, LoginRequest, LoginResponse, MessageResponse, ProfileResponse,
    RegisterRequest, ResetPasswordRequest, SetRoleRequest, SetupAdminRequest, UserSummary,
};
use crate::presentation::middleware::AuthContext;

/// Shared state for auth handlers
pub struct AuthAppState<R, M>
where
    R: AccountRepository
        + OneTimeCodeRepository
        + RevokedTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: MailSender + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub signer: Arc<TokenSigner>,
    pub config: Arc<AuthConfig>,
}

// Manual impl: every field is an Arc, so the mailer does not have to be
// Clone itself (a derive would demand `M: Clone`).
impl<R, M> Clone for AuthAppState<R, M>
where
    R: AccountRepository
        + OneTimeCodeRepository
        + RevokedTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: MailSender + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            mailer: self.mailer.clone(),
            signer: self.signer.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/user/register
pub async fn register<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository
        + OneTimeCodeRepository
        + RevokedTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: MailSender + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(RegisterInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(output.message)),
    ))
}

// ============================================================================
// One-Time Code Requests
// ============================================================================

/// POST /api/user/request-otp
pub async fn request_otp<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<EmailRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository
        + OneTimeCodeRepository
        + RevokedTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: MailSender + Send + Sync + 'static,
{
    let use_case = RequestCodeUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.signer.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let message = use_case.request_verification(&req.email).await?;
    Ok(Json(MessageResponse::new(message)))
}

/// POST /api/user/forgot-password
pub async fn forgot_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<EmailRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository
        + OneTimeCodeRepository
        + RevokedTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: MailSender + Send + Sync + 'static,
{
    let use_case = RequestCodeUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.signer.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let message = use_case.forgot_password(&req.email).await?;
    Ok(Json(MessageResponse::new(message)))
}

// ============================================================================
// Login / Logout / Profile
// ============================================================================

/// POST /api/auth/login
pub async fn login<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: AccountRepository
        + OneTimeCodeRepository
        + RevokedTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: MailSender + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.signer.clone(),
        state.config.clone(),
    );

    let outcome = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
            code: req.otp,
        })
        .await?;

    let response = match outcome {
        LoginOutcome::OtpRequired { message } => LoginResponse {
            access_token: None,
            user: None,
            message: Some(message),
        },
        LoginOutcome::Success {
            access_token,
            account_id,
            email,
        } => LoginResponse {
            access_token: Some(access_token),
            user: Some(UserSummary {
                id: account_id.to_string(),
                email,
            }),
            message: None,
        },
    };

    Ok(Json(response))
}

/// POST /api/auth/logout
pub async fn logout<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(ctx): Extension<AuthContext>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository
        + OneTimeCodeRepository
        + RevokedTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: MailSender + Send + Sync + 'static,
{
    let use_case = LogoutUseCase::new(state.repo.clone(), state.signer.clone());
    let message = use_case.execute(&ctx.token).await?;
    Ok(Json(MessageResponse::new(message)))
}

/// GET /api/auth/profile
pub async fn profile(Extension(ctx): Extension<AuthContext>) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        message: "Welcome to your profile".to_string(),
        user: UserSummary {
            id: ctx.account_id.to_string(),
            email: ctx.email,
        },
    })
}

// ============================================================================
// Password Reset
// ============================================================================

/// POST /api/auth/reset-password
pub async fn reset_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<ResetPasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository
        + OneTimeCodeRepository
        + RevokedTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: MailSender + Send + Sync + 'static,
{
    let use_case =
        ResetPasswordUseCase::new(state.repo.clone(), state.signer.clone(), state.config.clone());

    let message = use_case.execute(&req.token, req.password).await?;
    Ok(Json(MessageResponse::new(message)))
}

// ============================================================================
// Account Lookup
// ============================================================================

/// GET /api/user/{id}
///
/// Owner or admin only.
pub async fn get_account<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> AuthResult<Json<AccountResponse>>
where
    R: AccountRepository
        + OneTimeCodeRepository
        + RevokedTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: MailSender + Send + Sync + 'static,
{
    let target = AccountId::from_uuid(id);
    let use_case = ManageAccountUseCase::new(state.repo.clone(), state.config.clone());

    if target != ctx.account_id {
        let caller = use_case.profile(&ctx.account_id).await?;
        if !caller.role.is_admin() {
            return Err(AuthError::NotResourceOwner);
        }
    }

    let account = use_case.profile(&target).await?;
    Ok(Json(AccountResponse::from(&account)))
}

/// GET /api/user/all (admin)
pub async fn list_accounts<R, M>(
    State(state): State<AuthAppState<R, M>>,
) -> AuthResult<Json<Vec<AccountResponse>>>
where
    R: AccountRepository
        + OneTimeCodeRepository
        + RevokedTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: MailSender + Send + Sync + 'static,
{
    let use_case = ManageAccountUseCase::new(state.repo.clone(), state.config.clone());
    let accounts = use_case.list_accounts().await?;
    Ok(Json(accounts.iter().map(AccountResponse::from).collect()))
}

// ============================================================================
// Administration
// ============================================================================

/// DELETE /api/user/delete/{id} (admin)
pub async fn delete_account<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(id): Path<Uuid>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository
        + OneTimeCodeRepository
        + RevokedTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: MailSender + Send + Sync + 'static,
{
    let use_case = ManageAccountUseCase::new(state.repo.clone(), state.config.clone());
    let message = use_case.soft_delete(&AccountId::from_uuid(id)).await?;
    Ok(Json(MessageResponse::new(message)))
}

/// GET /api/user/deleted/{id} (admin)
pub async fn get_deleted_account<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(id): Path<Uuid>,
) -> AuthResult<Json<AccountResponse>>
where
    R: AccountRepository
        + OneTimeCodeRepository
        + RevokedTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: MailSender + Send + Sync + 'static,
{
    let use_case = ManageAccountUseCase::new(state.repo.clone(), state.config.clone());
    let account = use_case.get_deleted(&AccountId::from_uuid(id)).await?;
    Ok(Json(AccountResponse::from(&account)))
}

/// POST /api/user/restore/{id} (admin)
pub async fn restore_account<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(id): Path<Uuid>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository
        + OneTimeCodeRepository
        + RevokedTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: MailSender + Send + Sync + 'static,
{
    let use_case = ManageAccountUseCase::new(state.repo.clone(), state.config.clone());
    let message = use_case.restore(&AccountId::from_uuid(id)).await?;
    Ok(Json(MessageResponse::new(message)))
}

/// POST /api/admin/set-role/{id} (admin)
pub async fn set_role<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetRoleRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository
        + OneTimeCodeRepository
        + RevokedTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: MailSender + Send + Sync + 'static,
{
    let role = AccountRole::from_code(&req.role)
        .ok_or_else(|| AuthError::Validation(format!("Unknown role: {}", req.role)))?;

    let use_case = ManageAccountUseCase::new(state.repo.clone(), state.config.clone());
    let message = use_case.set_role(&AccountId::from_uuid(id), role).await?;
    Ok(Json(MessageResponse::new(message)))
}

/// POST /api/admin/setup
///
/// Public bootstrap endpoint; refuses once any admin exists.
pub async fn setup_admin<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<SetupAdminRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository
        + OneTimeCodeRepository
        + RevokedTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: MailSender + Send + Sync + 'static,
{
    let use_case = ManageAccountUseCase::new(state.repo.clone(), state.config.clone());
    let message = use_case.setup_admin(req.email, req.password).await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::new(message))))
}
