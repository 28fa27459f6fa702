//! Auth Middleware
//!
//! Bearer-token authentication and the admin guard for protected routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use platform::mailer::MailSender;

use crate::application::blacklist::BlacklistService;
use crate::domain::repository::{AccountRepository, OneTimeCodeRepository, RevokedTokenRepository};
use crate::domain::value_object::account_id::AccountId;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Authenticated identity stored in request extensions
#[derive(Clone)]
pub struct AuthContext {
    pub account_id: AccountId,
    pub email: String,
    /// The exact bearer token presented, kept for logout
    pub token: String,
}

/// Pull the bearer token out of the Authorization header
fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

/// Middleware that requires a valid, non-revoked access token
///
/// On success attaches [`AuthContext`] to the request extensions.
pub async fn require_auth<R, M>(
    State(state): State<AuthAppState<R, M>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
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
    let token = match extract_bearer(req.headers()) {
        Some(token) => token,
        None => return Err(AuthError::MissingCredential.into_response()),
    };

    let claims = state
        .signer
        .verify_session(&token)
        .map_err(|e| e.into_response())?;

    let blacklist = BlacklistService::new(state.repo.clone());
    let revoked = blacklist
        .is_revoked(&token)
        .await
        .map_err(|e| e.into_response())?;
    if revoked {
        return Err(AuthError::RevokedCredential.into_response());
    }

    let account_id = claims.account_id().map_err(|e| e.into_response())?;

    req.extensions_mut().insert(AuthContext {
        account_id,
        email: claims.email,
        token,
    });

    Ok(next.run(req).await)
}

/// Middleware that requires the authenticated account to be an admin
///
/// The role is re-fetched from storage on every request, so a demotion
/// takes effect immediately regardless of what the token claims.
pub async fn require_admin<R, M>(
    State(state): State<AuthAppState<R, M>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
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
    let ctx = match req.extensions().get::<AuthContext>() {
        Some(ctx) => ctx.clone(),
        None => return Err(AuthError::NotAuthenticated.into_response()),
    };

    let account = state
        .repo
        .find_by_id(&ctx.account_id)
        .await
        .map_err(|e| e.into_response())?;

    match account {
        None => Err(AuthError::NotAuthenticated.into_response()),
        Some(account) if !account.role.is_admin() => {
            Err(AuthError::InsufficientRole.into_response())
        }
        Some(_) => Ok(next.run(req).await),
    }
}
