//! Auth Router

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;

use platform::mailer::{MailSender, SmtpMailer};

use crate::application::config::AuthConfig;
use crate::application::token::TokenSigner;
use crate::domain::repository::{AccountRepository, OneTimeCodeRepository, RevokedTokenRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{require_admin, require_auth};

/// Create the router with the PostgreSQL repository and SMTP mailer
pub fn auth_router(repo: PgAuthRepository, mailer: SmtpMailer, config: AuthConfig) -> Router {
    auth_router_generic(repo, mailer, config)
}

/// Create a router for any repository and mailer implementation
pub fn auth_router_generic<R, M>(repo: R, mailer: M, config: AuthConfig) -> Router
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
    let config = Arc::new(config);
    let state = AuthAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        signer: Arc::new(TokenSigner::new(config.clone())),
        config,
    };

    let public = Router::new()
        .route("/user/register", post(handlers::register::<R, M>))
        .route("/user/request-otp", post(handlers::request_otp::<R, M>))
        .route(
            "/user/forgot-password",
            post(handlers::forgot_password::<R, M>),
        )
        .route("/auth/login", post(handlers::login::<R, M>))
        .route("/auth/reset-password", post(handlers::reset_password::<R, M>))
        .route("/admin/setup", post(handlers::setup_admin::<R, M>));

    let protected = Router::new()
        .route("/auth/logout", post(handlers::logout::<R, M>))
        .route("/auth/profile", get(handlers::profile))
        .route("/user/{id}", get(handlers::get_account::<R, M>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<R, M>,
        ));

    let admin = Router::new()
        .route("/user/all", get(handlers::list_accounts::<R, M>))
        .route("/user/delete/{id}", delete(handlers::delete_account::<R, M>))
        .route(
            "/user/deleted/{id}",
            get(handlers::get_deleted_account::<R, M>),
        )
        .route("/user/restore/{id}", post(handlers::restore_account::<R, M>))
        .route("/admin/set-role/{id}", post(handlers::set_role::<R, M>))
        // Layers run outermost first: authentication, then the role check
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin::<R, M>,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<R, M>,
        ));

    public.merge(protected).merge(admin).with_state(state)
}
