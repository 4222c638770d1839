//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /api/auth/signin` - Credentials sign-in
/// - `POST /api/auth/oauth/callback` - OAuth provider callback
/// - `POST /api/auth/refresh` - Token refresh
/// - `POST /api/auth/logout` - Logout (client-side token removal)
/// - `GET /api/session` - Session projected from the bearer token
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/auth/signin", post(handlers::credentials_signin))
        .route("/api/auth/oauth/callback", post(handlers::oauth_callback))
        .route("/api/auth/refresh", post(handlers::refresh_token))
        .route("/api/auth/logout", post(handlers::logout_handler))
        .route("/api/session", get(handlers::session_handler))
}
