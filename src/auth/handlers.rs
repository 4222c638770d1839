//! Authentication handlers

use axum::extract::{Extension, Json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use super::credentials::authorize_credentials;
use super::extractors::SessionClaims;
use super::models::{AccountDescriptor, Claims, OAuthCallbackPayload, Session, SignInPayload};
use super::oauth::link_oauth;
use super::providers::Provider;
use super::session::project_session;
use super::token::{bind_subject, encode_token, expiry_timestamp, issue_claims};
use crate::common::{safe_email_log, ApiError, AppState};

/// POST /api/auth/signin
/// Authenticates a user via email and password
///
/// # Request Body
/// ```json
/// {
///   "email": "user@example.com",
///   "password": "<secret>"
/// }
/// ```
///
/// # Response
/// ```json
/// {
///   "token": "<jwt token>",
///   "user": { ... }
/// }
/// ```
///
/// Any rejection (bad shape, unknown email, wrong password, Directory
/// outage) produces the same 401 body.
pub async fn credentials_signin(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<SignInPayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    info!("🔐 Received credentials sign-in request");
    let state = state_lock.read().await.clone();

    let Some(user) = authorize_credentials(state.directory.as_ref(), &payload).await else {
        return Err(ApiError::Unauthorized("invalid credentials".to_string()));
    };

    let claims = issue_claims(&user.id, &user.email, state.token_ttl_hours);
    let descriptor = AccountDescriptor {
        provider: Provider::Credentials,
        provider_account_id: user.email.clone(),
    };
    let claims = bind_subject(state.directory.as_ref(), claims, Some(&descriptor)).await;

    let token = sign_claims(&claims, &state.jwt_secret)?;

    info!(
        user_id = %claims.sub,
        email = %safe_email_log(&user.email),
        provider = "credentials",
        "User authentication successful"
    );

    Ok(Json(serde_json::json!({
        "token": token,
        "user": {
            "id": claims.sub,
            "name": user.name,
            "email": user.email,
            "image": user.image,
        },
    })))
}

/// POST /api/auth/oauth/callback
/// Completes a provider handshake: links the account in the Directory and
/// issues a token bound to the internal user id
///
/// # Request Body
/// ```json
/// {
///   "provider": "github",
///   "providerAccountId": "gh42",
///   "user": { "name": "...", "email": "...", "image": "..." },
///   "profile": { "login": "octocat", ... }
/// }
/// ```
///
/// # Response
/// ```json
/// {
///   "token": "<jwt token>",
///   "user": { ... }
/// }
/// ```
pub async fn oauth_callback(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<OAuthCallbackPayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    info!(provider = %payload.provider, "🔐 Received OAuth callback");
    let state = state_lock.read().await.clone();

    if !link_oauth(state.directory.as_ref(), &payload).await {
        return Err(ApiError::Unauthorized("access denied".to_string()));
    }

    let email = payload.user.email.clone().unwrap_or_default();
    let claims = issue_claims("", &email, state.token_ttl_hours);
    let descriptor = AccountDescriptor {
        provider: payload.provider,
        provider_account_id: payload.provider_account_id.clone(),
    };
    let claims = bind_subject(state.directory.as_ref(), claims, Some(&descriptor)).await;

    let token = sign_claims(&claims, &state.jwt_secret)?;

    info!(
        user_id = %claims.sub,
        email = %safe_email_log(&email),
        provider = %payload.provider,
        "User authentication successful"
    );

    Ok(Json(serde_json::json!({
        "token": token,
        "user": {
            "id": claims.sub,
            "name": payload.user.name,
            "email": payload.user.email,
            "image": payload.user.image,
        },
    })))
}

/// POST /api/auth/refresh
/// Re-stamps the bearer token's expiry; the subject claim is carried over
/// untouched
///
/// # Response
/// ```json
/// {
///   "token": "<jwt token>"
/// }
/// ```
pub async fn refresh_token(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    SessionClaims(claims): SessionClaims,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    // Ordinary refresh: no account descriptor, so the subject is sticky
    let claims = bind_subject(state.directory.as_ref(), claims, None).await;
    let claims = Claims {
        exp: expiry_timestamp(state.token_ttl_hours),
        ..claims
    };

    let token = sign_claims(&claims, &state.jwt_secret)?;

    Ok(Json(serde_json::json!({ "token": token })))
}

/// GET /api/session
/// Returns the session projected from the bearer token
///
/// # Response
/// ```json
/// {
///   "user": { "id": "...", "name": null, "email": "...", "image": null }
/// }
/// ```
#[axum::debug_handler]
pub async fn session_handler(
    SessionClaims(claims): SessionClaims,
) -> Result<Json<Session>, ApiError> {
    Ok(Json(project_session(&claims)))
}

/// POST /api/auth/logout
/// Logout endpoint - since we're using JWT tokens, logout is handled
/// client-side; this endpoint just confirms the request
///
/// # Response
/// ```json
/// {
///   "message": "Logout successful"
/// }
/// ```
pub async fn logout_handler(
    _claims: SessionClaims,
) -> Result<Json<serde_json::Value>, ApiError> {
    info!("User logout successful");
    let resp = serde_json::json!({
        "message": "Logout successful"
    });
    Ok(Json(resp))
}

// ---- Helper Functions ----

fn sign_claims(claims: &Claims, secret: &str) -> Result<String, ApiError> {
    encode_token(claims, secret).map_err(|e| {
        error!(
            error = %e,
            user_id = %claims.sub,
            "JWT encoding error during authentication"
        );
        ApiError::InternalServer("jwt error".to_string())
    })
}
