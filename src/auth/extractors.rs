//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use super::models::Claims;
use super::token::decode_token;
use crate::common::{safe_token_log, ApiError, AppState};

/// Claims extracted from the request's bearer token.
///
/// Decoding and signature validation are the only checks here; whether the
/// subject still resolves in the Directory is the token path's concern,
/// not the transport's.
#[derive(Debug)]
pub struct SessionClaims(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for SessionClaims
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(state_lock): Extension<Arc<RwLock<AppState>>> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let app_state = state_lock.read().await.clone();

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string());

        let token = match token {
            Some(t) => t,
            None => {
                warn!("Authentication failed: missing Authorization header");
                return Err(ApiError::Unauthorized("missing auth".into()));
            }
        };

        // Handle "Bearer <token>" format or raw token
        let bare_token = if let Some(rest) = token.strip_prefix("Bearer ") {
            rest.to_string()
        } else {
            token
        };

        match decode_token(&bare_token, &app_state.jwt_secret) {
            Ok(claims) => Ok(SessionClaims(claims)),
            Err(e) => {
                warn!(
                    error = %e,
                    token = %safe_token_log(&bare_token),
                    "JWT token validation failed"
                );
                Err(ApiError::Unauthorized("invalid token".into()))
            }
        }
    }
}
