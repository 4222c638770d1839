//! Authentication data models

use serde::{Deserialize, Serialize};

use super::providers::Provider;

/// JWT claims structure
///
/// `sub` always carries the internal user id once an account has been
/// resolved; it is never a provider-native id or an email.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: usize,
}

/// Directory-owned user record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub image: Option<String>,
}

/// Directory-owned account record
///
/// One account exists per `(provider, provider_account_id)`; each account
/// references exactly one user. The stored hash is present only for the
/// credentials provider and must never leave the auth components.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub user_id: String,
    pub provider: Provider,
    pub provider_account_id: String,
    #[serde(rename = "password")]
    pub password_hash: Option<String>,
}

/// Provider handle present only immediately after a completed handshake;
/// drives subject binding on the token.
#[derive(Debug, Clone)]
pub struct AccountDescriptor {
    pub provider: Provider,
    pub provider_account_id: String,
}

/// Upsert payload sent to the Directory for OAuth sign-ins
#[derive(Debug, Clone, Serialize)]
pub struct OAuthUserInfo {
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub username: String,
}

/// Externally visible session, recomputed from the token on every read
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub user: SessionUser,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

/// Credentials sign-in request body
#[derive(Debug, Deserialize)]
pub struct SignInPayload {
    pub email: String,
    pub password: String,
}

/// Identity fields the provider handshake supplies for the signing-in user
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthUserPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

/// OAuth callback request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthCallbackPayload {
    pub provider: Provider,
    pub provider_account_id: String,
    pub user: OAuthUserPayload,
    /// Raw provider profile; GitHub's `login` handle is read from here
    #[serde(default)]
    pub profile: serde_json::Value,
}
