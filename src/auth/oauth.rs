//! OAuth account linking

use tracing::{error, warn};

use super::models::{OAuthCallbackPayload, OAuthUserInfo};
use super::providers::{canonical_username, Provider};
use crate::common::safe_email_log;
use crate::services::directory::Directory;

/// Links a completed provider handshake to a Directory account.
///
/// Returns success or failure only; identity data flows through the token
/// path, not through this step. Any Directory failure collapses to `false`.
/// Repeated callbacks for the same `(provider, provider_account_id)` resolve
/// to the same account; the upsert is idempotent on the Directory side.
pub async fn link_oauth(directory: &dyn Directory, payload: &OAuthCallbackPayload) -> bool {
    // Credentials sign-ins were already vetted by the authorizer; there is
    // nothing to link for them
    if payload.provider == Provider::Credentials {
        return true;
    }

    if payload.provider_account_id.trim().is_empty() {
        warn!(
            provider = %payload.provider,
            "OAuth callback missing provider account id"
        );
        return false;
    }

    let (Some(name), Some(email)) = (payload.user.name.as_deref(), payload.user.email.as_deref())
    else {
        warn!(
            provider = %payload.provider,
            "OAuth callback missing user information"
        );
        return false;
    };

    let Some(username) = canonical_username(payload.provider, name, &payload.profile) else {
        warn!(
            provider = %payload.provider,
            "Provider profile carries no login handle"
        );
        return false;
    };

    let user_info = OAuthUserInfo {
        name: name.to_string(),
        email: email.to_string(),
        image: payload.user.image.clone(),
        username,
    };

    match directory
        .upsert_oauth_account(&user_info, payload.provider, &payload.provider_account_id)
        .await
    {
        Ok(true) => true,
        Ok(false) => {
            error!(
                provider = %payload.provider,
                email = %safe_email_log(email),
                "OAuth signup failed for provider"
            );
            false
        }
        Err(e) => {
            error!(
                error = %e,
                provider = %payload.provider,
                "Unexpected error during OAuth signup"
            );
            false
        }
    }
}
