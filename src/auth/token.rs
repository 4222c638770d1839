//! Token issuance, refresh, and subject binding

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{error, warn};

use super::models::{AccountDescriptor, Claims};
use super::providers::Provider;
use crate::common::safe_email_log;
use crate::services::directory::Directory;

/// Expiry stamp `ttl_hours` from now.
pub fn expiry_timestamp(ttl_hours: i64) -> usize {
    (Utc::now() + Duration::hours(ttl_hours)).timestamp() as usize
}

/// Builds the claim set for a fresh sign-in.
pub fn issue_claims(sub: &str, email: &str, ttl_hours: i64) -> Claims {
    Claims {
        sub: sub.to_string(),
        email: email.to_string(),
        exp: expiry_timestamp(ttl_hours),
    }
}

/// Rewrites the subject claim to the internal user id owning a freshly
/// established account.
///
/// With no descriptor (an ordinary refresh) the claims pass through
/// untouched; the subject is sticky across refreshes. An unresolvable
/// account is a soft failure: logged, claims returned unchanged, no
/// subject fabricated.
pub async fn bind_subject(
    directory: &dyn Directory,
    claims: Claims,
    account: Option<&AccountDescriptor>,
) -> Claims {
    let Some(descriptor) = account else {
        return claims;
    };

    // Credentials accounts are keyed by email, not a provider-assigned id
    let key = match descriptor.provider {
        Provider::Credentials => claims.email.as_str(),
        _ => descriptor.provider_account_id.as_str(),
    };

    match directory.get_account_by_provider(key).await {
        Ok(Some(resolved)) if !resolved.user_id.is_empty() => Claims {
            sub: resolved.user_id,
            ..claims
        },
        Ok(_) => {
            warn!(
                provider = %descriptor.provider,
                email = %safe_email_log(&claims.email),
                "No account found while binding token subject"
            );
            claims
        }
        Err(e) => {
            error!(
                error = %e,
                provider = %descriptor.provider,
                "Directory error while binding token subject"
            );
            claims
        }
    }
}

/// Encodes the claim set as an HS256 JWT.
pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validates a JWT and returns its claims.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(data.claims)
}
