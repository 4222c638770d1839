//! Credentials sign-in authorization

use tracing::{error, warn};

use super::models::{SignInPayload, User};
use super::password::{verify_password, DUMMY_HASH};
use super::validators::SignInValidator;
use crate::common::{safe_email_log, Validator};
use crate::services::directory::Directory;

/// Authorizes a credentials sign-in attempt against the Directory.
///
/// Every failure branch collapses to `None`: a malformed payload, a missing
/// account, a dangling user reference, and a wrong password are
/// indistinguishable to the caller. The returned projection carries user
/// fields only; the stored hash never leaves this component.
pub async fn authorize_credentials(
    directory: &dyn Directory,
    payload: &SignInPayload,
) -> Option<User> {
    let validation = SignInValidator.validate(payload);
    if !validation.is_valid() {
        warn!(
            error_count = validation.errors.len(),
            "Credentials sign-in rejected: payload failed validation"
        );
        return None;
    }

    let email = payload.email.trim();

    let account = match directory.get_account_by_provider(email).await {
        Ok(Some(account)) => account,
        Ok(None) => {
            warn!(email = %safe_email_log(email), "No account found for email");
            // Burn a verification so the miss costs the same as a mismatch
            let _ = verify_password(DUMMY_HASH, &payload.password);
            return None;
        }
        Err(e) => {
            error!(
                error = %e,
                email = %safe_email_log(email),
                "Directory error resolving account"
            );
            let _ = verify_password(DUMMY_HASH, &payload.password);
            return None;
        }
    };

    let user = match directory.get_user_by_id(&account.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            error!(
                user_id = %account.user_id,
                "Account references a user the Directory does not know"
            );
            let _ = verify_password(DUMMY_HASH, &payload.password);
            return None;
        }
        Err(e) => {
            error!(
                error = %e,
                user_id = %account.user_id,
                "Directory error resolving user"
            );
            let _ = verify_password(DUMMY_HASH, &payload.password);
            return None;
        }
    };

    let Some(stored_hash) = account.password_hash.as_deref() else {
        error!(
            email = %safe_email_log(email),
            "Credentials account has no stored hash"
        );
        let _ = verify_password(DUMMY_HASH, &payload.password);
        return None;
    };

    if !verify_password(stored_hash, &payload.password) {
        warn!(email = %safe_email_log(email), "Invalid password for email");
        return None;
    }

    Some(user)
}
