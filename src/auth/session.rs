//! Session projection

use super::models::{Claims, Session, SessionUser};

/// Projects the externally visible session from a validated claim set.
///
/// Total and side-effect free: the subject is copied into `user.id`
/// verbatim, and a claim set with an empty subject projects an empty id
/// rather than failing the session read. Name and image live in the
/// Directory, not in the token, so they are absent here.
pub fn project_session(claims: &Claims) -> Session {
    Session {
        user: SessionUser {
            id: claims.sub.clone(),
            name: None,
            email: if claims.email.is_empty() {
                None
            } else {
                Some(claims.email.clone())
            },
            image: None,
        },
    }
}
