//! # Auth Module
//!
//! Reconciles credentials and OAuth sign-ins against the Directory's user
//! identities and issues tokens whose subject is always the internal user
//! id:
//! - Credentials authorization (validate, resolve, verify)
//! - OAuth account linking with provider-keyed canonical usernames
//! - Token subject binding and refresh
//! - Session projection and the SessionClaims extractor

pub mod credentials;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod oauth;
pub mod password;
pub mod providers;
pub mod routes;
pub mod session;
pub mod token;
pub mod validators;


pub use extractors::SessionClaims;
pub use models::{Claims, Session, User};
pub use providers::Provider;
pub use routes::auth_routes;
