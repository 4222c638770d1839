//! Sign-in providers and provider-keyed rules

use serde::{Deserialize, Serialize};
use std::fmt;

/// The providers a sign-in attempt can enter through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Credentials,
    Github,
    Google,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Credentials => "credentials",
            Provider::Github => "github",
            Provider::Google => "google",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derives the canonical username for an OAuth sign-in.
///
/// GitHub accounts use the profile's `login` handle; every other provider
/// derives from the display name, lower-cased. The rule is deterministic
/// and keyed on the provider, never guessed from the payload shape.
pub fn canonical_username(
    provider: Provider,
    display_name: &str,
    profile: &serde_json::Value,
) -> Option<String> {
    match provider {
        Provider::Github => profile
            .get("login")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        _ => Some(display_name.to_lowercase()),
    }
}
