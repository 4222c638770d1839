// src/services/directory.rs
//! Client for the external Directory service that owns User and Account
//! records. This API never persists identities itself; it only reads them
//! and requests OAuth upserts here.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::models::{Account, OAuthUserInfo, User};
use crate::auth::providers::Provider;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("unexpected response status: {0}")]
    BadStatus(StatusCode),

    #[error("malformed response body: {0}")]
    MalformedResponse(String),
}

/// Every Directory response is wrapped in a `{success, data}` envelope.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
struct Envelope<T> {
    success: bool,
    #[serde(default)]
    data: Option<T>,
}

/// Operations the Directory exposes to this service.
///
/// Lookups are pure reads; the OAuth upsert is the one write and is
/// idempotent per `(provider, provider_account_id)` on the Directory side.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Looks up an account by its provider key: an email for the
    /// credentials provider, a provider-native account id otherwise.
    async fn get_account_by_provider(&self, key: &str)
        -> Result<Option<Account>, DirectoryError>;

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, DirectoryError>;

    /// Creates or links the account for a completed provider handshake.
    /// Returns the Directory's success flag.
    async fn upsert_oauth_account(
        &self,
        user_info: &OAuthUserInfo,
        provider: Provider,
        provider_account_id: &str,
    ) -> Result<bool, DirectoryError>;
}

#[derive(Debug, Clone)]
pub struct DirectoryService {
    base_url: String,
    client: Client,
}

impl DirectoryService {
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { base_url, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn unwrap_envelope<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<Option<T>, DirectoryError> {
        let status = resp.status();

        // The Directory reports a plain miss as 404; that is data, not an error
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            warn!(http_status = %status, "Directory returned error status");
            return Err(DirectoryError::BadStatus(status));
        }

        let envelope = resp
            .json::<Envelope<T>>()
            .await
            .map_err(|e| DirectoryError::MalformedResponse(e.to_string()))?;

        if !envelope.success {
            return Ok(None);
        }
        Ok(envelope.data)
    }
}

#[async_trait]
impl Directory for DirectoryService {
    async fn get_account_by_provider(
        &self,
        key: &str,
    ) -> Result<Option<Account>, DirectoryError> {
        debug!("Looking up account by provider key");

        let resp = self
            .client
            .post(self.url("accounts/provider"))
            .json(&serde_json::json!({ "providerAccountId": key }))
            .send()
            .await
            .map_err(|e| DirectoryError::RequestFailed(e.to_string()))?;

        Self::unwrap_envelope::<Account>(resp).await
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, DirectoryError> {
        debug!(user_id = %id, "Looking up user by id");

        let resp = self
            .client
            .get(self.url(&format!("users/{}", id)))
            .send()
            .await
            .map_err(|e| DirectoryError::RequestFailed(e.to_string()))?;

        Self::unwrap_envelope::<User>(resp).await
    }

    async fn upsert_oauth_account(
        &self,
        user_info: &OAuthUserInfo,
        provider: Provider,
        provider_account_id: &str,
    ) -> Result<bool, DirectoryError> {
        debug!(provider = %provider, "Requesting OAuth account upsert");

        let resp = self
            .client
            .post(self.url("auth/oauth"))
            .json(&serde_json::json!({
                "user": user_info,
                "provider": provider,
                "providerAccountId": provider_account_id,
            }))
            .send()
            .await
            .map_err(|e| DirectoryError::RequestFailed(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(http_status = %status, provider = %provider, "OAuth upsert rejected");
            return Err(DirectoryError::BadStatus(status));
        }

        #[derive(Deserialize)]
        struct UpsertResponse {
            success: bool,
        }

        let body = resp
            .json::<UpsertResponse>()
            .await
            .map_err(|e| DirectoryError::MalformedResponse(e.to_string()))?;

        Ok(body.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_account_data() {
        let json = r#"{
            "success": true,
            "data": {
                "userId": "u1",
                "provider": "credentials",
                "providerAccountId": "a@x.com",
                "password": "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$hash"
            }
        }"#;

        let envelope: Envelope<Account> = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        let account = envelope.data.unwrap();
        assert_eq!(account.user_id, "u1");
        assert_eq!(account.provider, Provider::Credentials);
        assert!(account.password_hash.is_some());
    }

    #[test]
    fn test_envelope_miss_has_no_data() {
        let json = r#"{ "success": false, "data": null }"#;
        let envelope: Envelope<Account> = serde_json::from_str(json).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_envelope_tolerates_missing_data_field() {
        let json = r#"{ "success": false }"#;
        let envelope: Envelope<User> = serde_json::from_str(json).unwrap();
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let service = DirectoryService::new("http://localhost:3000/api/".to_string());
        assert_eq!(
            service.url("accounts/provider"),
            "http://localhost:3000/api/accounts/provider"
        );
    }
}
