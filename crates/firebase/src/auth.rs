//! Identity Toolkit (Firebase Auth) REST client.
//!
//! Covers the three sign-in shapes the app uses (e-mail/password sign-in,
//! account creation, federated credential exchange) plus the secure token
//! refresh. OAuth consent itself happens in the embedding shell; this
//! client only exchanges the resulting credential.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use semesmart_core::errors::{AuthError, Error, Result};
use semesmart_core::session::{
    AuthenticatedUser, FederatedCredential, IdentityProviderTrait, SessionTokens,
};

use crate::config::FirebaseConfig;
use crate::error::map_identity_error;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Shared shape of the `accounts:*` endpoint responses. Each endpoint
/// fills a different subset, so everything but the tokens is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    id_token: String,
    refresh_token: String,
    expires_in: String,
    /// Set by `signInWithIdp` when the e-mail already belongs to an
    /// account with a different sign-in method.
    #[serde(default)]
    need_confirmation: bool,
}

/// Response of the secure token endpoint. Note the snake_case wire names.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    user_id: String,
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

/// REST client for Firebase Authentication.
#[derive(Debug, Clone)]
pub struct FirebaseAuthClient {
    client: reqwest::Client,
    config: FirebaseConfig,
}

impl FirebaseAuthClient {
    pub fn new(config: FirebaseConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// POST one `accounts:{endpoint}` call and parse the response.
    async fn post_identity<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let url = format!(
            "{}/accounts:{}?key={}",
            self.config.identity_url, endpoint, self.config.api_key
        );
        debug!("[FirebaseAuth] POST accounts:{}", endpoint);

        let response = self
            .client
            .post(&url)
            .headers(Self::headers())
            .json(body)
            .send()
            .await
            .map_err(network_error)?;

        Self::parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await.map_err(network_error)?;

        if !status.is_success() {
            return Err(map_identity_error(status, &body));
        }

        // The body carries live tokens, so it is never logged.
        serde_json::from_str(&body).map_err(|e| {
            log::error!("Failed to deserialize auth response: {}", e);
            Error::Unexpected(format!("Failed to parse auth response: {}", e))
        })
    }

    fn into_user(response: SignInResponse) -> Result<AuthenticatedUser> {
        Ok(AuthenticatedUser {
            user_id: response.local_id,
            email: response.email.unwrap_or_default(),
            display_name: response.display_name.filter(|n| !n.is_empty()),
            expires_at: expires_at(&response.expires_in)?,
            id_token: response.id_token,
            refresh_token: response.refresh_token,
        })
    }
}

#[async_trait]
impl IdentityProviderTrait for FirebaseAuthClient {
    /// POST /v1/accounts:signInWithPassword?key=API_KEY
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthenticatedUser> {
        let response: SignInResponse = self
            .post_identity(
                "signInWithPassword",
                &serde_json::json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        Self::into_user(response)
    }

    /// POST /v1/accounts:signUp?key=API_KEY
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser> {
        let response: SignInResponse = self
            .post_identity(
                "signUp",
                &serde_json::json!({
                    "displayName": name,
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        Self::into_user(response)
    }

    /// POST /v1/accounts:signInWithIdp?key=API_KEY
    async fn sign_in_federated(
        &self,
        credential: &FederatedCredential,
    ) -> Result<AuthenticatedUser> {
        let post_body = format!(
            "id_token={}&providerId={}",
            urlencoding::encode(&credential.id_token),
            urlencoding::encode(&credential.provider)
        );
        let response: SignInResponse = self
            .post_identity(
                "signInWithIdp",
                &serde_json::json!({
                    "postBody": post_body,
                    "requestUri": "http://localhost",
                    "returnIdpCredential": true,
                    "returnSecureToken": true,
                }),
            )
            .await?;

        if response.need_confirmation {
            // The e-mail already has an account under a different sign-in
            // method; Firebase wants an explicit account link first.
            return Err(AuthError::AccountConflict.into());
        }
        Self::into_user(response)
    }

    /// POST /v1/token?key=API_KEY (secure token endpoint)
    async fn refresh(&self, refresh_token: &str) -> Result<SessionTokens> {
        let url = format!("{}/token?key={}", self.config.token_url, self.config.api_key);
        debug!("[FirebaseAuth] POST token (refresh)");

        let response = self
            .client
            .post(&url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await
            .map_err(network_error)?;

        let tokens: RefreshResponse = Self::parse_response(response).await?;
        Ok(SessionTokens {
            user_id: tokens.user_id,
            id_token: tokens.id_token,
            refresh_token: tokens.refresh_token,
            expires_at: expires_at(&tokens.expires_in)?,
        })
    }
}

/// The identity endpoints report token lifetimes as second counts in
/// strings ("3600").
fn expires_at(expires_in: &str) -> Result<DateTime<Utc>> {
    let secs: i64 = expires_in
        .trim()
        .parse()
        .map_err(|_| Error::Unexpected(format!("Invalid expiresIn value: {}", expires_in)))?;
    Ok(Utc::now() + chrono::Duration::seconds(secs))
}

/// Transport failures surface as a provider error and pick up the
/// generic pt-BR copy. The request URL embeds the API key, so it is
/// stripped from the message.
fn network_error(e: reqwest::Error) -> Error {
    AuthError::Provider {
        code: "NETWORK_REQUEST_FAILED".to_string(),
        message: e.without_url().to_string(),
    }
    .into()
}
