//! Firebase project configuration.

use semesmart_core::errors::{Error, Result};

/// Default base URL for the Identity Toolkit (Firebase Auth) REST API.
pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Default base URL for the secure token (refresh) endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";

/// Default base URL for the Firestore REST API.
pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

/// Environment variable holding the Firebase web API key.
pub const ENV_API_KEY: &str = "SEME_FIREBASE_API_KEY";

/// Environment variable holding the Firebase project id.
pub const ENV_PROJECT_ID: &str = "SEME_FIREBASE_PROJECT_ID";

/// Connection settings shared by the auth and Firestore clients.
///
/// The base URLs only change when pointing the app at the local Firebase
/// emulators.
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    /// Web API key of the Firebase project (not a secret).
    pub api_key: String,
    /// Firebase project id, part of every Firestore document path.
    pub project_id: String,
    pub identity_url: String,
    pub token_url: String,
    pub firestore_url: String,
}

impl FirebaseConfig {
    pub fn new(api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
        FirebaseConfig {
            api_key: api_key.into(),
            project_id: project_id.into(),
            identity_url: DEFAULT_IDENTITY_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            firestore_url: DEFAULT_FIRESTORE_URL.to_string(),
        }
    }

    /// Reads the configuration from the environment.
    ///
    /// `SEME_FIREBASE_API_KEY` and `SEME_FIREBASE_PROJECT_ID` are required;
    /// the `*_URL` variables override the Google endpoints for emulator
    /// runs.
    pub fn from_env() -> Result<Self> {
        let api_key = required_env(ENV_API_KEY)?;
        let project_id = required_env(ENV_PROJECT_ID)?;
        let mut config = FirebaseConfig::new(api_key, project_id);
        if let Some(url) = optional_url_env("SEME_FIREBASE_IDENTITY_URL") {
            config.identity_url = url;
        }
        if let Some(url) = optional_url_env("SEME_FIREBASE_TOKEN_URL") {
            config.token_url = url;
        }
        if let Some(url) = optional_url_env("SEME_FIREBASE_FIRESTORE_URL") {
            config.firestore_url = url;
        }
        Ok(config)
    }
}

fn required_env(key: &'static str) -> Result<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::MissingConfigKey(key.to_string()))
}

fn optional_url_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
}
