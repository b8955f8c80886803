//! Session domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::households::{Household, Revision};

/// An identity the provider has authenticated, with the tokens needed to
/// act for it.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthenticatedUser {
    pub fn token_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Applies freshly minted tokens, leaving the identity fields alone.
    pub fn with_tokens(mut self, tokens: SessionTokens) -> Self {
        self.id_token = tokens.id_token;
        self.refresh_token = tokens.refresh_token;
        self.expires_at = tokens.expires_at;
        self
    }
}

/// The token bundle a refresh mints. The token endpoint does not echo the
/// profile fields, so this is all a refresh can carry.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub user_id: String,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Registration form input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// The founding member's display name.
    pub name: String,
    /// The founding member's family title ("Pai", "Mãe", ...).
    pub title: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()));
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField("email".to_string()));
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("password".to_string()));
        }
        Ok(())
    }
}

/// A federated-provider credential obtained by the shell's OAuth flow.
#[derive(Debug, Clone)]
pub struct FederatedCredential {
    /// Provider id, e.g. `google.com`.
    pub provider: String,
    /// The provider-issued OAuth id token to exchange.
    pub id_token: String,
}

/// Everything the session holds while a user is signed in.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub user: AuthenticatedUser,
    pub household: Household,
    pub revision: Revision,
}
