use async_trait::async_trait;

use crate::errors::Result;
use crate::session::session_model::{AuthenticatedUser, FederatedCredential, SessionTokens};

/// Trait for the identity provider.
///
/// Failures surface as `Error::Auth` with the provider code mapped to a
/// stable variant; the session service never inspects raw provider codes.
#[async_trait]
pub trait IdentityProviderTrait: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthenticatedUser>;

    /// Creates the account and records `name` as the identity's display
    /// name.
    async fn register(&self, name: &str, email: &str, password: &str)
        -> Result<AuthenticatedUser>;

    /// Exchanges a federated-provider credential for a session.
    async fn sign_in_federated(
        &self,
        credential: &FederatedCredential,
    ) -> Result<AuthenticatedUser>;

    /// Trades a refresh token for fresh session tokens.
    async fn refresh(&self, refresh_token: &str) -> Result<SessionTokens>;
}
