//! Session module - authentication, the active session, and the mutation
//! layer over the signed-in user's household.

mod session_model;
mod session_service;
mod session_traits;

#[cfg(test)]
mod session_service_tests;

pub use session_model::{
    ActiveSession, AuthenticatedUser, FederatedCredential, Registration, SessionTokens,
};
pub use session_service::SessionService;
pub use session_traits::IdentityProviderTrait;
