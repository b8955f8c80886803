use async_trait::async_trait;
use std::fmt;

use crate::errors::Result;
use crate::households::households_model::Household;
use crate::session::AuthenticatedUser;

/// Opaque revision token of a stored household document.
///
/// Issued by the store on every successful read or write; a later
/// conditional write proves it saw the current document by sending the token
/// back. Callers never inspect the contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision(String);

impl Revision {
    pub fn new(token: impl Into<String>) -> Self {
        Revision(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A household document together with the revision the store issued for it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredHousehold {
    pub household: Household,
    pub revision: Revision,
}

/// Trait for the per-user household document store.
///
/// One document per user. `replace` is conditional: it succeeds only while
/// `expected` is still the current revision, otherwise it fails with
/// `StoreError::RevisionConflict` and the caller re-loads and reapplies.
#[async_trait]
pub trait HouseholdStoreTrait: Send + Sync {
    /// Loads the user's document, or `None` when it was never created.
    async fn load(&self, user: &AuthenticatedUser) -> Result<Option<StoredHousehold>>;

    /// Creates the user's document. Fails with `StoreError::AlreadyExists`
    /// when one is already there.
    async fn create(
        &self,
        user: &AuthenticatedUser,
        household: &Household,
    ) -> Result<StoredHousehold>;

    /// Replaces the whole document if `expected` is still current.
    async fn replace(
        &self,
        user: &AuthenticatedUser,
        household: &Household,
        expected: &Revision,
    ) -> Result<StoredHousehold>;
}
