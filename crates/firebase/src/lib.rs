//! SemeSmart Firebase - REST gateways for Firebase Auth and Cloud Firestore.
//!
//! This crate implements the core crate's identity and household-store
//! traits over Firebase's REST surface: the Identity Toolkit for e-mail,
//! password, and federated sign-in, the secure token endpoint for session
//! refresh, and Firestore for the per-user household document.
//!
//! # Usage
//!
//! ```rust,ignore
//! use semesmart_firebase::{FirebaseAuthClient, FirebaseConfig, FirestoreClient};
//!
//! let config = FirebaseConfig::from_env()?;
//! let identity = FirebaseAuthClient::new(config.clone())?;
//! let store = FirestoreClient::new(config)?;
//! let service = SessionService::new(Arc::new(identity), Arc::new(store), events);
//! ```

mod auth;
mod config;
mod error;
mod firestore;

pub use auth::FirebaseAuthClient;
pub use config::{
    FirebaseConfig, DEFAULT_FIRESTORE_URL, DEFAULT_IDENTITY_URL, DEFAULT_TOKEN_URL, ENV_API_KEY,
    ENV_PROJECT_ID,
};
pub use firestore::FirestoreClient;
