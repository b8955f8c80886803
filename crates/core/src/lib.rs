//! SemeSmart Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for SemeSmart: the household
//! aggregate, its mutation layer, and the derived views. It is
//! backend-agnostic and defines traits that are implemented by the
//! `semesmart-firebase` and `semesmart-device-store` crates.

pub mod cards;
pub mod challenges;
pub mod constants;
pub mod errors;
pub mod events;
pub mod goals;
pub mod households;
pub mod ids;
pub mod members;
pub mod reports;
pub mod session;
pub mod suggestions;
pub mod transactions;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
