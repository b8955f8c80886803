//! SemeSmart Device Store - file-backed persistence for device-local data.
//!
//! The household document lives in Firestore; this crate covers the one
//! thing that deliberately does not: the autocomplete suggestion lists the
//! transaction form builds up per device. They are stored in a single JSON
//! file and exposed through `semesmart-core`'s `SuggestionStoreTrait`.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use semesmart_core::suggestions::{SuggestionKind, SuggestionService};
//! use semesmart_device_store::FileSuggestionStore;
//!
//! let store = Arc::new(FileSuggestionStore::new(data_dir.join("suggestions.json")));
//! let suggestions = SuggestionService::new(store);
//!
//! suggestions.remember(SuggestionKind::ExpenseLocation, "Padaria do João")?;
//! let locations = suggestions.suggestions(SuggestionKind::ExpenseLocation)?;
//! ```

mod store;

pub use store::FileSuggestionStore;
