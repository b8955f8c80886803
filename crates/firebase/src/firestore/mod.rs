//! Firestore REST document store.

mod client;
mod value;

pub use client::FirestoreClient;
