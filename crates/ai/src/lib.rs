//! SemeSmart AI - financial insight gateway backed by Gemini.
//!
//! This crate turns the household's recent expenses into three short
//! savings tips. It owns the privacy boundary: transactions are reduced to
//! `{description, amount, category}` snapshots before anything leaves the
//! process, and thin data never triggers a request at all.
//!
//! # Architecture
//!
//! - `service`: Threshold, redaction, and result-capping policy
//! - `providers`: The Gemini `generateContent` client and a test stub
//! - `types`: Snapshots, insights, and the report returned to callers
//! - `error`: Typed failures with the user-facing pt-BR copy
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use semesmart_ai::{GeminiInsightProvider, InsightReport, InsightService};
//!
//! let provider = Arc::new(GeminiInsightProvider::from_env()?);
//! let service = InsightService::new(provider);
//!
//! match service.insights_for(household.transactions()).await {
//!     Ok(InsightReport::Ready(insights)) => render_tips(&insights),
//!     Ok(InsightReport::NotEnoughData) => render_placeholder(),
//!     Err(e) => render_notice(e.user_message()),
//! }
//! ```

pub mod error;
pub mod providers;
pub mod service;
pub mod types;

// Re-export main types for convenience
pub use error::InsightError;
pub use providers::{
    GeminiInsightProvider, InsightProviderTrait, StubInsightProvider, DEFAULT_GEMINI_URL,
    ENV_GEMINI_API_KEY, GEMINI_MODEL,
};
pub use service::{
    InsightService, EXPENSE_ANALYSIS_THRESHOLD, MAX_EXPENSES_ANALYZED, MAX_INSIGHTS,
};
pub use types::{ExpenseSnapshot, Insight, InsightReport};
