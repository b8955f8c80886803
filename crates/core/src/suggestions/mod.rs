//! Suggestions module - device-local autocomplete lists.

mod suggestions_model;
mod suggestions_service;
mod suggestions_traits;

#[cfg(test)]
mod suggestions_service_tests;

pub use suggestions_model::SuggestionKind;
pub use suggestions_service::SuggestionService;
pub use suggestions_traits::SuggestionStoreTrait;
