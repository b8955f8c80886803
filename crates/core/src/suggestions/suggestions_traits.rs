use crate::errors::Result;
use crate::suggestions::suggestions_model::SuggestionKind;

/// Trait for the device-local suggestion store.
///
/// Implementations persist each list under [`SuggestionKind::storage_key`].
/// A list that was never written reads back empty.
pub trait SuggestionStoreTrait: Send + Sync {
    fn list(&self, kind: SuggestionKind) -> Result<Vec<String>>;
    fn save(&self, kind: SuggestionKind, values: &[String]) -> Result<()>;
}
