use std::sync::Arc;

use log::debug;

use crate::errors::Result;
use crate::suggestions::suggestions_model::SuggestionKind;
use crate::suggestions::suggestions_traits::SuggestionStoreTrait;

/// Maintains the autocomplete lists offered by the transaction form.
pub struct SuggestionService {
    store: Arc<dyn SuggestionStoreTrait>,
}

impl SuggestionService {
    pub fn new(store: Arc<dyn SuggestionStoreTrait>) -> Self {
        SuggestionService { store }
    }

    /// Current suggestions for the kind, in stored (sorted) order.
    pub fn suggestions(&self, kind: SuggestionKind) -> Result<Vec<String>> {
        self.store.list(kind)
    }

    /// Offers `raw` for the list. Trimmed; blank and already-known values
    /// are not stored. Returns whether the list changed.
    pub fn remember(&self, kind: SuggestionKind, raw: &str) -> Result<bool> {
        let value = raw.trim();
        if value.is_empty() {
            return Ok(false);
        }

        let mut values = self.store.list(kind)?;
        if values.iter().any(|v| v == value) {
            return Ok(false);
        }

        values.push(value.to_string());
        values.sort();
        self.store.save(kind, &values)?;
        debug!(
            "Remembered suggestion '{}' under {}",
            value,
            kind.storage_key()
        );
        Ok(true)
    }
}
