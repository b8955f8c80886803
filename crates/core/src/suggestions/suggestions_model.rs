//! Device-local autocomplete suggestion lists.

use serde::{Deserialize, Serialize};

/// The two suggestion lists the transaction form offers.
///
/// Suggestions are a device-local convenience: they live outside the
/// household document, persist across sessions on the same device, and are
/// never synced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SuggestionKind {
    /// Places where expenses happen ("Padaria do João").
    ExpenseLocation,
    /// Where income comes from ("Salário de Ana").
    IncomeSource,
}

impl SuggestionKind {
    /// Key of the list inside the device store. These spellings predate this
    /// implementation and must not change.
    pub fn storage_key(&self) -> &'static str {
        match self {
            SuggestionKind::ExpenseLocation => "transactionLocations",
            SuggestionKind::IncomeSource => "incomeSources",
        }
    }
}
