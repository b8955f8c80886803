//! Tests for the suggestion service.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use crate::errors::Result;
    use crate::suggestions::*;

    /// In-memory store standing in for the device file store.
    #[derive(Default)]
    struct MemoryStore {
        lists: Mutex<HashMap<&'static str, Vec<String>>>,
        saves: Mutex<u32>,
    }

    impl SuggestionStoreTrait for MemoryStore {
        fn list(&self, kind: SuggestionKind) -> Result<Vec<String>> {
            Ok(self
                .lists
                .lock()
                .unwrap()
                .get(kind.storage_key())
                .cloned()
                .unwrap_or_default())
        }

        fn save(&self, kind: SuggestionKind, values: &[String]) -> Result<()> {
            self.lists
                .lock()
                .unwrap()
                .insert(kind.storage_key(), values.to_vec());
            *self.saves.lock().unwrap() += 1;
            Ok(())
        }
    }

    fn service() -> (SuggestionService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        (SuggestionService::new(store.clone()), store)
    }

    #[test]
    fn test_remember_trims_sorts_and_persists() {
        let (service, _) = service();
        assert!(service
            .remember(SuggestionKind::ExpenseLocation, " Padaria do João ")
            .unwrap());
        assert!(service
            .remember(SuggestionKind::ExpenseLocation, "Atacadão")
            .unwrap());

        let list = service.suggestions(SuggestionKind::ExpenseLocation).unwrap();
        assert_eq!(list, vec!["Atacadão".to_string(), "Padaria do João".to_string()]);
    }

    #[test]
    fn test_blank_values_are_not_stored() {
        let (service, store) = service();
        assert!(!service.remember(SuggestionKind::IncomeSource, "   ").unwrap());
        assert_eq!(*store.saves.lock().unwrap(), 0);
    }

    #[test]
    fn test_duplicates_are_not_stored_twice() {
        let (service, store) = service();
        assert!(service
            .remember(SuggestionKind::IncomeSource, "Salário")
            .unwrap());
        assert!(!service
            .remember(SuggestionKind::IncomeSource, "Salário")
            .unwrap());
        assert!(!service
            .remember(SuggestionKind::IncomeSource, "  Salário  ")
            .unwrap());
        assert_eq!(*store.saves.lock().unwrap(), 1);
        assert_eq!(
            service.suggestions(SuggestionKind::IncomeSource).unwrap(),
            vec!["Salário".to_string()]
        );
    }

    #[test]
    fn test_lists_are_independent() {
        let (service, _) = service();
        service
            .remember(SuggestionKind::ExpenseLocation, "Mercado Central")
            .unwrap();
        assert!(service
            .suggestions(SuggestionKind::IncomeSource)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_storage_keys_match_legacy_spellings() {
        assert_eq!(
            SuggestionKind::ExpenseLocation.storage_key(),
            "transactionLocations"
        );
        assert_eq!(SuggestionKind::IncomeSource.storage_key(), "incomeSources");
    }
}
