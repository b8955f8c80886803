//! Tests for transaction domain models.

#[cfg(test)]
mod tests {
    use crate::errors::ValidationError;
    use crate::transactions::transactions_model::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn expense_input() -> NewTransaction {
        NewTransaction {
            kind: TransactionKind::Expense,
            description: "Feira da semana".to_string(),
            amount: "50".to_string(),
            date: "2025-03-10".to_string(),
            category: Category::Mercado,
            member_id: "m1".to_string(),
            payment_method: Some(PaymentMethod::Debito),
            location: Some(" Padaria do João ".to_string()),
            income_source: None,
        }
    }

    // ============================================================================
    // Enum wire format
    // ============================================================================

    #[test]
    fn test_category_serializes_with_locale_labels() {
        let json = serde_json::to_string(&Category::Educacao).unwrap();
        assert_eq!(json, r#""Educação""#);
        let json = serde_json::to_string(&Category::Saude).unwrap();
        assert_eq!(json, r#""Saúde""#);
        let json = serde_json::to_string(&Category::Dizimo).unwrap();
        assert_eq!(json, r#""Dízimo""#);
    }

    #[test]
    fn test_category_deserializes_from_locale_labels() {
        let cat: Category = serde_json::from_str(r#""Mercado""#).unwrap();
        assert_eq!(cat, Category::Mercado);
        let cat: Category = serde_json::from_str(r#""Entrada""#).unwrap();
        assert_eq!(cat, Category::Entrada);
    }

    #[test]
    fn test_expense_categories_exclude_entrada() {
        let cats = Category::expense_categories();
        assert_eq!(cats.len(), 8);
        assert!(!cats.contains(&Category::Entrada));
        assert_eq!(cats[0], Category::Mercado);
    }

    #[test]
    fn test_payment_method_serializes_with_locale_labels() {
        let json = serde_json::to_string(&PaymentMethod::Debito).unwrap();
        assert_eq!(json, r#""Cartão de Débito""#);
        let json = serde_json::to_string(&PaymentMethod::CreditoAVista).unwrap();
        assert_eq!(json, r#""Crédito à Vista""#);
        let json = serde_json::to_string(&PaymentMethod::Pix).unwrap();
        assert_eq!(json, r#""PIX""#);
    }

    #[test]
    fn test_transaction_kind_wire_values() {
        assert_eq!(
            serde_json::to_string(&TransactionKind::Income).unwrap(),
            r#""income""#
        );
        assert_eq!(
            serde_json::to_string(&TransactionKind::Expense).unwrap(),
            r#""expense""#
        );
    }

    // ============================================================================
    // Signed-amount derivation
    // ============================================================================

    #[test]
    fn test_expense_amount_is_negated() {
        let tx = expense_input().into_transaction("t1".to_string()).unwrap();
        assert_eq!(tx.amount, dec!(-50));
        assert!(tx.is_expense());
        assert!(!tx.is_income());
    }

    #[test]
    fn test_income_amount_stays_positive_and_category_is_entrada() {
        let input = NewTransaction {
            kind: TransactionKind::Income,
            description: "Salário".to_string(),
            amount: "1000.50".to_string(),
            date: "2025-03-05".to_string(),
            // Picked category is ignored for income.
            category: Category::Mercado,
            member_id: "m1".to_string(),
            payment_method: Some(PaymentMethod::Pix),
            location: Some("loja".to_string()),
            income_source: Some(" Salário de Ana ".to_string()),
        };
        let tx = input.into_transaction("t2".to_string()).unwrap();
        assert_eq!(tx.amount, dec!(1000.50));
        assert_eq!(tx.category, Category::Entrada);
        assert_eq!(tx.payment_method, None);
        assert_eq!(tx.location, None);
        assert_eq!(tx.income_source, Some("Salário de Ana".to_string()));
        assert!(tx.is_income());
    }

    #[test]
    fn test_expense_keeps_trimmed_location_and_drops_income_source() {
        let tx = expense_input().into_transaction("t3".to_string()).unwrap();
        assert_eq!(tx.location, Some("Padaria do João".to_string()));
        assert_eq!(tx.income_source, None);
        assert_eq!(tx.payment_method, Some(PaymentMethod::Debito));
    }

    #[test]
    fn test_expense_without_location_stores_empty_string() {
        let mut input = expense_input();
        input.location = None;
        let tx = input.into_transaction("t4".to_string()).unwrap();
        assert_eq!(tx.location, Some(String::new()));
    }

    #[test]
    fn test_unparsable_amount_is_rejected() {
        let mut input = expense_input();
        input.amount = "abc".to_string();
        let err = input.into_transaction("t5".to_string()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAmount(_)));
    }

    #[test]
    fn test_zero_and_negative_magnitudes_are_rejected() {
        let mut input = expense_input();
        input.amount = "0".to_string();
        assert!(matches!(
            input.into_transaction("t6".to_string()),
            Err(ValidationError::InvalidAmount(_))
        ));

        let mut input = expense_input();
        input.amount = "-10".to_string();
        assert!(matches!(
            input.into_transaction("t7".to_string()),
            Err(ValidationError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_entrada_rejected_as_expense_category() {
        let mut input = expense_input();
        input.category = Category::Entrada;
        assert!(matches!(
            input.into_transaction("t8".to_string()),
            Err(ValidationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_description_and_member_are_rejected() {
        let mut input = expense_input();
        input.description = "  ".to_string();
        assert!(matches!(
            input.into_transaction("t9".to_string()),
            Err(ValidationError::MissingField(_))
        ));

        let mut input = expense_input();
        input.member_id = String::new();
        assert!(matches!(
            input.into_transaction("t10".to_string()),
            Err(ValidationError::MissingField(_))
        ));
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let mut input = expense_input();
        input.date = "10/03/2025".to_string();
        assert!(matches!(
            input.into_transaction("t11".to_string()),
            Err(ValidationError::DateTimeParse(_))
        ));
    }

    // ============================================================================
    // Document wire format
    // ============================================================================

    #[test]
    fn test_transaction_serializes_with_camel_case_fields() {
        let tx = Transaction {
            id: "t100".to_string(),
            description: "Mercado".to_string(),
            amount: dec!(-42.90),
            date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            category: Category::Mercado,
            member_id: "m1".to_string(),
            payment_method: Some(PaymentMethod::CreditoParcelado),
            location: Some("Atacadão".to_string()),
            income_source: None,
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["memberId"], "m1");
        assert_eq!(value["paymentMethod"], "Crédito Parcelado");
        assert_eq!(value["date"], "2025-02-01");
        assert_eq!(value["amount"], serde_json::json!(-42.90));
        // Absent optionals are omitted from the document, not null.
        assert!(value.get("incomeSource").is_none());
    }

    #[test]
    fn test_transaction_roundtrips_through_document_json() {
        let tx = Transaction {
            id: "t101".to_string(),
            description: "Salário".to_string(),
            amount: dec!(3500),
            date: NaiveDate::from_ymd_opt(2025, 2, 5).unwrap(),
            category: Category::Entrada,
            member_id: "m2".to_string(),
            payment_method: None,
            location: None,
            income_source: Some("Salário de Ana".to_string()),
        };
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }
}
