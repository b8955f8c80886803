//! Transaction domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Spending category. Stored with the product's pt-BR labels, which are the
/// canonical wire values (the stored document and the UI share them).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Mercado")]
    Mercado,
    #[serde(rename = "Transporte")]
    Transporte,
    #[serde(rename = "Lazer")]
    Lazer,
    #[serde(rename = "Educação")]
    Educacao,
    #[serde(rename = "Contas")]
    Contas,
    #[serde(rename = "Saúde")]
    Saude,
    #[serde(rename = "Dízimo")]
    Dizimo,
    #[serde(rename = "Outros")]
    Outros,
    /// Reserved income category; never valid for an expense.
    #[serde(rename = "Entrada")]
    Entrada,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Mercado => "Mercado",
            Category::Transporte => "Transporte",
            Category::Lazer => "Lazer",
            Category::Educacao => "Educação",
            Category::Contas => "Contas",
            Category::Saude => "Saúde",
            Category::Dizimo => "Dízimo",
            Category::Outros => "Outros",
            Category::Entrada => "Entrada",
        }
    }

    /// The eight categories an expense may carry, in picker order.
    pub fn expense_categories() -> &'static [Category] {
        &[
            Category::Mercado,
            Category::Transporte,
            Category::Lazer,
            Category::Educacao,
            Category::Contas,
            Category::Saude,
            Category::Dizimo,
            Category::Outros,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mercado" => Ok(Category::Mercado),
            "Transporte" => Ok(Category::Transporte),
            "Lazer" => Ok(Category::Lazer),
            "Educação" => Ok(Category::Educacao),
            "Contas" => Ok(Category::Contas),
            "Saúde" => Ok(Category::Saude),
            "Dízimo" => Ok(Category::Dizimo),
            "Outros" => Ok(Category::Outros),
            "Entrada" => Ok(Category::Entrada),
            other => Err(format!("Unknown category: {}", other)),
        }
    }
}

/// How an expense was paid. Wire values are the product's pt-BR labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Cartão de Débito")]
    Debito,
    #[serde(rename = "Crédito à Vista")]
    CreditoAVista,
    #[serde(rename = "Crédito Parcelado")]
    CreditoParcelado,
    #[serde(rename = "Dinheiro")]
    Dinheiro,
    #[serde(rename = "Cartão Benefício")]
    Beneficio,
    #[serde(rename = "PIX")]
    Pix,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Debito => "Cartão de Débito",
            PaymentMethod::CreditoAVista => "Crédito à Vista",
            PaymentMethod::CreditoParcelado => "Crédito Parcelado",
            PaymentMethod::Dinheiro => "Dinheiro",
            PaymentMethod::Beneficio => "Cartão Benefício",
            PaymentMethod::Pix => "PIX",
        }
    }
}

/// Whether a new transaction is money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// Domain model representing one cash movement.
///
/// `amount` is signed: positive for income, negative for expenses. The sign
/// is the single source of truth for direction everywhere downstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: Category,
    pub member_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_source: Option<String>,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

/// Input model for recording a new transaction.
///
/// `amount` is the raw magnitude string as typed; the sign is derived from
/// `kind` during validation, never entered by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub description: String,
    pub amount: String,
    pub date: String,
    pub category: Category,
    pub member_id: String,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub income_source: Option<String>,
}

impl NewTransaction {
    /// Validates the input and builds the [`Transaction`] that will be
    /// persisted under `id`.
    ///
    /// Rules, applied before any network call:
    /// - description and member are required;
    /// - the magnitude must parse as a positive decimal (the expense sign is
    ///   applied here, not by the caller);
    /// - the date must be a calendar date in `YYYY-MM-DD` form;
    /// - income is always categorized `Entrada` and never carries a payment
    ///   method or location; an expense keeps its picked category (which may
    ///   not be `Entrada`), its payment method, and its trimmed location.
    pub fn into_transaction(self, id: String) -> Result<Transaction, ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingField("description".to_string()));
        }
        if self.member_id.trim().is_empty() {
            return Err(ValidationError::MissingField("memberId".to_string()));
        }

        let magnitude = Decimal::from_str(self.amount.trim())
            .map_err(|_| ValidationError::InvalidAmount(self.amount.clone()))?;
        if magnitude <= Decimal::ZERO {
            return Err(ValidationError::InvalidAmount(self.amount.clone()));
        }

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")?;

        let (amount, category, payment_method, location, income_source) = match self.kind {
            TransactionKind::Income => (
                magnitude,
                Category::Entrada,
                None,
                None,
                self.income_source.map(|s| s.trim().to_string()),
            ),
            TransactionKind::Expense => {
                if self.category == Category::Entrada {
                    return Err(ValidationError::InvalidInput(
                        "'Entrada' is not an expense category".to_string(),
                    ));
                }
                (
                    -magnitude,
                    self.category,
                    self.payment_method,
                    Some(self.location.unwrap_or_default().trim().to_string()),
                    None,
                )
            }
        };

        Ok(Transaction {
            id,
            description: self.description,
            amount,
            date,
            category,
            member_id: self.member_id,
            payment_method,
            location,
            income_source,
        })
    }
}
