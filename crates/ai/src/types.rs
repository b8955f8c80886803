//! Shared types for the insight gateway - outbound snapshots and inbound tips.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use semesmart_core::transactions::{Category, Transaction};

// ============================================================================
// Expense Snapshot
// ============================================================================

/// The reduced view of a transaction that is allowed to leave the process.
///
/// Only what the advisor needs to reason about spending: no member identity,
/// dates, payment methods, locations, or card data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseSnapshot {
    pub description: String,
    pub amount: Decimal,
    pub category: Category,
}

impl From<&Transaction> for ExpenseSnapshot {
    fn from(transaction: &Transaction) -> Self {
        Self {
            description: transaction.description.clone(),
            amount: transaction.amount,
            category: transaction.category,
        }
    }
}

// ============================================================================
// Insight
// ============================================================================

/// One short AI-generated savings tip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub description: String,
}

// ============================================================================
// Insight Report
// ============================================================================

/// Outcome of an insight request that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum InsightReport {
    /// The advisor produced tips.
    Ready(Vec<Insight>),
    /// Too few expenses to analyze. Callers show the neutral placeholder
    /// instead of an error.
    NotEnoughData,
}

// ============================================================================
// Tests
// ============================================================================
