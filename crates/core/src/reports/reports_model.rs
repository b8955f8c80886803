//! Derived-view models for the dashboard and report screens.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transactions::Category;

/// Which slice of the transaction history a computation covers.
///
/// Screens label some figures "this month"; callers pick the scope
/// explicitly instead of relying on a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "camelCase")]
pub enum ReportScope {
    AllTime,
    Month { year: i32, month: u32 },
}

impl ReportScope {
    /// The calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        ReportScope::Month {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            ReportScope::AllTime => true,
            ReportScope::Month { year, month } => {
                date.year() == *year && date.month() == *month
            }
        }
    }
}

/// Income, spending and what is left, over one scope.
///
/// `total_expenses` is reported as an absolute value; `balance` is income
/// minus spending and may be negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
}

/// Absolute spending accumulated for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    pub category: Category,
    pub amount: Decimal,
}

/// Member filter for the transaction list. `All` replaces the UI's `todos`
/// sentinel value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberFilter {
    All,
    Member(String),
}

impl MemberFilter {
    pub fn matches(&self, member_id: &str) -> bool {
        match self {
            MemberFilter::All => true,
            MemberFilter::Member(id) => id == member_id,
        }
    }
}
