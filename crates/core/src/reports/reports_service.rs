//! Pure aggregations over the transaction history.
//!
//! Everything here is stateless and works on in-memory slices; the numbers
//! feed the dashboard cards, the category chart, and the filtered
//! transaction list.

use rust_decimal::Decimal;

use super::{CashflowSummary, CategorySpending, MemberFilter, ReportScope};
use crate::goals::Goal;
use crate::transactions::Transaction;

/// Sums income and spending over the scope. Sign decides the bucket; the
/// expense total is reported as an absolute value.
pub fn cashflow_summary(transactions: &[Transaction], scope: ReportScope) -> CashflowSummary {
    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    for tx in transactions.iter().filter(|t| scope.contains(t.date)) {
        if tx.amount > Decimal::ZERO {
            total_income += tx.amount;
        } else {
            total_expenses += tx.amount.abs();
        }
    }
    CashflowSummary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
    }
}

/// Absolute expense totals per category, largest first. Categories keep
/// their first-seen order on ties.
pub fn spending_by_category(
    transactions: &[Transaction],
    scope: ReportScope,
) -> Vec<CategorySpending> {
    let mut totals: Vec<CategorySpending> = Vec::new();
    for tx in transactions
        .iter()
        .filter(|t| t.is_expense() && scope.contains(t.date))
    {
        match totals.iter_mut().find(|c| c.category == tx.category) {
            Some(entry) => entry.amount += tx.amount.abs(),
            None => totals.push(CategorySpending {
                category: tx.category,
                amount: tx.amount.abs(),
            }),
        }
    }
    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals
}

/// The transaction list for one member (or everyone), most recent date
/// first. Same-day entries keep their aggregate order.
pub fn transactions_for_member(
    transactions: &[Transaction],
    filter: &MemberFilter,
) -> Vec<Transaction> {
    let mut list: Vec<Transaction> = transactions
        .iter()
        .filter(|t| filter.matches(&t.member_id))
        .cloned()
        .collect();
    list.sort_by(|a, b| b.date.cmp(&a.date));
    list
}

/// The goal the dashboard highlights: the first in the sequence.
pub fn featured_goal(goals: &[Goal]) -> Option<&Goal> {
    goals.first()
}
