//! Insight service - decides when the advisor is consulted and with what.

use std::sync::Arc;

use log::debug;

use semesmart_core::transactions::Transaction;

use crate::error::InsightError;
use crate::providers::InsightProviderTrait;
use crate::types::{ExpenseSnapshot, InsightReport};

// ============================================================================
// Constants
// ============================================================================

/// The advisor is consulted only with strictly more expenses than this.
pub const EXPENSE_ANALYSIS_THRESHOLD: usize = 5;

/// Most recent expenses included in one request.
pub const MAX_EXPENSES_ANALYZED: usize = 30;

/// Tips kept from one response.
pub const MAX_INSIGHTS: usize = 3;

// ============================================================================
// Insight Service
// ============================================================================

/// Gatekeeper in front of the insight provider.
///
/// Filters the aggregate down to expenses, refuses to bother the advisor with
/// thin data, redacts what does go out, and caps what comes back.
pub struct InsightService {
    provider: Arc<dyn InsightProviderTrait>,
}

impl InsightService {
    pub fn new(provider: Arc<dyn InsightProviderTrait>) -> Self {
        Self { provider }
    }

    /// Generate savings tips for the given transactions.
    ///
    /// Only expenses count toward the threshold, and only the most recent
    /// [`MAX_EXPENSES_ANALYZED`] of them leave the process, reduced to
    /// description, amount, and category. Transactions are expected in the
    /// aggregate's order, most recent first.
    pub async fn insights_for(
        &self,
        transactions: &[Transaction],
    ) -> Result<InsightReport, InsightError> {
        let mut snapshots: Vec<ExpenseSnapshot> = transactions
            .iter()
            .filter(|transaction| transaction.is_expense())
            .map(ExpenseSnapshot::from)
            .collect();

        if snapshots.len() <= EXPENSE_ANALYSIS_THRESHOLD {
            debug!(
                "[Insights] {} expenses on file, not enough to consult the advisor",
                snapshots.len()
            );
            return Ok(InsightReport::NotEnoughData);
        }

        snapshots.truncate(MAX_EXPENSES_ANALYZED);

        let mut insights = self.provider.generate_insights(&snapshots).await?;
        insights.truncate(MAX_INSIGHTS);
        Ok(InsightReport::Ready(insights))
    }
}

// ============================================================================
// Tests
// ============================================================================
