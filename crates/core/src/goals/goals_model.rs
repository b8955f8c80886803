//! Savings goal domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ValidationError;

/// Domain model representing a family savings goal.
///
/// `deadline` is kept as the raw stored string: documents written over time
/// hold either a plain `YYYY-MM-DD` date, a full ISO timestamp, or an empty
/// string for "no deadline".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub illustration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

impl Goal {
    /// Progress toward the target in percent, uncapped (over-saving reads
    /// above 100). A zero target reads as 0 rather than dividing.
    pub fn progress_percent(&self) -> Decimal {
        if self.target_amount.is_zero() {
            return Decimal::ZERO;
        }
        self.current_amount / self.target_amount * Decimal::ONE_HUNDRED
    }
}

/// Input model for creating a goal. The saved amount always starts at zero;
/// only an edit can move it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    pub target_amount: String,
    pub illustration: String,
    #[serde(default)]
    pub deadline: Option<String>,
}

impl NewGoal {
    pub fn into_goal(self, id: String) -> Result<Goal, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()));
        }
        let target_amount = Decimal::from_str(self.target_amount.trim())
            .map_err(|_| ValidationError::InvalidAmount(self.target_amount.clone()))?;
        Ok(Goal {
            id,
            name: self.name,
            target_amount,
            current_amount: Decimal::ZERO,
            illustration: self.illustration,
            deadline: self.deadline.filter(|d| !d.trim().is_empty()),
        })
    }
}

/// Save request for the goals screen. Create and edit are distinct
/// operations; the id is the tag, never inferred from payload shape.
#[derive(Debug, Clone)]
pub enum GoalUpsert {
    Create(NewGoal),
    Edit(Goal),
}
