//! Payment card domain models.

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Card network. Wire values are lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardIssuer {
    Visa,
    Mastercard,
    Elo,
    Amex,
    #[default]
    Other,
}

/// Domain model representing a registered payment card. Only the last four
/// digits are ever stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub name: String,
    pub last4: String,
    pub issuer: CardIssuer,
}

/// Input model for registering a card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
    pub name: String,
    pub last4: String,
    #[serde(default)]
    pub issuer: CardIssuer,
}

impl NewCard {
    /// `last4` must be exactly four ASCII digits; the name must be present.
    pub fn into_card(self, id: String) -> Result<Card, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()));
        }
        if self.last4.len() != 4 || !self.last4.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidCardDigits(self.last4));
        }
        Ok(Card {
            id,
            name: self.name,
            last4: self.last4,
            issuer: self.issuer,
        })
    }
}
