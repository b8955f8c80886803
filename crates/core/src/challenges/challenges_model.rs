//! Gamified saving-challenge domain models.

use serde::{Deserialize, Serialize};

/// Lifecycle of a challenge. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeStatus {
    #[default]
    Available,
    Active,
    Completed,
}

impl ChallengeStatus {
    /// The next lifecycle step: accept an available challenge, conclude an
    /// active one. Completed is terminal; there is no way back.
    pub fn advance(self) -> ChallengeStatus {
        match self {
            ChallengeStatus::Available => ChallengeStatus::Active,
            ChallengeStatus::Active => ChallengeStatus::Completed,
            ChallengeStatus::Completed => ChallengeStatus::Completed,
        }
    }
}

/// Domain model representing a saving challenge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub status: ChallengeStatus,
}

/// The challenge catalog seeded into every new household.
pub fn default_challenges() -> Vec<Challenge> {
    vec![
        Challenge {
            id: "c1".to_string(),
            title: "Semana sem delivery".to_string(),
            description: "Cozinhe em casa e economize.".to_string(),
            icon: "🧑‍🍳".to_string(),
            status: ChallengeStatus::Available,
        },
        Challenge {
            id: "c2".to_string(),
            title: "Reduzir lazer em 15%".to_string(),
            description: "Corte R$150 dos gastos com lazer este mês.".to_string(),
            icon: "📉".to_string(),
            status: ChallengeStatus::Active,
        },
        Challenge {
            id: "c3".to_string(),
            title: "Dia de compras consciente".to_string(),
            description: "Vá ao mercado com uma lista e siga-a.".to_string(),
            icon: "🛒".to_string(),
            status: ChallengeStatus::Completed,
        },
    ]
}
