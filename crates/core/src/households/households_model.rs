//! Household aggregate: the whole per-family document.
//!
//! Every entity sequence lives inside this one aggregate; there are no
//! per-entity documents. Updates are pure structural transforms that build
//! the next aggregate value, and the mutation layer persists the whole thing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::challenges::{default_challenges, Challenge};
use crate::constants::{DEFAULT_FAMILY_AVATAR, DEFAULT_FAMILY_NAME};
use crate::goals::Goal;
use crate::members::Member;
use crate::transactions::Transaction;

/// The family's shared profile shown in the header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FamilyProfile {
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// The per-family aggregate document.
///
/// Field order matches the stored document layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Household {
    pub family_profile: FamilyProfile,
    pub transactions: Vec<Transaction>,
    pub members: Vec<Member>,
    pub goals: Vec<Goal>,
    pub challenges: Vec<Challenge>,
    pub cards: Vec<Card>,
    pub has_seen_onboarding: bool,
}

impl Household {
    /// Fresh household seeded with the default profile, the challenge
    /// catalog, and a single founding member.
    pub fn bootstrap(first_member: Member) -> Self {
        Household {
            family_profile: FamilyProfile {
                name: DEFAULT_FAMILY_NAME.to_string(),
                avatar: DEFAULT_FAMILY_AVATAR.to_string(),
                created_at: Some(Utc::now()),
            },
            transactions: Vec::new(),
            members: vec![first_member],
            goals: Vec::new(),
            challenges: default_challenges(),
            cards: Vec::new(),
            has_seen_onboarding: false,
        }
    }

    /// The member acting for this device: the first in the sequence.
    pub fn owner(&self) -> Option<&Member> {
        self.members.first()
    }

    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn goal(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn challenge(&self, id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == id)
    }

    // --- Pure structural updates -------------------------------------------

    /// New transactions go to the front: the sequence reads most recent
    /// first.
    pub fn with_transaction(mut self, transaction: Transaction) -> Self {
        self.transactions.insert(0, transaction);
        self
    }

    /// Members append in arrival order; the founding member stays first.
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Replaces the member with the same id, keeping its position. Unknown
    /// ids leave the sequence unchanged.
    pub fn with_member_updated(mut self, member: Member) -> Self {
        if let Some(slot) = self.members.iter_mut().find(|m| m.id == member.id) {
            *slot = member;
        }
        self
    }

    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.goals.push(goal);
        self
    }

    /// Replaces the goal with the same id, keeping its position. Unknown ids
    /// leave the sequence unchanged.
    pub fn with_goal_updated(mut self, goal: Goal) -> Self {
        if let Some(slot) = self.goals.iter_mut().find(|g| g.id == goal.id) {
            *slot = goal;
        }
        self
    }

    pub fn with_card(mut self, card: Card) -> Self {
        self.cards.push(card);
        self
    }

    pub fn with_profile(mut self, profile: FamilyProfile) -> Self {
        self.family_profile = profile;
        self
    }

    /// Moves the challenge one lifecycle step forward. Unknown ids and
    /// completed challenges leave the sequence unchanged.
    pub fn with_challenge_advanced(mut self, challenge_id: &str) -> Self {
        if let Some(challenge) = self.challenges.iter_mut().find(|c| c.id == challenge_id) {
            challenge.status = challenge.status.advance();
        }
        self
    }

    pub fn with_onboarding_seen(mut self) -> Self {
        self.has_seen_onboarding = true;
        self
    }
}
