//! Challenges module - saving challenges and their lifecycle.

mod challenges_model;


pub use challenges_model::{default_challenges, Challenge, ChallengeStatus};
