//! Session event types.

use serde::{Deserialize, Serialize};

/// Events emitted by the session service after successful state changes.
///
/// These are facts about the session and its data. The embedding shell
/// translates them into UI actions (navigate to the app, clear screens,
/// re-render from the new aggregate).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A user signed in (or registered) and their household was adopted.
    SignedIn { user_id: String },

    /// The session ended; all per-user state must be dropped.
    SignedOut,

    /// A mutation committed and the adopted aggregate replaced the previous
    /// one.
    HouseholdChanged,
}

impl SessionEvent {
    /// Creates a SignedIn event.
    pub fn signed_in(user_id: String) -> Self {
        Self::SignedIn { user_id }
    }
}
