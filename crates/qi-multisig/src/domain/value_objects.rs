//! # Domain Value Objects
//!
//! The multisig session state machine.

use serde::{Deserialize, Serialize};

/// Lifecycle of a multisig session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Accepting bundles, threshold not yet met.
    #[default]
    Collecting,
    /// At least k distinct valid bundles collected; still accepting more.
    Satisfied,
    /// Snapshot taken; the result is immutable.
    Finalized,
}

impl SessionState {
    /// Check if a transition is valid.
    pub fn can_transition_to(&self, next: SessionState) -> bool {
        match (self, next) {
            (Self::Collecting, Self::Satisfied) => true,
            (Self::Satisfied, Self::Finalized) => true,
            // Observing satisfaction again as more signers join is a no-op,
            // not a transition failure.
            (Self::Satisfied, Self::Satisfied) => true,
            _ => false,
        }
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finalized)
    }
}
