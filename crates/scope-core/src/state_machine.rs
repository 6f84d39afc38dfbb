//! Editing session lifecycle
//!
//! ```text
//! Uninitialized ──▶ Syncing ──▶ Idle ──▶ Saving ──▶ Idle
//!                     ▲  │        │
//!                     │  ▼        │
//!                     └─ Error ◀──┘ (via Syncing)
//! ```
//!
//! Every inbound project goes through `Syncing`; a sync carrying an error
//! lands in `Error`, which stays editable and leaves on the next sync.

use crate::error::SessionError;
use serde::{Deserialize, Serialize};

/// Lifecycle state of an editing session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// No project received yet
    #[default]
    Uninitialized,
    /// Replacing the working snapshot with an inbound project
    Syncing,
    /// Editable, nothing pending
    Idle,
    /// Save dispatched, awaiting the collaborator
    Saving,
    /// Last sync carried an error; still editable
    Error,
}

impl SessionState {
    /// Whether the form accepts input
    #[inline]
    #[must_use]
    pub fn is_editable(self) -> bool {
        matches!(self, SessionState::Idle | SessionState::Error)
    }
}

/// States reachable from `from`
#[must_use]
pub fn allowed_transitions(from: SessionState) -> Vec<SessionState> {
    use SessionState::*;
    match from {
        Uninitialized => vec![Syncing],
        Syncing => vec![Idle, Error],
        Idle => vec![Syncing, Saving],
        Saving => vec![Idle, Syncing],
        Error => vec![Syncing, Saving],
    }
}

/// Validate a state transition
///
/// # Errors
/// `SessionError::IllegalTransition` if `to` is not reachable from `from`
pub fn validate_transition(from: SessionState, to: SessionState) -> Result<(), SessionError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(SessionError::IllegalTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_state() -> impl Strategy<Value = SessionState> {
        prop_oneof![
            Just(SessionState::Uninitialized),
            Just(SessionState::Syncing),
            Just(SessionState::Idle),
            Just(SessionState::Saving),
            Just(SessionState::Error),
        ]
    }

    #[test]
    fn test_uninitialized_only_syncs() {
        assert!(validate_transition(SessionState::Uninitialized, SessionState::Syncing).is_ok());
        assert!(validate_transition(SessionState::Uninitialized, SessionState::Idle).is_err());
        assert!(validate_transition(SessionState::Uninitialized, SessionState::Saving).is_err());
    }

    #[test]
    fn test_save_loop() {
        assert!(validate_transition(SessionState::Idle, SessionState::Saving).is_ok());
        assert!(validate_transition(SessionState::Saving, SessionState::Idle).is_ok());
        assert!(validate_transition(SessionState::Saving, SessionState::Saving).is_err());
    }

    #[test]
    fn test_error_recovers_through_sync() {
        assert!(validate_transition(SessionState::Error, SessionState::Syncing).is_ok());
        assert!(validate_transition(SessionState::Error, SessionState::Idle).is_err());
        assert!(SessionState::Error.is_editable());
        assert!(!SessionState::Saving.is_editable());
    }

    proptest! {
        #[test]
        fn prop_validation_agrees_with_table(from in any_state(), to in any_state()) {
            let res = validate_transition(from, to);
            prop_assert_eq!(res.is_ok(), allowed_transitions(from).contains(&to));
        }
    }
}
