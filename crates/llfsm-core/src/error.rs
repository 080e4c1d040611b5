//! # Core Error Types
//!
//! Structural errors for the core model. Degraded conditions (orphaned
//! references, unresolved targets) are *not* errors — they surface as
//! [`Diagnostic`](crate::graph::Diagnostic) values so that callers can
//! continue with a best-effort result.

use thiserror::Error;

use crate::identity::{StateId, TransitionId};

/// Errors raised by core model operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A state identifier is not present in the machine.
    #[error("unknown state: {0}")]
    UnknownState(StateId),

    /// A transition identifier is not present in the machine.
    #[error("unknown transition: {0}")]
    UnknownTransition(TransitionId),

    /// A suspend state was set that is not one of the machine's states.
    #[error("suspend state {0} is not a state of this machine")]
    SuspendStateNotInMachine(StateId),
}

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_state_display_includes_id() {
        let id = StateId::new();
        let err = CoreError::UnknownState(id);
        assert!(err.to_string().contains(&id.as_uuid().to_string()));
    }
}
