//! # Identity Newtypes
//!
//! Newtype wrappers for all identifiers in the LLFSM toolchain.
//! These prevent accidental identifier confusion — you cannot pass a
//! `TransitionId` where a `StateId` is expected, and a `MachineHandle`
//! is an arena index, not a UUID.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a state within a machine.
///
/// Identity is the UUID; the display name of a state is a separate,
/// renameable lookup key. Renaming a state never changes its `StateId`,
/// which is what keeps transitions valid across renames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(pub Uuid);

/// Unique identifier for a transition within a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransitionId(pub Uuid);

/// Stable handle into a [`MachineArena`](https://docs.rs/llfsm-machine).
///
/// Multiple arrangement instances may reference one physical machine.
/// Rather than sharing mutable references, instances hold an arena
/// handle; the arena owns the machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MachineHandle(pub usize);

impl StateId {
    /// Generate a new random state identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl TransitionId {
    /// Generate a new random transition identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl MachineHandle {
    /// The arena slot this handle refers to.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Default for StateId {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for TransitionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "state:{}", self.0)
    }
}

impl std::fmt::Display for TransitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "transition:{}", self.0)
    }
}

impl std::fmt::Display for MachineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "machine:{}", self.0)
    }
}
