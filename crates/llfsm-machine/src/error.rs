//! Machine- and arrangement-level error types.
//!
//! Only *structural* problems surface here: conditions under which the
//! requested operation cannot produce any meaningful result. Degraded
//! inputs (missing per-state sources, orphaned references) are resolved
//! locally with documented defaults and a diagnostic, never an error.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by machine and arrangement operations.
#[derive(Debug, Error)]
pub enum MachineError {
    /// A machine or arrangement bundle path does not name a directory.
    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A machine bundle has no `States` file.
    #[error("machine bundle has no States file: {path}")]
    MissingStatesFile { path: PathBuf },

    /// An arrangement bundle has no `Machines` manifest.
    #[error("arrangement bundle has no Machines manifest: {path}")]
    MissingManifest { path: PathBuf },

    /// An arrangement references a handle that is not in the arena.
    #[error("unknown machine handle: {0}")]
    UnknownHandle(llfsm_core::MachineHandle),

    /// Layout serialization failed.
    #[error("failed to serialize layout: {0}")]
    LayoutSerialize(#[source] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for machine operations.
pub type MachineResult<T> = Result<T, MachineError>;
