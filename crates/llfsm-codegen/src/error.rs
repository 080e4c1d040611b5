//! Code-generation error types.

use llfsm_core::MachineHandle;
use thiserror::Error;

/// Errors raised during artifact emission.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The requested output language cannot express the requested
    /// artifact family (VHDL has no arrangement form).
    #[error("output format {format} does not support {operation}")]
    UnsupportedOutputFormat {
        format: &'static str,
        operation: &'static str,
    },

    /// The requested format tag names no known output language.
    #[error("unknown output format tag: {tag}")]
    UnknownFormatTag { tag: String },

    /// An arrangement instance references a machine that is not in the
    /// arena.
    #[error("unknown machine handle: {0}")]
    UnknownHandle(MachineHandle),

    /// I/O error while writing artifacts.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for code generation.
pub type CodegenResult<T> = Result<T, CodegenError>;
