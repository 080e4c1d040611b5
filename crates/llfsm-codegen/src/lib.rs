//! # llfsm-codegen — Write-Side Code Emitters
//!
//! Turns an in-memory machine or arrangement into deterministic source
//! artifacts. Three output languages are supported through the
//! [`OutputLanguage`] contract: C (full), Objective-C++ in the MiCASE
//! shape (full), and a VHDL stub. Every emitter iterates strictly over
//! the declaration-ordered state and transition vectors, so generating
//! the same model twice yields byte-identical trees.
//!
//! Generated files cross-reference each other by state index, and the
//! emitters leave the machine-readable markers that the read-side
//! binding scrapers recover the model from. Orphaned references are
//! never fatal: the affected construct is skipped, a warning comment is
//! rendered in its place, and a `tracing::warn!` diagnostic is raised.

pub mod c;
pub mod emit;
pub mod error;
pub mod names;
pub mod objcpp;
pub mod output;
pub mod plan;
pub mod sourcery;
pub mod vhdl;

pub use emit::{generate_arrangement, generate_machine, write_artifacts};
pub use error::{CodegenError, CodegenResult};
pub use output::{Artifact, OutputLanguage};
