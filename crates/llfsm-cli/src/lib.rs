//! # llfsm-cli — The `llfsmgen` Command-Line Interface
//!
//! ## Subcommands
//!
//! - `generate` — emit source artifacts for a machine or arrangement
//! - `inspect` — print the model recovered from a bundle
//! - `validate` — report structural diagnostics for a bundle
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers; each subcommand
//!   module exposes `<Cmd>Args` and `run_<cmd>(&args) -> anyhow::Result<u8>`
//!   where the returned byte is the process exit code.
//! - Handlers delegate to the domain crates; no model or emitter logic
//!   lives here.

pub mod generate;
pub mod inspect;
pub mod validate;

use std::path::Path;

/// A bundle path names an arrangement when it carries the
/// `.arrangement` suffix or a `Machines` manifest.
pub fn is_arrangement_bundle(path: &Path) -> bool {
    let by_suffix = path
        .file_name()
        .map(|n| n.to_string_lossy().ends_with(".arrangement"))
        .unwrap_or(false);
    by_suffix || path.join("Machines").is_file()
}
