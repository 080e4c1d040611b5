//! # llfsm-binding — Read-Side Language Bindings
//!
//! Each target language stores a machine's transitions, suspend marker, and
//! boilerplate differently. This crate abstracts over "how is that
//! information recovered from a stored machine bundle" behind a closed
//! [`Binding`] enum — one variant per known binding, dispatched by `match`.
//! There is no open-ended dynamic dispatch: the set of bindings is fixed,
//! and the [`FormatRegistry`] maps stored format tags onto it.
//!
//! ## Degradation Policy
//!
//! Partially-written machines are a normal condition during incremental
//! editing, so every recovery operation degrades instead of failing:
//!
//! - unreadable transition count → `0`
//! - unreadable guard expression → the always-firing literal `"true"`
//! - out-of-bounds or unreadable target → `None` (unresolved)
//! - no suspend marker → `None` (most machines are not suspensible)
//!
//! Malformed (as opposed to merely missing) sources emit a
//! `tracing::warn!` so that a generation run can be audited afterwards.

mod c;
mod objcpp;
mod registry;
mod vhdl;

use std::path::Path;

use llfsm_core::{Boilerplate, State, StateId};

pub use registry::FormatRegistry;

/// The closed set of read-side language bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// Plain C machines (`Machine_<Name>.c` family).
    C,
    /// Objective-C++ machines (MiCASE `<Name>.mm` family). The default.
    ObjCpp,
    /// VHDL machines (structured `STATE_<name>_Transitions` files).
    Vhdl,
}

impl Binding {
    /// Canonical format tag, as written to a bundle's `Language` file.
    pub fn name(&self) -> &'static str {
        match self {
            Binding::C => "c",
            Binding::ObjCpp => "objc++",
            Binding::Vhdl => "vhdl",
        }
    }

    /// Number of outgoing transitions stored for `state_name`.
    ///
    /// Returns 0 when the underlying source is unreadable or malformed.
    pub fn number_of_transitions(&self, dir: &Path, machine_name: &str, state_name: &str) -> usize {
        match self {
            Binding::C => c::number_of_transitions(dir, state_name),
            Binding::ObjCpp => objcpp::number_of_transitions(dir, state_name),
            Binding::Vhdl => vhdl::number_of_transitions(dir, state_name),
        }
        .unwrap_or_else(|| {
            tracing::debug!(
                machine = machine_name,
                state = state_name,
                "no readable transition count; defaulting to 0"
            );
            0
        })
    }

    /// The guard expression of transition `index` out of `state_name`.
    ///
    /// Returns the always-firing literal `"true"` when unreadable, so that
    /// partially-specified machines still produce runnable code.
    pub fn expression(&self, dir: &Path, machine_name: &str, state_name: &str, index: usize) -> String {
        let recovered = match self {
            Binding::C | Binding::ObjCpp => c::expression(dir, state_name, index),
            Binding::Vhdl => vhdl::expression(dir, state_name, index),
        };
        recovered.unwrap_or_else(|| {
            tracing::debug!(
                machine = machine_name,
                state = state_name,
                transition = index,
                "no readable guard expression; defaulting to \"true\""
            );
            "true".to_string()
        })
    }

    /// The target state of transition `index` out of `state_name`.
    ///
    /// Returns `None` when the stored marker is unreadable or resolves
    /// outside `states` — callers substitute an unresolved target, which
    /// emitters render as a warning comment and skip.
    pub fn target(
        &self,
        dir: &Path,
        machine_name: &str,
        state_name: &str,
        index: usize,
        states: &[State],
    ) -> Option<StateId> {
        let resolved = match self {
            Binding::C => c::target(dir, state_name, index, states),
            Binding::ObjCpp => objcpp::target(dir, state_name, index, states),
            Binding::Vhdl => vhdl::target(dir, state_name, index, states),
        };
        if resolved.is_none() {
            tracing::warn!(
                machine = machine_name,
                state = state_name,
                transition = index,
                "transition target did not resolve; treating as dangling"
            );
        }
        resolved
    }

    /// The stored suspend state, if any.
    ///
    /// `None` is the common, valid configuration — most machines are not
    /// suspensible.
    pub fn suspend_state(&self, dir: &Path, machine_name: &str, states: &[State]) -> Option<StateId> {
        match self {
            Binding::C => c::suspend_state(dir, machine_name, states),
            Binding::ObjCpp => objcpp::suspend_state(dir, machine_name, states),
            Binding::Vhdl => vhdl::suspend_state(states),
        }
    }

    /// Machine-level boilerplate sections.
    pub fn machine_boilerplate(&self, dir: &Path, machine_name: &str) -> Boilerplate {
        match self {
            Binding::C => c::machine_boilerplate(dir, machine_name),
            Binding::ObjCpp => objcpp::machine_boilerplate(dir, machine_name),
            Binding::Vhdl => Boilerplate::new(),
        }
    }

    /// Per-state boilerplate sections (action bodies and declarations).
    pub fn state_boilerplate(&self, dir: &Path, machine_name: &str, state_name: &str) -> Boilerplate {
        match self {
            Binding::C => c::state_boilerplate(dir, state_name),
            Binding::ObjCpp => objcpp::state_boilerplate(dir, state_name),
            Binding::Vhdl => Boilerplate::new(),
        }
    }
}

impl std::fmt::Display for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Read a file to a string, treating any failure as absence.
pub(crate) fn read_file(path: &Path) -> Option<String> {
    std::fs::read_to_string(path).ok()
}

/// Parse the final whitespace-separated token of `line` as an index.
pub(crate) fn trailing_index(line: &str) -> Option<usize> {
    line.split_whitespace().last()?.parse().ok()
}
