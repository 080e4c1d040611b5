//! # llfsm-machine — Machines, Instances, and Arrangements
//!
//! Orchestrates whole machines: a [`Machine`] aggregates an LLFSM graph
//! with its language binding, layout metadata, and boilerplate; a
//! [`MachineArena`] owns machines behind stable handles so that several
//! arrangement instances can share one physical machine without shared
//! mutable references; an [`Arrangement`] is an ordered collection of
//! named [`Instance`]s, assembled through the deterministic
//! instance-name resolution algorithm in [`arrangement`].
//!
//! The [`bundle`] module is the storage adapter for `.machine` and
//! `.arrangement` directory bundles.
//!
//! ## Crate Policy
//!
//! - Structural problems (not a directory, missing manifest) are typed
//!   errors; everything else degrades with a `tracing::warn!` diagnostic
//!   so a load always yields a best-effort model.
//! - Single-threaded by design: loading and resolution are sequential
//!   graph traversals (the generator is a batch pipeline, not a service).

pub mod arena;
pub mod arrangement;
pub mod bundle;
pub mod error;
pub mod instance;
pub mod machine;

pub use arena::MachineArena;
pub use arrangement::{resolve_instances, Arrangement, InstanceDeclaration, Resolution};
pub use error::{MachineError, MachineResult};
pub use instance::Instance;
pub use machine::Machine;
