//! # llfsm-core — Foundational Types for the LLFSM Toolchain
//!
//! This crate is the bedrock of the LLFSM toolchain. It defines the in-memory
//! representation of a logic-labelled finite-state machine: states and
//! transitions with UUID identity, the ordered graph that ties them together,
//! the boilerplate sections injected verbatim into generated code, and the
//! cosmetic layout geometry carried for editor round-trips. Every other crate
//! in the workspace depends on `llfsm-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identity.** `StateId`, `TransitionId`, and
//!    `MachineHandle` are newtypes — you cannot pass a transition identifier
//!    where a state identifier is expected.
//!
//! 2. **Array order is canonical.** `Llfsm::states` and `Llfsm::transitions`
//!    define the index order used by generated code. Maps are lookup aids;
//!    iteration for emission always follows the vectors, never map order.
//!
//! 3. **No sentinel values.** An unresolved transition target is
//!    `Option::None`, not a magic all-zero UUID.
//!
//! 4. **Degrade, don't panic.** An identifier listed in an order vector but
//!    absent from its map is an *orphan* — a reportable diagnostic, never a
//!    crash.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `llfsm-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone`, and implement
//!   `Serialize`/`Deserialize` where they cross a storage boundary.

pub mod boilerplate;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod identity;

// Re-export primary types for ergonomic imports.
pub use boilerplate::{Boilerplate, BoilerplateSection, BOILERPLATE_SECTION_COUNT};
pub use error::{CoreError, CoreResult};
pub use geometry::{MachineLayout, Point2D, StateLayout, TransitionLayout, WindowLayout};
pub use graph::{Diagnostic, Llfsm, State, Transition};
pub use identity::{MachineHandle, StateId, TransitionId};
