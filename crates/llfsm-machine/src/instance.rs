//! Named machine instances.

use std::hash::{Hash, Hasher};

use llfsm_core::MachineHandle;

use crate::arena::MachineArena;

/// One named occurrence of a machine within an arrangement.
///
/// Two instances may share the same `type_file` (the same underlying
/// machine definition) while having distinct names — multiple copies of
/// one FSM type running side by side. Identity is the quadruple
/// `(name, type_file, language, llfsm)`, which requires the arena to
/// evaluate; see [`Instance::same_identity`].
#[derive(Debug, Clone)]
pub struct Instance {
    /// Arrangement-unique instance name.
    pub name: String,
    /// Path of the machine bundle this instance is built from.
    pub type_file: String,
    /// Handle of the (possibly shared) machine in the arena.
    pub machine: MachineHandle,
}

impl Instance {
    /// The machine type name: the bundle file stem without its
    /// `.machine` suffix.
    pub fn type_name(&self) -> &str {
        let stem = self
            .type_file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.type_file.as_str());
        stem.strip_suffix(".machine").unwrap_or(stem)
    }

    /// Identity comparison over `(name, type_file, language, llfsm)`.
    ///
    /// Handles are deliberately excluded: two instances resolved into the
    /// same machine compare equal even if loaded into different arenas.
    pub fn same_identity(&self, other: &Instance, arena: &MachineArena) -> bool {
        if self.name != other.name || self.type_file != other.type_file {
            return false;
        }
        match (arena.get(self.machine), arena.get(other.machine)) {
            (Some(ours), Some(theirs)) => {
                ours.language == theirs.language && ours.llfsm == theirs.llfsm
            }
            (None, None) => true,
            _ => false,
        }
    }

    /// Hash of the same quadruple `same_identity` compares.
    pub fn identity_hash<H: Hasher>(&self, arena: &MachineArena, hasher: &mut H) {
        self.name.hash(hasher);
        self.type_file.hash(hasher);
        if let Some(machine) = arena.get(self.machine) {
            machine.language.name().hash(hasher);
            machine.llfsm.hash(hasher);
        }
    }
}
