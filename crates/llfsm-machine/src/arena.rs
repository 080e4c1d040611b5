//! # Machine Arena
//!
//! Owns machines behind stable integer handles. Multiple arrangement
//! instances may refer to one physical machine (the deduplication case of
//! instance-name resolution); rather than sharing mutable references,
//! instances hold a [`MachineHandle`] and all access goes through the
//! arena. Within one generation pass the shared machine is read-mostly:
//! the arena hands out `&Machine` for emission and `&mut Machine` only
//! for editing, so divergent mutation across two references cannot occur.

use llfsm_core::MachineHandle;

use crate::machine::Machine;

/// An append-only store of machines indexed by handle.
#[derive(Debug, Default)]
pub struct MachineArena {
    machines: Vec<Machine>,
}

impl MachineArena {
    /// An empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a machine, returning its stable handle.
    pub fn insert(&mut self, machine: Machine) -> MachineHandle {
        let handle = MachineHandle(self.machines.len());
        self.machines.push(machine);
        handle
    }

    /// The machine behind a handle.
    pub fn get(&self, handle: MachineHandle) -> Option<&Machine> {
        self.machines.get(handle.index())
    }

    /// Mutable access for editing.
    pub fn get_mut(&mut self, handle: MachineHandle) -> Option<&mut Machine> {
        self.machines.get_mut(handle.index())
    }

    /// Number of machines in the arena.
    pub fn len(&self) -> usize {
        self.machines.len()
    }

    /// True if the arena holds no machines.
    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    /// Iterate machines with their handles, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (MachineHandle, &Machine)> {
        self.machines
            .iter()
            .enumerate()
            .map(|(index, machine)| (MachineHandle(index), machine))
    }
}
