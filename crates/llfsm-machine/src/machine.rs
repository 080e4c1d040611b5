//! The Machine aggregate.

use std::collections::{BTreeMap, HashMap};

use llfsm_binding::Binding;
use llfsm_core::{
    Boilerplate, Llfsm, StateId, StateLayout, TransitionLayout, WindowLayout,
};

/// A whole machine: the LLFSM graph plus everything needed to regenerate
/// its source artifacts — language binding, layout metadata, and
/// boilerplate at machine and state level.
#[derive(Debug, Clone)]
pub struct Machine {
    /// The binding that authored (and re-emits) this machine.
    pub language: Binding,
    /// The state/transition graph.
    pub llfsm: Llfsm,
    /// Cosmetic per-state geometry, keyed by state name.
    pub state_layout: BTreeMap<String, StateLayout>,
    /// Cosmetic per-transition bezier layout, keyed by transition key.
    pub transition_layout: BTreeMap<String, TransitionLayout>,
    /// Editor window placement, if one was recorded.
    pub window_layout: Option<WindowLayout>,
    /// Machine-level boilerplate sections.
    pub boilerplate: Boilerplate,
    /// Per-state boilerplate sections.
    pub state_boilerplate: HashMap<StateId, Boilerplate>,
    /// Named activities associated with the machine (reserved metadata,
    /// carried through load/store verbatim).
    pub activities: Vec<String>,
}

impl Machine {
    /// An empty machine for the given binding.
    pub fn new(language: Binding) -> Self {
        Self {
            language,
            llfsm: Llfsm::new(),
            state_layout: BTreeMap::new(),
            transition_layout: BTreeMap::new(),
            window_layout: None,
            boilerplate: Boilerplate::new(),
            state_boilerplate: HashMap::new(),
            activities: Vec::new(),
        }
    }

    /// Boilerplate for one state; the empty set if none was recorded.
    pub fn boilerplate_for(&self, state: StateId) -> Boilerplate {
        self.state_boilerplate.get(&state).cloned().unwrap_or_default()
    }

    /// Ensure every state in the graph has a boilerplate entry.
    ///
    /// Called before serialization: absence is filled lazily with empty
    /// boilerplate rather than failing.
    pub fn fill_state_boilerplate(&mut self) {
        for id in &self.llfsm.states {
            self.state_boilerplate.entry(*id).or_default();
        }
    }
}
