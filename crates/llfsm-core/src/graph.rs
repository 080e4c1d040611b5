//! # The LLFSM Graph
//!
//! Canonical, queryable representation of a logic-labelled finite-state
//! machine: states and transitions held in ID-indexed maps, plus explicit
//! order vectors that define the array indices used by generated code.
//!
//! ## Invariants
//!
//! - `states[0]` is the initial state.
//! - The order of `transitions` (filtered per source state) is the priority
//!   order in which guard expressions are evaluated — first match wins.
//! - Every identifier in the order vectors should have a map entry; one that
//!   does not is an *orphan*, reported via [`Llfsm::diagnostics`] and
//!   tolerated everywhere else.
//! - The suspend state, when present, is one of `states`.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::identity::{StateId, TransitionId};

/// A single state of a machine.
///
/// Identity is the UUID; the name is a display/lookup key that must be
/// unique within one machine for generated symbol names not to collide
/// (reported by [`Llfsm::diagnostics`], not enforced here).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    pub id: StateId,
    pub name: String,
}

impl State {
    /// Create a state with a fresh identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: StateId::new(),
            name: name.into(),
        }
    }
}

/// A guard-labelled transition between two states.
///
/// The label is an opaque boolean expression in the target language's
/// syntax; the core threads it through without interpreting it. A `None`
/// target marks a dangling transition — emitters render it as a warning
/// comment and skip the edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub id: TransitionId,
    pub label: String,
    pub source: StateId,
    pub target: Option<StateId>,
}

impl Transition {
    /// Create a transition with a fresh identifier.
    pub fn new(label: impl Into<String>, source: StateId, target: Option<StateId>) -> Self {
        Self {
            id: TransitionId::new(),
            label: label.into(),
            source,
            target,
        }
    }
}

/// A structural finding produced by [`Llfsm::diagnostics`].
///
/// None of these abort generation; they annotate a best-effort output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A state ID listed in `states` with no entry in the state map.
    OrphanedState { index: usize, id: StateId },
    /// A transition ID listed in `transitions` with no entry in the map.
    OrphanedTransition { index: usize, id: TransitionId },
    /// A transition whose target is unresolved.
    DanglingTarget { id: TransitionId, label: String },
    /// A transition whose source is not a state of this machine.
    UnknownSource { id: TransitionId, source: StateId },
    /// Two states share a display name, which collides in generated symbols.
    DuplicateStateName { name: String },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::OrphanedState { index, id } => {
                write!(f, "state at index {index} ({id}) has no definition")
            }
            Diagnostic::OrphanedTransition { index, id } => {
                write!(f, "transition at index {index} ({id}) has no definition")
            }
            Diagnostic::DanglingTarget { id, label } => {
                write!(f, "transition {id} ({label:?}) has no resolved target")
            }
            Diagnostic::UnknownSource { id, source } => {
                write!(f, "transition {id} originates from unknown state {source}")
            }
            Diagnostic::DuplicateStateName { name } => {
                write!(f, "duplicate state name {name:?}")
            }
        }
    }
}

/// A logic-labelled finite-state machine graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Llfsm {
    /// State IDs in canonical index order; index 0 is the initial state.
    pub states: Vec<StateId>,
    /// Transition IDs in declaration order (guard-evaluation priority).
    pub transitions: Vec<TransitionId>,
    /// The distinguished suspend state, if the machine is suspensible.
    pub suspend_state: Option<StateId>,
    /// State definitions by ID.
    pub state_map: HashMap<StateId, State>,
    /// Transition definitions by ID.
    pub transition_map: HashMap<TransitionId, Transition>,
}

impl Llfsm {
    /// An empty machine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a machine from states in index order.
    pub fn from_states(states: Vec<State>) -> Self {
        let order: Vec<StateId> = states.iter().map(|s| s.id).collect();
        let state_map = states.into_iter().map(|s| (s.id, s)).collect();
        Self {
            states: order,
            transitions: Vec::new(),
            suspend_state: None,
            state_map,
            transition_map: HashMap::new(),
        }
    }

    /// The initial state, by convention the first in index order.
    pub fn initial_state(&self) -> Option<StateId> {
        self.states.first().copied()
    }

    /// The canonical index of a state, if it is part of this machine.
    pub fn index_of_state(&self, id: StateId) -> Option<usize> {
        self.states.iter().position(|s| *s == id)
    }

    /// Append a state to the machine, becoming the last in index order.
    pub fn add_state(&mut self, state: State) {
        self.states.push(state.id);
        self.state_map.insert(state.id, state);
    }

    /// Append a transition, becoming lowest-priority for its source state.
    pub fn add_transition(&mut self, transition: Transition) {
        self.transitions.push(transition.id);
        self.transition_map.insert(transition.id, transition);
    }

    /// Outgoing transitions of a state, in declaration order.
    ///
    /// This is a derived view, not stored: a stable filter over all
    /// transitions. The returned order is the priority order in which the
    /// generated guard checks are evaluated — first match wins.
    pub fn transitions_from(&self, state: StateId) -> Vec<TransitionId> {
        self.transitions
            .iter()
            .filter(|t| {
                self.transition_map
                    .get(t)
                    .is_some_and(|transition| transition.source == state)
            })
            .copied()
            .collect()
    }

    /// The display name of a state, if known.
    pub fn state_name(&self, id: StateId) -> Option<&str> {
        self.state_map.get(&id).map(|s| s.name.as_str())
    }

    /// Rename a state by ID, preserving its identity and index.
    ///
    /// An unknown ID is editor-friendly: a new state with that ID is
    /// appended to the index order.
    pub fn set_state_name(&mut self, id: StateId, name: impl Into<String>) {
        let name = name.into();
        if let Some(state) = self.state_map.get_mut(&id) {
            state.name = name;
        } else {
            self.states.push(id);
            self.state_map.insert(id, State { id, name });
        }
    }

    /// The guard label of a transition, if known.
    pub fn label(&self, id: TransitionId) -> Option<&str> {
        self.transition_map.get(&id).map(|t| t.label.as_str())
    }

    /// Relabel a transition by ID, preserving its identity and endpoints.
    ///
    /// An unknown ID synthesizes a new transition whose source is the last
    /// state in index order — or a freshly created "Initial" state if the
    /// machine has no states yet. This permissive default mirrors how an
    /// editor creates a transition before its endpoints are pinned down.
    pub fn set_label(&mut self, id: TransitionId, label: impl Into<String>) {
        let label = label.into();
        if let Some(transition) = self.transition_map.get_mut(&id) {
            transition.label = label;
            return;
        }
        let source = match self.states.last().copied() {
            Some(state) => state,
            None => {
                let initial = State::new("Initial");
                let initial_id = initial.id;
                self.add_state(initial);
                initial_id
            }
        };
        self.transitions.push(id);
        self.transition_map.insert(
            id,
            Transition {
                id,
                label,
                source,
                target: None,
            },
        );
    }

    /// Mark a state as the suspend state, making the machine suspensible.
    pub fn set_suspend_state(&mut self, id: StateId) -> crate::CoreResult<()> {
        if !self.states.contains(&id) {
            return Err(crate::CoreError::SuspendStateNotInMachine(id));
        }
        self.suspend_state = Some(id);
        Ok(())
    }

    /// Whether the machine supports suspend/resume.
    pub fn is_suspensible(&self) -> bool {
        self.suspend_state.is_some()
    }

    /// Structural findings: orphans, dangling targets, duplicate names.
    ///
    /// Ordered deterministically: state orphans in index order, then
    /// transition findings in declaration order, then duplicate names in
    /// first-occurrence order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut findings = Vec::new();
        for (index, id) in self.states.iter().enumerate() {
            if !self.state_map.contains_key(id) {
                findings.push(Diagnostic::OrphanedState { index, id: *id });
            }
        }
        for (index, id) in self.transitions.iter().enumerate() {
            match self.transition_map.get(id) {
                None => findings.push(Diagnostic::OrphanedTransition { index, id: *id }),
                Some(transition) => {
                    if transition.target.is_none() {
                        findings.push(Diagnostic::DanglingTarget {
                            id: *id,
                            label: transition.label.clone(),
                        });
                    }
                    if !self.state_map.contains_key(&transition.source) {
                        findings.push(Diagnostic::UnknownSource {
                            id: *id,
                            source: transition.source,
                        });
                    }
                }
            }
        }
        let mut seen: Vec<&str> = Vec::new();
        let mut reported: Vec<&str> = Vec::new();
        for id in &self.states {
            if let Some(state) = self.state_map.get(id) {
                let name = state.name.as_str();
                if seen.contains(&name) {
                    if !reported.contains(&name) {
                        findings.push(Diagnostic::DuplicateStateName { name: name.into() });
                        reported.push(name);
                    }
                } else {
                    seen.push(name);
                }
            }
        }
        findings
    }
}

impl Eq for Llfsm {}

// HashMap is not Hash; hash entries in a deterministic order so that the
// implementation stays consistent with the derived PartialEq.
impl Hash for Llfsm {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        self.states.hash(hasher);
        self.transitions.hash(hasher);
        self.suspend_state.hash(hasher);
        let mut state_entries: Vec<_> = self.state_map.iter().collect();
        state_entries.sort_by_key(|(id, _)| **id);
        for (id, state) in state_entries {
            id.hash(hasher);
            state.hash(hasher);
        }
        let mut transition_entries: Vec<_> = self.transition_map.iter().collect();
        transition_entries.sort_by_key(|(id, _)| **id);
        for (id, transition) in transition_entries {
            id.hash(hasher);
            transition.hash(hasher);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(machine: &Llfsm) -> u64 {
        let mut hasher = DefaultHasher::new();
        machine.hash(&mut hasher);
        hasher.finish()
    }

    /// Two states Red, Green with a single "timer" transition between them.
    fn traffic_light() -> (Llfsm, StateId, StateId, TransitionId) {
        let red = State::new("Red");
        let green = State::new("Green");
        let (red_id, green_id) = (red.id, green.id);
        let mut machine = Llfsm::from_states(vec![red, green]);
        let transition = Transition::new("timer", red_id, Some(green_id));
        let transition_id = transition.id;
        machine.add_transition(transition);
        (machine, red_id, green_id, transition_id)
    }

    #[test]
    fn two_state_scenario() {
        let (machine, red, green, timer) = traffic_light();
        assert_eq!(machine.states.len(), 2);
        assert_eq!(machine.transitions_from(red), vec![timer]);
        assert_eq!(machine.transitions_from(green), Vec::new());
        assert_eq!(machine.initial_state(), Some(red));
    }

    #[test]
    fn transitions_from_preserves_declaration_order() {
        let source = State::new("Busy");
        let sink = State::new("Idle");
        let (source_id, sink_id) = (source.id, sink.id);
        let mut machine = Llfsm::from_states(vec![source, sink]);
        let first = Transition::new("a", source_id, Some(sink_id));
        let second = Transition::new("b", source_id, Some(sink_id));
        let third = Transition::new("c", source_id, Some(sink_id));
        let expected = vec![first.id, second.id, third.id];
        machine.add_transition(first);
        machine.add_transition(second);
        machine.add_transition(third);
        assert_eq!(machine.transitions_from(source_id), expected);
        // Repeated calls are stable.
        assert_eq!(machine.transitions_from(source_id), expected);
    }

    #[test]
    fn rename_preserves_index_and_referencing_transitions() {
        let (mut machine, red, _green, timer) = traffic_light();
        assert_eq!(machine.index_of_state(red), Some(0));
        machine.set_state_name(red, "Stop");
        assert_eq!(machine.state_name(red), Some("Stop"));
        assert_eq!(machine.index_of_state(red), Some(0));
        assert_eq!(machine.transitions_from(red), vec![timer]);
    }

    #[test]
    fn set_name_for_unknown_id_appends_a_state() {
        let (mut machine, _, _, _) = traffic_light();
        let new_id = StateId::new();
        machine.set_state_name(new_id, "Amber");
        assert_eq!(machine.states.len(), 3);
        assert_eq!(machine.index_of_state(new_id), Some(2));
        assert_eq!(machine.state_name(new_id), Some("Amber"));
    }

    #[test]
    fn set_label_for_unknown_id_synthesizes_from_last_state() {
        let (mut machine, _red, green, _timer) = traffic_light();
        let new_id = TransitionId::new();
        machine.set_label(new_id, "done");
        let transition = machine.transition_map.get(&new_id).unwrap();
        assert_eq!(transition.source, green);
        assert_eq!(transition.target, None);
        assert_eq!(machine.label(new_id), Some("done"));
    }

    #[test]
    fn set_label_on_empty_machine_creates_an_initial_state() {
        let mut machine = Llfsm::new();
        let id = TransitionId::new();
        machine.set_label(id, "go");
        assert_eq!(machine.states.len(), 1);
        let initial = machine.initial_state().unwrap();
        assert_eq!(machine.state_name(initial), Some("Initial"));
        assert_eq!(machine.transition_map.get(&id).unwrap().source, initial);
    }

    #[test]
    fn set_label_on_existing_transition_updates_in_place() {
        let (mut machine, red, _green, timer) = traffic_light();
        machine.set_label(timer, "after(5)");
        assert_eq!(machine.label(timer), Some("after(5)"));
        assert_eq!(machine.transitions.len(), 1);
        assert_eq!(machine.transition_map.get(&timer).unwrap().source, red);
    }

    #[test]
    fn suspend_state_must_be_a_member() {
        let (mut machine, red, _, _) = traffic_light();
        assert!(machine.set_suspend_state(red).is_ok());
        assert!(machine.is_suspensible());
        let outsider = StateId::new();
        assert!(machine.set_suspend_state(outsider).is_err());
    }

    #[test]
    fn diagnostics_report_orphans_without_panicking() {
        let (mut machine, _, _, _) = traffic_light();
        let ghost = StateId::new();
        machine.states.push(ghost);
        let findings = machine.diagnostics();
        assert!(findings
            .iter()
            .any(|d| matches!(d, Diagnostic::OrphanedState { index: 2, id } if *id == ghost)));
    }

    #[test]
    fn diagnostics_report_dangling_targets_and_duplicates() {
        let left = State::new("Twin");
        let right = State::new("Twin");
        let left_id = left.id;
        let mut machine = Llfsm::from_states(vec![left, right]);
        let dangling = Transition::new("true", left_id, None);
        let dangling_id = dangling.id;
        machine.add_transition(dangling);
        let findings = machine.diagnostics();
        assert!(findings
            .iter()
            .any(|d| matches!(d, Diagnostic::DanglingTarget { id, .. } if *id == dangling_id)));
        assert!(findings
            .iter()
            .any(|d| matches!(d, Diagnostic::DuplicateStateName { name } if name == "Twin")));
    }

    #[test]
    fn equal_machines_hash_equal() {
        let (machine, _, _, _) = traffic_light();
        let copy = machine.clone();
        assert_eq!(machine, copy);
        assert_eq!(hash_of(&machine), hash_of(&copy));
    }

    #[test]
    fn renamed_machine_is_not_equal() {
        let (machine, red, _, _) = traffic_light();
        let mut other = machine.clone();
        other.set_state_name(red, "Crimson");
        assert_ne!(machine, other);
    }

    proptest! {
        /// transitions_from never invents transitions and preserves
        /// relative declaration order for arbitrary interleavings.
        #[test]
        fn transitions_from_is_an_order_preserving_filter(assignment in proptest::collection::vec(0usize..3, 0..24)) {
            let a = State::new("A");
            let b = State::new("B");
            let c = State::new("C");
            let ids = [a.id, b.id, c.id];
            let mut machine = Llfsm::from_states(vec![a, b, c]);
            for source in &assignment {
                machine.add_transition(Transition::new("true", ids[*source], Some(ids[0])));
            }
            for (index, state) in ids.iter().enumerate() {
                let filtered = machine.transitions_from(*state);
                let expected: Vec<TransitionId> = machine
                    .transitions
                    .iter()
                    .zip(&assignment)
                    .filter(|(_, source)| **source == index)
                    .map(|(id, _)| *id)
                    .collect();
                prop_assert_eq!(filtered, expected);
            }
        }
    }
}
