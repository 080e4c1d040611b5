//! Pre-flight resolution shared by all emitters.
//!
//! Every artifact of one machine must agree on the state-to-index
//! mapping, so the plan is computed once: the declaration-ordered state
//! list with orphaned entries dropped, plus per-state transition lists
//! with targets resolved to emitted indices. Orphans and dangling
//! targets are reported here, once, and rendered as warning comments by
//! the emitters.

use std::collections::HashMap;

use llfsm_core::StateId;
use llfsm_machine::Machine;

/// A transition as the emitters see it.
#[derive(Debug, Clone)]
pub struct PlannedTransition {
    /// Guard expression, defaulted to `true` when empty.
    pub expression: String,
    /// Index of the target in the emitted state array, `None` when the
    /// target is missing or dangling.
    pub target_index: Option<usize>,
}

/// Declaration-ordered emission view of one machine.
#[derive(Debug)]
pub struct EmissionPlan {
    pub state_ids: Vec<StateId>,
    pub state_names: Vec<String>,
    index_of: HashMap<StateId, usize>,
}

impl EmissionPlan {
    pub fn new(machine: &Machine) -> Self {
        let mut state_ids = Vec::new();
        let mut state_names = Vec::new();
        let mut index_of = HashMap::new();
        for id in &machine.llfsm.states {
            match machine.llfsm.state_name(*id) {
                Some(name) => {
                    index_of.insert(*id, state_ids.len());
                    state_ids.push(*id);
                    state_names.push(name.to_string());
                }
                None => {
                    tracing::warn!(state = %id, "orphaned state reference skipped");
                }
            }
        }
        Self {
            state_ids,
            state_names,
            index_of,
        }
    }

    pub fn number_of_states(&self) -> usize {
        self.state_ids.len()
    }

    pub fn index_of(&self, id: StateId) -> Option<usize> {
        self.index_of.get(&id).copied()
    }

    /// Index of the suspend state in the emitted array, if any.
    pub fn suspend_index(&self, machine: &Machine) -> Option<usize> {
        let id = machine.llfsm.suspend_state?;
        let index = self.index_of(id);
        if index.is_none() {
            tracing::warn!(state = %id, "suspend state is orphaned; machine emitted as non-suspensible");
        }
        index
    }

    /// The transitions leaving a state, in priority order.
    pub fn transitions(&self, machine: &Machine, state: StateId) -> Vec<PlannedTransition> {
        let mut planned = Vec::new();
        for transition_id in machine.llfsm.transitions_from(state) {
            let Some(transition) = machine.llfsm.transition_map.get(&transition_id) else {
                tracing::warn!(transition = %transition_id, "orphaned transition reference skipped");
                continue;
            };
            let expression = if transition.label.trim().is_empty() {
                "true".to_string()
            } else {
                transition.label.clone()
            };
            let target_index = transition.target.and_then(|target| {
                let index = self.index_of(target);
                if index.is_none() {
                    tracing::warn!(
                        transition = %transition_id,
                        target = %target,
                        "dangling transition target; no check generated"
                    );
                }
                index
            });
            planned.push(PlannedTransition {
                expression,
                target_index,
            });
        }
        planned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llfsm_binding::Binding;
    use llfsm_core::{State, Transition};

    fn two_state_machine() -> (Machine, StateId, StateId) {
        let mut machine = Machine::new(Binding::C);
        machine.llfsm.add_state(State::new("Red"));
        machine.llfsm.add_state(State::new("Green"));
        let red = machine.llfsm.states[0];
        let green = machine.llfsm.states[1];
        (machine, red, green)
    }

    #[test]
    fn indices_follow_declaration_order() {
        let (machine, red, green) = two_state_machine();
        let plan = EmissionPlan::new(&machine);
        assert_eq!(plan.number_of_states(), 2);
        assert_eq!(plan.index_of(red), Some(0));
        assert_eq!(plan.index_of(green), Some(1));
        assert_eq!(plan.state_names, vec!["Red", "Green"]);
    }

    #[test]
    fn empty_guard_defaults_to_true() {
        let (mut machine, red, green) = two_state_machine();
        machine.llfsm.add_transition(Transition::new("", red, Some(green)));
        let plan = EmissionPlan::new(&machine);
        let transitions = plan.transitions(&machine, red);
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].expression, "true");
        assert_eq!(transitions[0].target_index, Some(1));
    }

    #[test]
    fn missing_target_has_no_index() {
        let (mut machine, red, _) = two_state_machine();
        machine.llfsm.add_transition(Transition::new("after(1)", red, None));
        let plan = EmissionPlan::new(&machine);
        let transitions = plan.transitions(&machine, red);
        assert_eq!(transitions[0].target_index, None);
    }

    #[test]
    fn orphaned_suspend_state_is_dropped() {
        let (mut machine, _, green) = two_state_machine();
        machine.llfsm.set_suspend_state(green).unwrap();
        machine.llfsm.state_map.remove(&green);
        let plan = EmissionPlan::new(&machine);
        assert_eq!(plan.number_of_states(), 1);
        assert_eq!(plan.suspend_index(&machine), None);
    }
}
