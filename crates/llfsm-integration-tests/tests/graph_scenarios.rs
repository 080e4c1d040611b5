//! Graph-level contract scenarios across the core and codegen crates.

use llfsm_binding::Binding;
use llfsm_codegen::{generate_machine, OutputLanguage};
use llfsm_core::{Llfsm, State, Transition};
use llfsm_machine::Machine;

#[test]
fn red_green_timer_scenario() {
    let mut llfsm = Llfsm::from_states(vec![State::new("Red"), State::new("Green")]);
    let red = llfsm.states[0];
    let green = llfsm.states[1];
    let timer = Transition::new("timer", red, Some(green));
    let timer_id = timer.id;
    llfsm.add_transition(timer);

    assert_eq!(llfsm.states.len(), 2);
    assert_eq!(llfsm.transitions_from(red), vec![timer_id]);
    assert_eq!(llfsm.transitions_from(green), Vec::new());
    assert_eq!(llfsm.initial_state(), Some(red));
}

#[test]
fn emitted_index_equals_position_in_state_order() {
    let mut machine = Machine::new(Binding::C);
    for name in ["First", "Second", "Third"] {
        machine.llfsm.add_state(State::new(name));
    }
    for (index, id) in machine.llfsm.states.iter().enumerate() {
        assert_eq!(machine.llfsm.index_of_state(*id), Some(index));
    }
    let third = machine.llfsm.states[2];
    machine.llfsm.set_suspend_state(third).unwrap();

    let out = tempfile::tempdir().unwrap();
    generate_machine(out.path(), "Ordered", &machine, OutputLanguage::C).unwrap();
    let source = std::fs::read_to_string(out.path().join("Machine_Ordered.c")).unwrap();
    // The suspend state at position 2 of the state order is wired to
    // index 2 of the emitted state array.
    assert!(source.contains("machine->suspend_state = machine->states[2];"));
}

#[test]
fn rename_preserves_identity_and_transition_endpoints() {
    let mut llfsm = Llfsm::from_states(vec![State::new("Red"), State::new("Green")]);
    let red = llfsm.states[0];
    let green = llfsm.states[1];
    llfsm.add_transition(Transition::new("timer", red, Some(green)));

    llfsm.set_state_name(green, "Go");

    assert_eq!(llfsm.index_of_state(green), Some(1));
    assert_eq!(llfsm.state_name(green), Some("Go"));
    let outgoing = llfsm.transitions_from(red);
    assert_eq!(llfsm.transition_map[&outgoing[0]].target, Some(green));
}

#[test]
fn guard_checks_are_emitted_in_declaration_order() {
    let mut machine = Machine::new(Binding::C);
    machine.llfsm.add_state(State::new("Hub"));
    machine.llfsm.add_state(State::new("Out"));
    let hub = machine.llfsm.states[0];
    let out_state = machine.llfsm.states[1];
    for guard in ["a > 0", "b > 0", "c > 0"] {
        machine
            .llfsm
            .add_transition(Transition::new(guard, hub, Some(out_state)));
    }

    let ids = machine.llfsm.transitions_from(hub);
    let guards: Vec<&str> = ids
        .iter()
        .map(|id| machine.llfsm.transition_map[id].label.as_str())
        .collect();
    assert_eq!(guards, vec!["a > 0", "b > 0", "c > 0"]);

    let out = tempfile::tempdir().unwrap();
    generate_machine(out.path(), "Priority", &machine, OutputLanguage::C).unwrap();
    for (index, guard) in guards.iter().enumerate() {
        let expr = std::fs::read_to_string(
            out.path().join(format!("State_Hub_Transition_{index}.expr")),
        )
        .unwrap();
        assert_eq!(expr.trim_end(), *guard);
    }
    let source = std::fs::read_to_string(out.path().join("State_Hub.c")).unwrap();
    let positions: Vec<usize> = (0..3)
        .map(|i| source.find(&format!("// Transition {i} -> 1")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}
