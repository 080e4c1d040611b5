//! End-to-end subcommand flows over real directory bundles.

use llfsm_binding::Binding;
use llfsm_cli::generate::{run_generate, GenerateArgs};
use llfsm_cli::validate::{run_validate, ValidateArgs};
use llfsm_core::{State, Transition};
use llfsm_machine::{bundle, Arrangement, Instance, Machine, MachineArena};

fn lights() -> Machine {
    let mut machine = Machine::new(Binding::C);
    machine.llfsm.add_state(State::new("Red"));
    machine.llfsm.add_state(State::new("Green"));
    let red = machine.llfsm.states[0];
    let green = machine.llfsm.states[1];
    machine
        .llfsm
        .add_transition(Transition::new("after(30)", red, Some(green)));
    machine
        .llfsm
        .add_transition(Transition::new("after(25)", green, Some(red)));
    machine
}

#[test]
fn generate_then_validate_a_machine_bundle() {
    let root = tempfile::tempdir().unwrap();
    let bundle_dir = root.path().join("Lights.machine");
    bundle::store_machine(&bundle_dir, &mut lights()).unwrap();

    let generate = GenerateArgs {
        bundle: bundle_dir.clone(),
        format: None,
        output_dir: None,
    };
    assert_eq!(run_generate(&generate).unwrap(), 0);
    assert!(bundle_dir.join("Machine_Lights.c").is_file());
    assert!(bundle_dir.join("State_Red_Transition_0.expr").is_file());

    // The generated bundle reloads cleanly.
    let validate = ValidateArgs { bundle: bundle_dir };
    assert_eq!(run_validate(&validate).unwrap(), 0);
}

#[test]
fn generate_an_arrangement_of_sibling_bundles() {
    let root = tempfile::tempdir().unwrap();
    bundle::store_machine(&root.path().join("Lights.machine"), &mut lights()).unwrap();

    let mut arena = MachineArena::new();
    let handle = arena.insert(lights());
    let arrangement = Arrangement::new(vec![
        Instance {
            name: "north".into(),
            type_file: "Lights.machine".into(),
            machine: handle,
        },
        Instance {
            name: "south".into(),
            type_file: "Lights.machine".into(),
            machine: handle,
        },
    ]);
    let arrangement_dir = root.path().join("Crossing.arrangement");
    bundle::store_arrangement(&arrangement_dir, &arrangement).unwrap();

    let args = GenerateArgs {
        bundle: arrangement_dir,
        format: None,
        output_dir: Some(root.path().join("out")),
    };
    assert_eq!(run_generate(&args).unwrap(), 0);

    let out = root.path().join("out");
    assert!(out.join("Lights.machine/Machine_Lights.h").is_file());
    let family = out.join("Crossing.arrangement");
    assert!(family.join("Arrangement_Crossing.h").is_file());
    assert!(family.join("static_main.c").is_file());
    assert!(family.join("CMakeLists.txt").is_file());
}
