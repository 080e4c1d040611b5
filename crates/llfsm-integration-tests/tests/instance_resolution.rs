//! Arrangement instance-name resolution scenarios.

use llfsm_binding::Binding;
use llfsm_core::State;
use llfsm_machine::{resolve_instances, InstanceDeclaration, Machine, MachineArena};
use proptest::prelude::*;

fn machine_named(state: &str) -> Machine {
    let mut machine = Machine::new(Binding::ObjCpp);
    machine.llfsm.add_state(State::new(state));
    machine
}

fn declarations(
    arena: &mut MachineArena,
    entries: &[(&str, &str)],
) -> Vec<InstanceDeclaration> {
    entries
        .iter()
        .map(|(name, file)| InstanceDeclaration {
            name: name.to_string(),
            type_file: file.to_string(),
            machine: arena.insert(machine_named("Initial")),
        })
        .collect()
}

#[test]
fn dedup_idempotence_keeps_one_instance() {
    let mut arena = MachineArena::new();
    let decls = declarations(&mut arena, &[("M", "x.machine"), ("M", "x.machine")]);
    let resolution = resolve_instances(&decls);
    assert_eq!(resolution.instances.len(), 1);
    assert_eq!(resolution.instances[0].name, "M");
    assert_eq!(resolution.machine_files, vec!["x.machine"]);
}

#[test]
fn rename_on_collision_probes_with_numeric_suffix() {
    let mut arena = MachineArena::new();
    let decls = declarations(&mut arena, &[("M", "a.machine"), ("M", "b.machine")]);
    let resolution = resolve_instances(&decls);
    let names: Vec<_> = resolution.instances.iter().map(|i| i.name.clone()).collect();
    assert_eq!(names, vec!["M", "M_1"]);
    // Each keeps its own machine.
    assert_ne!(
        resolution.instances[0].machine,
        resolution.instances[1].machine
    );
}

#[test]
fn matching_source_key_reuses_the_original_slot() {
    // [("A", x), ("B", y), ("A", x)]: the third entry finds slot "A"
    // holding its own source key, so it reuses machine x under the
    // original name instead of probing to "A_1".
    let mut arena = MachineArena::new();
    let decls = declarations(
        &mut arena,
        &[("A", "x.machine"), ("B", "y.machine"), ("A", "x.machine")],
    );
    let resolution = resolve_instances(&decls);
    let names: Vec<_> = resolution.instances.iter().map(|i| i.name.clone()).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(resolution.machine_files, vec!["x.machine", "y.machine"]);
}

#[test]
fn probe_chain_advances_past_taken_names() {
    let mut arena = MachineArena::new();
    let decls = declarations(
        &mut arena,
        &[("M", "a.machine"), ("M", "b.machine"), ("M", "c.machine")],
    );
    let resolution = resolve_instances(&decls);
    let names: Vec<_> = resolution.instances.iter().map(|i| i.name.clone()).collect();
    assert_eq!(names, vec!["M", "M_1", "M_2"]);
}

#[test]
fn explicit_suffix_collision_is_probed_past() {
    // "M_1" is already taken by a declared instance before the second
    // "M" needs renaming.
    let mut arena = MachineArena::new();
    let decls = declarations(
        &mut arena,
        &[("M", "a.machine"), ("M_1", "b.machine"), ("M", "c.machine")],
    );
    let resolution = resolve_instances(&decls);
    let names: Vec<_> = resolution.instances.iter().map(|i| i.name.clone()).collect();
    assert_eq!(names, vec!["M", "M_1", "M_2"]);
}

proptest! {
    #[test]
    fn resolved_names_are_always_unique(
        entries in proptest::collection::vec(
            ("[A-C]{1,2}", "[a-c]\\.machine"),
            1..12,
        )
    ) {
        let mut arena = MachineArena::new();
        let refs: Vec<(&str, &str)> = entries
            .iter()
            .map(|(n, f)| (n.as_str(), f.as_str()))
            .collect();
        let decls = declarations(&mut arena, &refs);
        let resolution = resolve_instances(&decls);
        let mut names: Vec<_> = resolution
            .instances
            .iter()
            .map(|i| i.name.clone())
            .collect();
        names.sort();
        names.dedup();
        prop_assert_eq!(names.len(), resolution.instances.len());
    }

    #[test]
    fn resolution_is_idempotent_over_machine_files(
        entries in proptest::collection::vec(
            ("[A-B]{1}", "[a-b]\\.machine"),
            1..8,
        )
    ) {
        let mut arena = MachineArena::new();
        let refs: Vec<(&str, &str)> = entries
            .iter()
            .map(|(n, f)| (n.as_str(), f.as_str()))
            .collect();
        let decls = declarations(&mut arena, &refs);
        let resolution = resolve_instances(&decls);
        let mut files = resolution.machine_files.clone();
        files.sort();
        files.dedup();
        prop_assert_eq!(files.len(), resolution.machine_files.len());
    }
}
