//! The Objective-C++ (MiCASE) artifact family.
//!
//! Machines render as `FSM::CLM::<Name>` subclasses of `CLMachine`,
//! states as `CLState` subclasses with nested `CLAction` and
//! `CLTransition` subclasses. Transition metadata is embedded in the
//! state headers (`numberOfTransitions`, the `toState` constructor
//! default), which is exactly where the read-side binding recovers it
//! from.

mod arrangement;
mod cmake;
mod machine;
mod state;

use llfsm_core::BoilerplateSection;
use llfsm_machine::{Arrangement, MachineArena};

use crate::c::instance_plans;
use crate::error::CodegenResult;
use crate::output::Artifact;
use crate::plan::EmissionPlan;

/// All Objective-C++ artifacts for one machine, in emission order.
pub fn machine_artifacts(name: &str, machine: &llfsm_machine::Machine) -> Vec<Artifact> {
    let plan = EmissionPlan::new(machine);
    let mut artifacts = vec![
        machine::header(name, &plan),
        machine::source(name, machine, &plan),
    ];
    for (index, state_id) in plan.state_ids.iter().enumerate() {
        let state_name = &plan.state_names[index];
        let transitions = plan.transitions(machine, *state_id);
        artifacts.push(state::header(name, state_name, &transitions));
        artifacts.push(state::source(name, state_name, &transitions));
        for (i, (transition, _)) in state::emitted(&transitions).iter().enumerate() {
            artifacts.push(Artifact::new(
                format!("State_{state_name}_Transition_{i}.expr"),
                transition.expression.clone(),
            ));
        }
        artifacts.extend(state_boilerplate_artifacts(machine, *state_id, state_name));
    }
    artifacts.extend(machine_boilerplate_artifacts(name, machine));
    artifacts.push(cmake::project_fragment(name, &plan));
    artifacts
}

/// All Objective-C++ artifacts for one arrangement.
pub fn arrangement_artifacts(
    name: &str,
    arrangement: &Arrangement,
    arena: &MachineArena,
) -> CodegenResult<Vec<Artifact>> {
    let plans = instance_plans(arrangement, arena)?;
    Ok(vec![
        arrangement::header(name, &plans),
        arrangement::source(name, &plans),
        arrangement::static_header(name),
        arrangement::static_source(name),
        cmake::arrangement_lists(name, &plans),
    ])
}

/// The generated files include these unconditionally, so each section
/// is written even when empty.
fn machine_boilerplate_artifacts(name: &str, machine: &llfsm_machine::Machine) -> Vec<Artifact> {
    [
        (BoilerplateSection::Includes, format!("{name}_Includes.h")),
        (BoilerplateSection::Variables, format!("{name}_Variables.h")),
        (BoilerplateSection::Functions, format!("{name}_Methods.h")),
    ]
    .into_iter()
    .map(|(section, file)| Artifact::new(file, machine.boilerplate.section(section)))
    .collect()
}

fn state_boilerplate_artifacts(
    machine: &llfsm_machine::Machine,
    state: llfsm_core::StateId,
    state_name: &str,
) -> Vec<Artifact> {
    let boilerplate = machine.boilerplate_for(state);
    [
        (BoilerplateSection::Includes, format!("State_{state_name}_Includes.h")),
        (BoilerplateSection::Variables, format!("State_{state_name}_Variables.h")),
        (BoilerplateSection::Functions, format!("State_{state_name}_Methods.h")),
        (BoilerplateSection::OnEntry, format!("State_{state_name}_OnEntry.mm")),
        (BoilerplateSection::OnExit, format!("State_{state_name}_OnExit.mm")),
        (BoilerplateSection::Internal, format!("State_{state_name}_Internal.mm")),
        (BoilerplateSection::OnSuspend, format!("State_{state_name}_OnSuspend.mm")),
        (BoilerplateSection::OnResume, format!("State_{state_name}_OnResume.mm")),
    ]
    .into_iter()
    .map(|(section, file)| Artifact::new(file, boilerplate.section(section)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use llfsm_binding::Binding;
    use llfsm_core::{State, Transition};
    use llfsm_machine::Machine;

    fn counter_machine() -> Machine {
        let mut machine = Machine::new(Binding::ObjCpp);
        machine.llfsm.add_state(State::new("Initial"));
        machine.llfsm.add_state(State::new("CountUp"));
        machine.llfsm.add_state(State::new("SUSPENDED"));
        let initial = machine.llfsm.states[0];
        let count_up = machine.llfsm.states[1];
        let suspended = machine.llfsm.states[2];
        machine
            .llfsm
            .add_transition(Transition::new("after(1)", initial, Some(count_up)));
        machine.llfsm.set_suspend_state(suspended).unwrap();
        machine
    }

    fn find<'a>(artifacts: &'a [Artifact], name: &str) -> &'a Artifact {
        artifacts
            .iter()
            .find(|a| a.name == name)
            .unwrap_or_else(|| panic!("missing artifact {name}"))
    }

    #[test]
    fn emits_the_micase_family() {
        let machine = counter_machine();
        let artifacts = machine_artifacts("Counter", &machine);
        for name in [
            "Counter.h",
            "Counter.mm",
            "State_Initial.h",
            "State_Initial.mm",
            "State_Initial_Transition_0.expr",
            "Counter_Variables.h",
            "Counter_Methods.h",
            "State_CountUp_OnEntry.mm",
            "project.cmake",
        ] {
            find(&artifacts, name);
        }
    }

    #[test]
    fn arrangement_family_includes_static_and_cmake_fragments() {
        let mut arena = MachineArena::new();
        let handle = arena.insert(counter_machine());
        let arrangement = Arrangement::new(vec![llfsm_machine::Instance {
            name: "main".into(),
            type_file: "Counter.machine".into(),
            machine: handle,
        }]);
        let artifacts = arrangement_artifacts("Solo", &arrangement, &arena).unwrap();
        for name in [
            "Arrangement_Solo.h",
            "Arrangement_Solo.mm",
            "Static_Arrangement_Solo.h",
            "Static_Arrangement_Solo.mm",
            "CMakeLists.txt",
        ] {
            find(&artifacts, name);
        }
        let lists = &find(&artifacts, "CMakeLists.txt").contents;
        assert!(lists.contains("add_library(solo_machines STATIC"));
        assert!(lists.contains("${COUNTER_SOURCES}"));
        let accessor = &find(&artifacts, "Static_Arrangement_Solo.mm").contents;
        assert!(accessor.contains("static Arrangement_Solo arrangement;"));
    }

    #[test]
    fn headers_carry_the_micase_markers() {
        let machine = counter_machine();
        let artifacts = machine_artifacts("Counter", &machine);
        let header = &find(&artifacts, "State_Initial.h").contents;
        assert!(header.contains("Transition_0(int toState = 1): CLTransition(toState) {}"));
        assert!(header.contains("virtual int numberOfTransitions() const { return 1; }"));
        let machine_header = &find(&artifacts, "Counter.h").contents;
        assert!(machine_header.contains("class Counter: public CLMachine"));
        assert!(machine_header.contains("virtual int numberOfStates() const { return 3; }"));
        assert!(machine_header.contains("FSM::CLM::Counter *CLM_Create_Counter(int mid, const char *name);"));
        let source = &find(&artifacts, "Counter.mm").contents;
        assert!(source.contains("setSuspendState(_states[2]);"));
    }

    #[test]
    fn generation_is_deterministic() {
        let machine = counter_machine();
        assert_eq!(
            machine_artifacts("Counter", &machine),
            machine_artifacts("Counter", &machine)
        );
    }
}
