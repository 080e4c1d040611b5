//! The C artifact family.
//!
//! A machine bundle contains `Machine_<Name>.h/.c`, one `State_<S>.h/.c`
//! pair per state, the guard `.expr` files, the verbatim boilerplate
//! section files, the shared ringlet runtime `Machine_Common.h/.c`, and
//! a `project.cmake` source list. An arrangement adds
//! `Arrangement_<Name>.h/.c`, the statically allocated variant, a
//! `static_main.c` driver, and a `CMakeLists.txt`.

mod arrangement;
mod cmake;
mod common;
mod machine;
mod state;

use llfsm_core::BoilerplateSection;
use llfsm_machine::{Arrangement, MachineArena};

use crate::error::CodegenResult;
use crate::output::Artifact;
use crate::plan::EmissionPlan;

pub(crate) use arrangement::{distinct_types, instance_plans, InstancePlan};

/// All C artifacts for one machine, in emission order.
pub fn machine_artifacts(name: &str, machine: &llfsm_machine::Machine) -> Vec<Artifact> {
    let plan = EmissionPlan::new(machine);
    let mut artifacts = vec![
        machine::header(name, machine, &plan),
        machine::source(name, machine, &plan),
    ];
    for (index, state_id) in plan.state_ids.iter().enumerate() {
        let state_name = &plan.state_names[index];
        let transitions = plan.transitions(machine, *state_id);
        artifacts.push(state::header(name, state_name, transitions.len()));
        artifacts.push(state::source(name, state_name, &transitions));
        for (i, transition) in transitions.iter().enumerate() {
            artifacts.push(Artifact::new(
                format!("State_{state_name}_Transition_{i}.expr"),
                transition.expression.clone(),
            ));
        }
        artifacts.extend(state_boilerplate_artifacts(machine, *state_id, state_name));
    }
    artifacts.extend(machine_boilerplate_artifacts(name, machine));
    artifacts.push(common::header());
    artifacts.push(common::source());
    artifacts.push(cmake::project_fragment(name, &plan));
    artifacts
}

/// All C artifacts for one arrangement (machine bundles are emitted
/// separately, once per distinct machine).
pub fn arrangement_artifacts(
    name: &str,
    arrangement: &Arrangement,
    arena: &MachineArena,
) -> CodegenResult<Vec<Artifact>> {
    let plans = instance_plans(arrangement, arena)?;
    Ok(vec![
        arrangement::header(name, &plans),
        arrangement::source(name, &plans),
        arrangement::static_header(name, &plans),
        arrangement::static_source(name, &plans),
        arrangement::static_main(name),
        cmake::arrangement_lists(name, &plans),
    ])
}

/// The generated headers include these files unconditionally, so each
/// section is written even when empty.
fn machine_boilerplate_artifacts(name: &str, machine: &llfsm_machine::Machine) -> Vec<Artifact> {
    [
        (BoilerplateSection::Includes, format!("Machine_{name}_Includes.h")),
        (BoilerplateSection::Variables, format!("Machine_{name}_Variables.h")),
        (BoilerplateSection::Functions, format!("Machine_{name}_Functions.h")),
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
