//! The VHDL stub emitter.
//!
//! Machines only: structured `STATE_<S>_Transitions` files (one
//! `expression,targetUUID` line per edge, resolvable by the read-side
//! binding) plus a minimal `<Name>.vhd` entity skeleton. Edges with
//! unresolved targets are dropped from the transition files.

use llfsm_machine::Machine;

use crate::names::{lower, upper};
use crate::output::Artifact;
use crate::plan::EmissionPlan;

/// All VHDL artifacts for one machine.
pub fn machine_artifacts(name: &str, machine: &Machine) -> Vec<Artifact> {
    let plan = EmissionPlan::new(machine);
    let mut artifacts = vec![entity_skeleton(name, &plan)];
    for (index, state_id) in plan.state_ids.iter().enumerate() {
        let state_name = &plan.state_names[index];
        let mut text = String::new();
        for transition in plan.transitions(machine, *state_id) {
            let Some(target) = transition.target_index else {
                continue;
            };
            text.push_str(&format!(
                "{},{}\n",
                transition.expression,
                plan.state_ids[target].as_uuid()
            ));
        }
        artifacts.push(Artifact::new(
            format!("STATE_{state_name}_Transitions"),
            text,
        ));
    }
    artifacts
}

fn entity_skeleton(name: &str, plan: &EmissionPlan) -> Artifact {
    let lower_name = lower(name);
    let mut text = String::new();
    text.push_str("-- Automatically created using fsmconvert -- do not change manually!\n");
    text.push_str("library IEEE;\nuse IEEE.std_logic_1164.all;\n\n");
    text.push_str(&format!("entity {name} is\n"));
    text.push_str("    port (\n        clk   : in std_logic;\n        reset : in std_logic\n    );\n");
    text.push_str(&format!("end entity {name};\n\n"));
    text.push_str(&format!("architecture LLFSM of {name} is\n"));
    text.push_str(&format!("    type {lower_name}_state_t is (\n"));
    for (index, state_name) in plan.state_names.iter().enumerate() {
        let separator = if index + 1 == plan.number_of_states() { "" } else { "," };
        text.push_str(&format!("        STATE_{}{separator}\n", upper(state_name)));
    }
    text.push_str("    );\n");
    if let Some(first) = plan.state_names.first() {
        text.push_str(&format!(
            "    signal current_state : {lower_name}_state_t := STATE_{};\n",
            upper(first)
        ));
    }
    text.push_str("begin\n");
    text.push_str("    -- Transition logic is read from the STATE_<name>_Transitions files.\n");
    text.push_str("    process (clk, reset)\n    begin\n");
    if let Some(first) = plan.state_names.first() {
        text.push_str("        if reset = '1' then\n");
        text.push_str(&format!(
            "            current_state <= STATE_{};\n",
            upper(first)
        ));
        text.push_str("        end if;\n");
    }
    text.push_str("    end process;\n");
    text.push_str("end architecture LLFSM;\n");
    Artifact::new(format!("{name}.vhd"), text)
}
