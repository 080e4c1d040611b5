//! # Inspect Subcommand
//!
//! Prints the model recovered from a bundle: states in index order,
//! transitions with their guards and targets, the suspend state, and
//! for arrangements the resolved instance list.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use llfsm_binding::FormatRegistry;
use llfsm_machine::{bundle, Machine, MachineArena};

use crate::is_arrangement_bundle;

/// Arguments for the inspect subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to a `.machine` or `.arrangement` bundle.
    pub bundle: PathBuf,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

pub fn run_inspect(args: &InspectArgs) -> anyhow::Result<u8> {
    let registry = FormatRegistry::standard();
    if is_arrangement_bundle(&args.bundle) {
        let mut arena = MachineArena::new();
        let (arrangement, machine_files) =
            bundle::load_arrangement(&args.bundle, &registry, &mut arena)
                .with_context(|| format!("loading arrangement {}", args.bundle.display()))?;
        if args.json {
            let value = serde_json::json!({
                "name": bundle::arrangement_name(&args.bundle),
                "instances": arrangement
                    .instances
                    .iter()
                    .map(|i| serde_json::json!({ "name": i.name, "type": i.type_name() }))
                    .collect::<Vec<_>>(),
                "machineFiles": machine_files,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            println!("arrangement {}", bundle::arrangement_name(&args.bundle));
            for instance in &arrangement.instances {
                println!("  instance {} : {}", instance.name, instance.type_name());
            }
        }
    } else {
        let machine = bundle::load_machine(&args.bundle, &registry)
            .with_context(|| format!("loading machine {}", args.bundle.display()))?;
        let name = bundle::machine_name(&args.bundle);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&machine_json(&name, &machine))?);
        } else {
            print_machine(&name, &machine);
        }
    }
    Ok(0)
}

fn print_machine(name: &str, machine: &Machine) {
    println!("machine {name} ({})", machine.language.name());
    for (index, id) in machine.llfsm.states.iter().enumerate() {
        let state_name = machine.llfsm.state_name(*id).unwrap_or("<orphaned>");
        let suspend = if machine.llfsm.suspend_state == Some(*id) {
            "  [suspend]"
        } else {
            ""
        };
        println!("  state {index}: {state_name}{suspend}");
        for transition_id in machine.llfsm.transitions_from(*id) {
            let Some(transition) = machine.llfsm.transition_map.get(&transition_id) else {
                continue;
            };
            let target = transition
                .target
                .and_then(|t| machine.llfsm.state_name(t))
                .unwrap_or("<unresolved>");
            println!("    if {} -> {target}", transition.label);
        }
    }
}

fn machine_json(name: &str, machine: &Machine) -> serde_json::Value {
    let states: Vec<_> = machine
        .llfsm
        .states
        .iter()
        .enumerate()
        .map(|(index, id)| {
            let transitions: Vec<_> = machine
                .llfsm
                .transitions_from(*id)
                .iter()
                .filter_map(|tid| machine.llfsm.transition_map.get(tid))
                .map(|t| {
                    serde_json::json!({
                        "label": t.label,
                        "target": t.target.and_then(|target| machine.llfsm.state_name(target)),
                    })
                })
                .collect();
            serde_json::json!({
                "index": index,
                "name": machine.llfsm.state_name(*id),
                "suspend": machine.llfsm.suspend_state == Some(*id),
                "transitions": transitions,
            })
        })
        .collect();
    serde_json::json!({
        "name": name,
        "language": machine.language.name(),
        "states": states,
    })
}
