//! # Validate Subcommand
//!
//! Structural diagnostics for a machine bundle: orphaned references,
//! dangling targets, and duplicate state names. Diagnostics are
//! reported but do not fail the run; only bundle-shape errors (not a
//! directory, missing `States`) produce a non-zero exit.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use llfsm_binding::FormatRegistry;
use llfsm_machine::{bundle, MachineArena};

use crate::is_arrangement_bundle;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to a `.machine` or `.arrangement` bundle.
    pub bundle: PathBuf,
}

pub fn run_validate(args: &ValidateArgs) -> anyhow::Result<u8> {
    let registry = FormatRegistry::standard();
    if is_arrangement_bundle(&args.bundle) {
        let mut arena = MachineArena::new();
        let (arrangement, _) = bundle::load_arrangement(&args.bundle, &registry, &mut arena)
            .with_context(|| format!("loading arrangement {}", args.bundle.display()))?;
        let mut findings = 0usize;
        for instance in &arrangement.instances {
            let Some(machine) = arena.get(instance.machine) else {
                continue;
            };
            for diagnostic in machine.llfsm.diagnostics() {
                println!("{}: {diagnostic}", instance.name);
                findings += 1;
            }
        }
        report(findings);
    } else {
        let machine = bundle::load_machine(&args.bundle, &registry)
            .with_context(|| format!("loading machine {}", args.bundle.display()))?;
        let diagnostics = machine.llfsm.diagnostics();
        for diagnostic in &diagnostics {
            println!("{diagnostic}");
        }
        report(diagnostics.len());
    }
    Ok(0)
}

fn report(findings: usize) {
    if findings == 0 {
        println!("ok");
    } else {
        println!("{findings} finding(s)");
    }
}
