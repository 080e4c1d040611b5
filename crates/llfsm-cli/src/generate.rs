//! # Generate Subcommand
//!
//! Emits the source artifact family for a machine or arrangement
//! bundle. The output language defaults to the bundle's `Language`
//! marker and can be overridden with `--format`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use llfsm_binding::FormatRegistry;
use llfsm_codegen::{generate_machine, OutputLanguage};
use llfsm_machine::{bundle, MachineArena};

use crate::is_arrangement_bundle;

/// Arguments for the generate subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to a `.machine` or `.arrangement` bundle.
    pub bundle: PathBuf,

    /// Output language (c, objc++, vhdl). Defaults to the bundle's
    /// language marker.
    #[arg(long)]
    pub format: Option<String>,

    /// Directory to generate into. Defaults to generating in place.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

pub fn run_generate(args: &GenerateArgs) -> anyhow::Result<u8> {
    let registry = FormatRegistry::standard();
    if is_arrangement_bundle(&args.bundle) {
        let mut arena = MachineArena::new();
        let (arrangement, machine_files) =
            bundle::load_arrangement(&args.bundle, &registry, &mut arena)
                .with_context(|| format!("loading arrangement {}", args.bundle.display()))?;
        let name = bundle::arrangement_name(&args.bundle);
        let language = match &args.format {
            Some(tag) => OutputLanguage::parse(tag)?,
            None => arrangement_language(&arrangement, &arena),
        };
        let output_dir = match &args.output_dir {
            Some(dir) => dir.clone(),
            None => args
                .bundle
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        let written = llfsm_codegen::generate_arrangement(
            &output_dir,
            &name,
            &arrangement,
            &arena,
            &machine_files,
            language,
        )?;
        println!(
            "generated {} files for arrangement {name} ({} machines, {} instances)",
            written.len(),
            machine_files.len(),
            arrangement.instances.len()
        );
    } else {
        let machine = bundle::load_machine(&args.bundle, &registry)
            .with_context(|| format!("loading machine {}", args.bundle.display()))?;
        let name = bundle::machine_name(&args.bundle);
        let language = match &args.format {
            Some(tag) => OutputLanguage::parse(tag)?,
            None => OutputLanguage::for_binding(machine.language),
        };
        let output_dir = match &args.output_dir {
            Some(dir) => dir.join(format!("{name}.machine")),
            None => args.bundle.clone(),
        };
        let written = generate_machine(&output_dir, &name, &machine, language)?;
        println!("generated {} files for machine {name}", written.len());
    }
    Ok(0)
}

/// The language shared by the arrangement's machines; the first
/// instance decides when they disagree.
fn arrangement_language(
    arrangement: &llfsm_machine::Arrangement,
    arena: &MachineArena,
) -> OutputLanguage {
    arrangement
        .instances
        .first()
        .and_then(|instance| arena.get(instance.machine))
        .map(|machine| OutputLanguage::for_binding(machine.language))
        .unwrap_or(OutputLanguage::ObjCpp)
}
