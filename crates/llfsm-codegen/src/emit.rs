//! Artifact emission to the filesystem.

use std::path::{Path, PathBuf};

use llfsm_machine::arrangement::with_machine_suffix;
use llfsm_machine::{Arrangement, Machine, MachineArena};

use crate::error::{CodegenError, CodegenResult};
use crate::output::{Artifact, OutputLanguage};

/// Write artifacts into a directory, creating it as needed. Returns the
/// written paths in emission order.
pub fn write_artifacts(dir: &Path, artifacts: &[Artifact]) -> CodegenResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = dir.join(&artifact.name);
        std::fs::write(&path, &artifact.contents)?;
        written.push(path);
    }
    Ok(written)
}

/// Generate one machine's artifact family into its bundle directory.
pub fn generate_machine(
    bundle_dir: &Path,
    name: &str,
    machine: &Machine,
    language: OutputLanguage,
) -> CodegenResult<Vec<PathBuf>> {
    let artifacts = language.machine_artifacts(name, machine);
    tracing::debug!(machine = name, files = artifacts.len(), format = language.name(), "generating machine");
    write_artifacts(bundle_dir, &artifacts)
}

/// Generate an arrangement: each distinct machine bundle once, then the
/// arrangement artifacts.
///
/// `machine_files` is the de-duplicated bundle list produced by instance
/// resolution; machines reached through several instances are emitted a
/// single time.
pub fn generate_arrangement(
    output_dir: &Path,
    name: &str,
    arrangement: &Arrangement,
    arena: &MachineArena,
    machine_files: &[String],
    language: OutputLanguage,
) -> CodegenResult<Vec<PathBuf>> {
    let mut written = Vec::new();
    for machine_file in machine_files {
        let instance = arrangement
            .instances
            .iter()
            .find(|i| with_machine_suffix(&i.type_file) == *machine_file);
        let Some(instance) = instance else {
            tracing::warn!(file = machine_file, "machine file has no remaining instance; skipping");
            continue;
        };
        let machine = arena
            .get(instance.machine)
            .ok_or(CodegenError::UnknownHandle(instance.machine))?;
        let bundle_dir = output_dir.join(machine_file);
        written.extend(generate_machine(
            &bundle_dir,
            instance.type_name(),
            machine,
            language,
        )?);
    }
    let artifacts = language.arrangement_artifacts(name, arrangement, arena)?;
    let bundle_dir = output_dir.join(format!("{name}.arrangement"));
    written.extend(write_artifacts(&bundle_dir, &artifacts)?);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use llfsm_binding::Binding;
    use llfsm_core::State;
    use llfsm_machine::Instance;

    fn light_machine() -> Machine {
        let mut machine = Machine::new(Binding::C);
        machine.llfsm.add_state(State::new("Red"));
        machine.llfsm.add_state(State::new("Green"));
        machine
    }

    #[test]
    fn writes_every_artifact() {
        let out = tempfile::tempdir().unwrap();
        let bundle = out.path().join("Lights.machine");
        let machine = light_machine();
        let written = generate_machine(&bundle, "Lights", &machine, OutputLanguage::C).unwrap();
        assert!(!written.is_empty());
        for path in &written {
            assert!(path.is_file(), "missing {}", path.display());
        }
        assert!(bundle.join("Machine_Lights.h").is_file());
        assert!(bundle.join("State_Red.c").is_file());
    }

    #[test]
    fn double_generation_is_byte_identical() {
        let out = tempfile::tempdir().unwrap();
        let bundle = out.path().join("Lights.machine");
        let machine = light_machine();
        generate_machine(&bundle, "Lights", &machine, OutputLanguage::C).unwrap();
        let first = std::fs::read(bundle.join("Machine_Lights.c")).unwrap();
        generate_machine(&bundle, "Lights", &machine, OutputLanguage::C).unwrap();
        let second = std::fs::read(bundle.join("Machine_Lights.c")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn arrangement_emits_shared_machines_once() {
        let out = tempfile::tempdir().unwrap();
        let mut arena = MachineArena::new();
        let handle = arena.insert(light_machine());
        let arrangement = Arrangement::new(vec![
            Instance {
                name: "first".into(),
                type_file: "Lights.machine".into(),
                machine: handle,
            },
            Instance {
                name: "second".into(),
                type_file: "Lights.machine".into(),
                machine: handle,
            },
        ]);
        let machine_files = vec!["Lights.machine".to_string()];
        generate_arrangement(
            out.path(),
            "Pair",
            &arrangement,
            &arena,
            &machine_files,
            OutputLanguage::C,
        )
        .unwrap();
        assert!(out.path().join("Lights.machine/Machine_Lights.h").is_file());
        let arrangement_header = out.path().join("Pair.arrangement/Arrangement_Pair.h");
        let text = std::fs::read_to_string(arrangement_header).unwrap();
        assert!(text.contains("#define ARRANGEMENT_PAIR_NUMBER_OF_INSTANCES 2"));
        assert!(text.contains("#define ARRANGEMENT_PAIR_FIRST_INDEX 0"));
        assert!(text.contains("#define ARRANGEMENT_PAIR_SECOND_INDEX 1"));
        assert!(text.contains("struct Machine_Lights *fsm_first;"));
        assert!(text.contains("struct Machine_Lights *fsm_second;"));
    }
}
