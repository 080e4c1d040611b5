//! # Directory-Bundle Storage Adapter
//!
//! Machines and arrangements persist as directory bundles:
//!
//! - `<Name>.machine/` — a `States` file (newline-separated names, first
//!   line is the initial state), a `Language` marker, an optional
//!   `Layout.json`, an optional `Activities` file, boilerplate section
//!   files named per binding, and the generated per-state transition
//!   sources that the read-side binding scrapes.
//! - `<Name>.arrangement/` — a `Machines` manifest, one
//!   `<instanceName>\t<typeFile>` line per instance.
//!
//! Only structural problems (not a directory, missing `States` or
//! `Machines`) are errors. Cosmetic or per-state data that fails to read
//! degrades with a warning: a load always yields a best-effort model.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use llfsm_binding::{Binding, FormatRegistry};
use llfsm_core::{BoilerplateSection, Llfsm, MachineLayout, State, Transition};

use crate::arena::MachineArena;
use crate::arrangement::{self, Arrangement, InstanceDeclaration, Resolution};
use crate::error::{MachineError, MachineResult};
use crate::machine::Machine;

/// The machine type name of a bundle path: file stem minus `.machine`.
pub fn machine_name(dir: &Path) -> String {
    let stem = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    stem.strip_suffix(".machine").unwrap_or(&stem).to_string()
}

/// The arrangement name of a bundle path: file stem minus `.arrangement`.
pub fn arrangement_name(dir: &Path) -> String {
    let stem = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    stem.strip_suffix(".arrangement").unwrap_or(&stem).to_string()
}

/// Load a machine from its directory bundle.
///
/// The binding named by the bundle's `Language` marker recovers the
/// transitions, suspend marker, and boilerplate; unknown or missing tags
/// default to the Objective-C++ binding.
pub fn load_machine(dir: &Path, registry: &FormatRegistry) -> MachineResult<Machine> {
    if !dir.is_dir() {
        return Err(MachineError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    let name = machine_name(dir);
    let states_text = std::fs::read_to_string(dir.join("States")).map_err(|_| {
        MachineError::MissingStatesFile {
            path: dir.join("States"),
        }
    })?;
    let states: Vec<State> = states_text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(State::new)
        .collect();

    let language_tag = std::fs::read_to_string(dir.join("Language")).ok();
    let language = registry.binding_for(language_tag.as_deref());

    let mut llfsm = Llfsm::from_states(states.clone());
    for state in &states {
        let count = language.number_of_transitions(dir, &name, &state.name);
        for index in 0..count {
            let label = language.expression(dir, &name, &state.name, index);
            let target = language.target(dir, &name, &state.name, index, &states);
            llfsm.add_transition(Transition::new(label, state.id, target));
        }
    }
    llfsm.suspend_state = language.suspend_state(dir, &name, &states);

    let mut machine = Machine::new(language);
    machine.llfsm = llfsm;
    machine.boilerplate = language.machine_boilerplate(dir, &name);
    for state in &states {
        let boilerplate = language.state_boilerplate(dir, &name, &state.name);
        machine.state_boilerplate.insert(state.id, boilerplate);
    }
    load_layout(dir, &mut machine);
    if let Ok(text) = std::fs::read_to_string(dir.join("Activities")) {
        machine.activities = text
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
    }
    Ok(machine)
}

/// Layout is cosmetic: a malformed file degrades to no layout.
fn load_layout(dir: &Path, machine: &mut Machine) {
    let path = dir.join("Layout.json");
    let Ok(text) = std::fs::read_to_string(&path) else {
        return;
    };
    match serde_json::from_str::<MachineLayout>(&text) {
        Ok(layout) => {
            machine.state_layout = layout.states;
            machine.transition_layout = layout.transitions;
            machine.window_layout = layout.window;
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "malformed layout file; ignoring");
        }
    }
}

/// Store a machine's model files into its directory bundle.
///
/// Writes `States`, `Language`, `Layout.json`, `Activities`, and the
/// boilerplate section files. Transition sources are written by code
/// generation, which the read-side binding scrapes back — a bundle that
/// was stored but never generated reloads with an empty transition set.
pub fn store_machine(dir: &Path, machine: &mut Machine) -> MachineResult<()> {
    std::fs::create_dir_all(dir)?;
    let name = machine_name(dir);
    machine.fill_state_boilerplate();

    let mut states_text = String::new();
    for id in &machine.llfsm.states {
        match machine.llfsm.state_name(*id) {
            Some(state_name) => {
                states_text.push_str(state_name);
                states_text.push('\n');
            }
            None => {
                tracing::warn!(state = %id, "orphaned state not stored");
            }
        }
    }
    std::fs::write(dir.join("States"), states_text)?;
    std::fs::write(dir.join("Language"), format!("{}\n", machine.language.name()))?;

    let layout = MachineLayout {
        states: machine.state_layout.clone(),
        transitions: machine.transition_layout.clone(),
        window: machine.window_layout,
    };
    if !layout.is_empty() {
        let text = serde_json::to_string_pretty(&layout).map_err(MachineError::LayoutSerialize)?;
        std::fs::write(dir.join("Layout.json"), text)?;
    }
    if !machine.activities.is_empty() {
        std::fs::write(dir.join("Activities"), machine.activities.join("\n") + "\n")?;
    }
    store_boilerplate(dir, &name, machine)?;
    Ok(())
}

fn store_boilerplate(dir: &Path, name: &str, machine: &Machine) -> MachineResult<()> {
    let machine_files: Vec<(BoilerplateSection, String)> = match machine.language {
        Binding::C => vec![
            (BoilerplateSection::Includes, format!("Machine_{name}_Includes.h")),
            (BoilerplateSection::Variables, format!("Machine_{name}_Variables.h")),
            (BoilerplateSection::Functions, format!("Machine_{name}_Functions.h")),
        ],
        Binding::ObjCpp => vec![
            (BoilerplateSection::Includes, format!("{name}_Includes.h")),
            (BoilerplateSection::Variables, format!("{name}_Variables.h")),
            (BoilerplateSection::Functions, format!("{name}_Methods.h")),
        ],
        Binding::Vhdl => vec![],
    };
    write_section(dir, "IncludePath", machine.boilerplate.section(BoilerplateSection::IncludePath))?;
    for (section, file) in &machine_files {
        write_section(dir, file, machine.boilerplate.section(*section))?;
    }
    if machine.language == Binding::Vhdl {
        return Ok(());
    }
    for id in &machine.llfsm.states {
        let Some(state_name) = machine.llfsm.state_name(*id) else {
            continue;
        };
        let boilerplate = machine.boilerplate_for(*id);
        let files = [
            (BoilerplateSection::Includes, format!("State_{state_name}_Includes.h")),
            (BoilerplateSection::Variables, format!("State_{state_name}_Variables.h")),
            (BoilerplateSection::OnEntry, format!("State_{state_name}_OnEntry.mm")),
            (BoilerplateSection::OnExit, format!("State_{state_name}_OnExit.mm")),
            (BoilerplateSection::Internal, format!("State_{state_name}_Internal.mm")),
            (BoilerplateSection::OnSuspend, format!("State_{state_name}_OnSuspend.mm")),
            (BoilerplateSection::OnResume, format!("State_{state_name}_OnResume.mm")),
        ];
        for (section, file) in files {
            write_section(dir, &file, boilerplate.section(section))?;
        }
    }
    Ok(())
}

fn write_section(dir: &Path, file: &str, text: &str) -> MachineResult<()> {
    if text.is_empty() {
        return Ok(());
    }
    std::fs::write(dir.join(file), text)?;
    Ok(())
}

/// Load an arrangement bundle, loading each referenced machine once.
///
/// Returns the arrangement together with the de-duplicated machine
/// bundle files that the emission step must generate.
pub fn load_arrangement(
    dir: &Path,
    registry: &FormatRegistry,
    arena: &mut MachineArena,
) -> MachineResult<(Arrangement, Vec<String>)> {
    if !dir.is_dir() {
        return Err(MachineError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    let manifest = std::fs::read_to_string(dir.join("Machines")).map_err(|_| {
        MachineError::MissingManifest {
            path: dir.join("Machines"),
        }
    })?;

    let mut loaded: HashMap<String, llfsm_core::MachineHandle> = HashMap::new();
    let mut declarations = Vec::new();
    for (instance_name, type_file) in arrangement::parse_manifest(&manifest) {
        let machine = match loaded.get(&type_file) {
            Some(handle) => *handle,
            None => {
                let bundle_dir = resolve_machine_path(dir, &type_file);
                let machine = load_machine(&bundle_dir, registry)?;
                let handle = arena.insert(machine);
                loaded.insert(type_file.clone(), handle);
                handle
            }
        };
        declarations.push(InstanceDeclaration {
            name: instance_name,
            type_file,
            machine,
        });
    }
    let Resolution {
        instances,
        machine_files,
    } = arrangement::resolve_instances(&declarations);
    Ok((Arrangement::new(instances), machine_files))
}

/// Store an arrangement's `Machines` manifest.
pub fn store_arrangement(dir: &Path, arrangement: &Arrangement) -> MachineResult<()> {
    std::fs::create_dir_all(dir)?;
    std::fs::write(dir.join("Machines"), arrangement.manifest())?;
    Ok(())
}

/// Machine paths in a manifest are relative to the arrangement bundle,
/// falling back to its parent directory (sibling bundles).
fn resolve_machine_path(arrangement_dir: &Path, type_file: &str) -> PathBuf {
    let type_file = arrangement::with_machine_suffix(type_file);
    let candidate = arrangement_dir.join(&type_file);
    if candidate.is_dir() {
        return candidate;
    }
    match arrangement_dir.parent() {
        Some(parent) => parent.join(&type_file),
        None => candidate,
    }
}
