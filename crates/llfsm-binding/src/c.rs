//! C binding scrapers.
//!
//! The C emitter leaves machine-readable markers in its generated files:
//! a per-state `#define ..._NUMBER_OF_TRANSITIONS <n>` in `State_<S>.h`,
//! a `// Transition <i> -> <index>` comment per guard check in
//! `State_<S>.c`, and the `machine->states[<index>]` suspend assignment in
//! `Machine_<Name>.c`. These scrapers recover the model from those markers
//! with plain string matching.

use std::path::Path;

use llfsm_core::{Boilerplate, BoilerplateSection, State, StateId};

use crate::{read_file, trailing_index};

pub(crate) fn number_of_transitions(dir: &Path, state_name: &str) -> Option<usize> {
    let header = read_file(&dir.join(format!("State_{state_name}.h")))?;
    let line = header
        .lines()
        .find(|l| l.starts_with("#define") && l.contains("_NUMBER_OF_TRANSITIONS"))?;
    let count = trailing_index(line);
    if count.is_none() {
        tracing::warn!(state = state_name, line, "malformed transition count marker");
    }
    count
}

/// Shared with the Objective-C++ binding: both store guard expressions in
/// `State_<S>_Transition_<i>.expr` files.
pub(crate) fn expression(dir: &Path, state_name: &str, index: usize) -> Option<String> {
    let text = read_file(&dir.join(format!("State_{state_name}_Transition_{index}.expr")))?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub(crate) fn target(dir: &Path, state_name: &str, index: usize, states: &[State]) -> Option<StateId> {
    let source = read_file(&dir.join(format!("State_{state_name}.c")))?;
    let marker = format!("// Transition {index} -> ");
    let rest = source
        .lines()
        .find_map(|line| line.trim_start().strip_prefix(marker.as_str()))?;
    let target_index: usize = rest.split_whitespace().next()?.parse().ok()?;
    states.get(target_index).map(|s| s.id)
}

pub(crate) fn suspend_state(dir: &Path, machine_name: &str, states: &[State]) -> Option<StateId> {
    let source = read_file(&dir.join(format!("Machine_{machine_name}.c")))?;
    let line = source
        .lines()
        .find(|l| l.contains("->suspend_state = machine->states["))?;
    let start = line.find('[')? + 1;
    let end = line[start..].find(']')? + start;
    let index: usize = line[start..end].parse().ok()?;
    states.get(index).map(|s| s.id)
}

pub(crate) fn machine_boilerplate(dir: &Path, machine_name: &str) -> Boilerplate {
    let mut boilerplate = Boilerplate::new();
    if let Some(text) = read_file(&dir.join("IncludePath")) {
        boilerplate.set_section(BoilerplateSection::IncludePath, text);
    }
    let pairs = [
        (BoilerplateSection::Includes, "Includes.h"),
        (BoilerplateSection::Variables, "Variables.h"),
        (BoilerplateSection::Functions, "Functions.h"),
    ];
    for (section, suffix) in pairs {
        if let Some(text) = read_file(&dir.join(format!("Machine_{machine_name}_{suffix}"))) {
            boilerplate.set_section(section, text);
        }
    }
    boilerplate
}

pub(crate) fn state_boilerplate(dir: &Path, state_name: &str) -> Boilerplate {
    state_boilerplate_with_prefix(dir, &format!("State_{state_name}"))
}

/// Per-state sections share a naming scheme across the C and
/// Objective-C++ bindings: `<prefix>_<Section>.<ext>`.
pub(crate) fn state_boilerplate_with_prefix(dir: &Path, prefix: &str) -> Boilerplate {
    let mut boilerplate = Boilerplate::new();
    let pairs = [
        (BoilerplateSection::Includes, "Includes.h"),
        (BoilerplateSection::Variables, "Variables.h"),
        (BoilerplateSection::OnEntry, "OnEntry.mm"),
        (BoilerplateSection::OnExit, "OnExit.mm"),
        (BoilerplateSection::Internal, "Internal.mm"),
        (BoilerplateSection::OnSuspend, "OnSuspend.mm"),
        (BoilerplateSection::OnResume, "OnResume.mm"),
    ];
    for (section, suffix) in pairs {
        if let Some(text) = read_file(&dir.join(format!("{prefix}_{suffix}"))) {
            boilerplate.set_section(section, text);
        }
    }
    boilerplate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Binding;

    fn write(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    fn sample_states() -> Vec<State> {
        vec![State::new("Initial"), State::new("CountUp"), State::new("Print")]
    }

    #[test]
    fn scrapes_count_target_and_expression() {
        let bundle = tempfile::tempdir().unwrap();
        let dir = bundle.path();
        let states = sample_states();
        write(
            dir,
            "State_Initial.h",
            "#define MACHINE_DEMO_INITIAL_NUMBER_OF_TRANSITIONS 2\n",
        );
        write(
            dir,
            "State_Initial.c",
            "    // Transition 0 -> 2\n    if (\n    ) return machine->states[2];\n    // Transition 1 -> unresolved (no generated check)\n",
        );
        write(dir, "State_Initial_Transition_0.expr", "count > 3");

        let binding = Binding::C;
        assert_eq!(binding.number_of_transitions(dir, "Demo", "Initial"), 2);
        assert_eq!(binding.expression(dir, "Demo", "Initial", 0), "count > 3");
        assert_eq!(binding.expression(dir, "Demo", "Initial", 1), "true");
        assert_eq!(
            binding.target(dir, "Demo", "Initial", 0, &states),
            Some(states[2].id)
        );
        assert_eq!(binding.target(dir, "Demo", "Initial", 1, &states), None);
    }

    #[test]
    fn out_of_bounds_target_is_unresolved() {
        let bundle = tempfile::tempdir().unwrap();
        let dir = bundle.path();
        let states = sample_states();
        write(dir, "State_Initial.c", "    // Transition 0 -> 9\n");
        assert_eq!(Binding::C.target(dir, "Demo", "Initial", 0, &states), None);
    }

    #[test]
    fn scrapes_suspend_assignment() {
        let bundle = tempfile::tempdir().unwrap();
        let dir = bundle.path();
        let states = sample_states();
        write(
            dir,
            "Machine_Demo.c",
            "    machine->suspend_state = machine->states[1];\n",
        );
        assert_eq!(
            Binding::C.suspend_state(dir, "Demo", &states),
            Some(states[1].id)
        );
    }

    #[test]
    fn missing_suspend_assignment_is_none() {
        let bundle = tempfile::tempdir().unwrap();
        let dir = bundle.path();
        write(dir, "Machine_Demo.c", "    machine->suspend_state = NULL;\n");
        assert_eq!(Binding::C.suspend_state(dir, "Demo", &sample_states()), None);
    }

    #[test]
    fn recovers_machine_and_state_boilerplate() {
        let bundle = tempfile::tempdir().unwrap();
        let dir = bundle.path();
        write(dir, "Machine_Demo_Includes.h", "#include <stdio.h>\n");
        write(dir, "Machine_Demo_Variables.h", "int count;\n");
        write(dir, "State_Initial_OnEntry.mm", "count = 0;\n");

        let machine = Binding::C.machine_boilerplate(dir, "Demo");
        assert_eq!(machine.section(BoilerplateSection::Includes), "#include <stdio.h>\n");
        assert_eq!(machine.section(BoilerplateSection::Variables), "int count;\n");

        let state = Binding::C.state_boilerplate(dir, "Demo", "Initial");
        assert_eq!(state.section(BoilerplateSection::OnEntry), "count = 0;\n");
        assert_eq!(state.section(BoilerplateSection::OnExit), "");
    }
}
