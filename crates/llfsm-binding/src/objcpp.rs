//! Objective-C++ (MiCASE) binding scrapers.
//!
//! MiCASE-era machines embed their transition metadata in the generated
//! `State_<S>.h`: the count in `numberOfTransitions() const { return N; }`
//! and the numeric target index in each `Transition_<i>(int toState = N)`
//! constructor default. Guard expressions live in the shared
//! `State_<S>_Transition_<i>.expr` files.

use std::path::Path;

use llfsm_core::{Boilerplate, BoilerplateSection, State, StateId};

use crate::{c, read_file};

pub(crate) fn number_of_transitions(dir: &Path, state_name: &str) -> Option<usize> {
    let header = read_file(&dir.join(format!("State_{state_name}.h")))?;
    let rest = header
        .lines()
        .find_map(|line| line.split("numberOfTransitions() const { return ").nth(1))?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    let count = digits.parse().ok();
    if count.is_none() {
        tracing::warn!(state = state_name, "malformed numberOfTransitions marker");
    }
    count
}

pub(crate) fn target(dir: &Path, state_name: &str, index: usize, states: &[State]) -> Option<StateId> {
    let header = read_file(&dir.join(format!("State_{state_name}.h")))?;
    let marker = format!("Transition_{index}(int toState = ");
    let rest = header
        .lines()
        .find_map(|line| line.split(marker.as_str()).nth(1))?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    let target_index: usize = digits.parse().ok()?;
    states.get(target_index).map(|s| s.id)
}

pub(crate) fn suspend_state(dir: &Path, machine_name: &str, states: &[State]) -> Option<StateId> {
    // Prefer the explicit wiring in the machine implementation file.
    if let Some(source) = read_file(&dir.join(format!("{machine_name}.mm"))) {
        if let Some(rest) = source
            .lines()
            .find_map(|line| line.split("setSuspendState(_states[").nth(1))
        {
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            if let Ok(index) = digits.parse::<usize>() {
                return states.get(index).map(|s| s.id);
            }
        }
    }
    // Hand-written machines mark suspension by state name alone.
    states
        .iter()
        .find(|s| s.name == "SUSPENDED" || s.name == "Suspend")
        .map(|s| s.id)
}

pub(crate) fn machine_boilerplate(dir: &Path, machine_name: &str) -> Boilerplate {
    let mut boilerplate = Boilerplate::new();
    if let Some(text) = read_file(&dir.join("IncludePath")) {
        boilerplate.set_section(BoilerplateSection::IncludePath, text);
    }
    let pairs = [
        (BoilerplateSection::Includes, "Includes.h"),
        (BoilerplateSection::Variables, "Variables.h"),
        (BoilerplateSection::Functions, "Methods.h"),
    ];
    for (section, suffix) in pairs {
        if let Some(text) = read_file(&dir.join(format!("{machine_name}_{suffix}"))) {
            boilerplate.set_section(section, text);
        }
    }
    boilerplate
}

pub(crate) fn state_boilerplate(dir: &Path, state_name: &str) -> Boilerplate {
    let mut boilerplate = c::state_boilerplate_with_prefix(dir, &format!("State_{state_name}"));
    // MiCASE stores per-state methods alongside the action bodies.
    if let Some(text) = read_file(&dir.join(format!("State_{state_name}_Methods.h"))) {
        boilerplate.set_section(BoilerplateSection::Functions, text);
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
        vec![
            State::new("Initial"),
            State::new("CountUp"),
            State::new("Print"),
            State::new("Exit"),
        ]
    }

    #[test]
    fn scrapes_micase_count_and_target_markers() {
        let bundle = tempfile::tempdir().unwrap();
        let dir = bundle.path();
        let states = sample_states();
        write(
            dir,
            "State_CountUp.h",
            concat!(
                "                class Transition_0: public CLTransition\n",
                "                {\n",
                "                public:\n",
                "                    Transition_0(int toState = 3): CLTransition(toState) {}\n",
                "                };\n",
                "                    virtual int numberOfTransitions() const { return 1; }\n",
            ),
        );
        let binding = Binding::ObjCpp;
        assert_eq!(binding.number_of_transitions(dir, "Counter", "CountUp"), 1);
        assert_eq!(
            binding.target(dir, "Counter", "CountUp", 0, &states),
            Some(states[3].id)
        );
        assert_eq!(binding.target(dir, "Counter", "CountUp", 1, &states), None);
    }

    #[test]
    fn suspend_state_prefers_explicit_wiring() {
        let bundle = tempfile::tempdir().unwrap();
        let dir = bundle.path();
        let states = sample_states();
        write(dir, "Counter.mm", "    setSuspendState(_states[2]);\n");
        assert_eq!(
            Binding::ObjCpp.suspend_state(dir, "Counter", &states),
            Some(states[2].id)
        );
    }

    #[test]
    fn suspend_state_falls_back_to_the_conventional_name() {
        let bundle = tempfile::tempdir().unwrap();
        let dir = bundle.path();
        let mut states = sample_states();
        states.push(State::new("SUSPENDED"));
        let suspended = states[4].id;
        assert_eq!(
            Binding::ObjCpp.suspend_state(dir, "Counter", &states),
            Some(suspended)
        );
    }

    #[test]
    fn no_marker_means_not_suspensible() {
        let bundle = tempfile::tempdir().unwrap();
        assert_eq!(
            Binding::ObjCpp.suspend_state(bundle.path(), "Counter", &sample_states()),
            None
        );
    }

    #[test]
    fn machine_boilerplate_uses_micase_file_names() {
        let bundle = tempfile::tempdir().unwrap();
        let dir = bundle.path();
        write(dir, "Counter_Includes.h", "#include \"CLMachine.h\"\n");
        write(dir, "Counter_Methods.h", "void reset();\n");
        let boilerplate = Binding::ObjCpp.machine_boilerplate(dir, "Counter");
        assert_eq!(
            boilerplate.section(BoilerplateSection::Includes),
            "#include \"CLMachine.h\"\n"
        );
        assert_eq!(boilerplate.section(BoilerplateSection::Functions), "void reset();\n");
    }
}
