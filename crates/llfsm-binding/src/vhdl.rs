//! VHDL binding scrapers.
//!
//! VHDL machines store transitions in structured text: one
//! `STATE_<name>_Transitions` file per state, one `expression,targetUUID`
//! pair per line. The target is resolved against the supplied state list
//! by UUID; an unknown UUID is an unresolved target, not an error.

use std::path::Path;

use llfsm_core::{State, StateId};
use uuid::Uuid;

use crate::read_file;

fn transition_lines(dir: &Path, state_name: &str) -> Option<Vec<String>> {
    let text = read_file(&dir.join(format!("STATE_{state_name}_Transitions")))?;
    Some(
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Split a transition line at the last comma: the expression may itself
/// contain commas, the UUID never does.
fn split_line(line: &str) -> Option<(&str, &str)> {
    let comma = line.rfind(',')?;
    Some((line[..comma].trim(), line[comma + 1..].trim()))
}

pub(crate) fn number_of_transitions(dir: &Path, state_name: &str) -> Option<usize> {
    transition_lines(dir, state_name).map(|lines| lines.len())
}

pub(crate) fn expression(dir: &Path, state_name: &str, index: usize) -> Option<String> {
    let lines = transition_lines(dir, state_name)?;
    let line = lines.get(index)?;
    let (expression, _) = split_line(line)?;
    if expression.is_empty() {
        None
    } else {
        Some(expression.to_string())
    }
}

pub(crate) fn target(dir: &Path, state_name: &str, index: usize, states: &[State]) -> Option<StateId> {
    let lines = transition_lines(dir, state_name)?;
    let line = lines.get(index)?;
    let (_, uuid_text) = split_line(line)?;
    let uuid: Uuid = uuid_text.parse().ok()?;
    states.iter().find(|s| *s.id.as_uuid() == uuid).map(|s| s.id)
}

/// VHDL bundles carry no suspend wiring; the conventional state name is
/// the only marker.
pub(crate) fn suspend_state(states: &[State]) -> Option<StateId> {
    states
        .iter()
        .find(|s| s.name == "SUSPENDED" || s.name == "Suspend")
        .map(|s| s.id)
}
