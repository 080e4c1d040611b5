//! # Arrangements and Instance-Name Resolution
//!
//! An arrangement is an ordered collection of named machine instances.
//! Assembling one from raw declarations is the most intricate algorithm
//! in the model: proposed instance names may collide, and a collision is
//! resolved differently depending on whether the colliding entries refer
//! to the same physical machine (deduplicate) or to different machines
//! (rename with a `_<n>` suffix).
//!
//! The loop below is deliberately order-dependent and compares source
//! keys only against the *currently colliding* slot at each probe step,
//! never globally. Do not "simplify" it: the third-entry-reuses-first
//! behaviour is part of the contract and pinned by tests.

use std::collections::HashMap;

use llfsm_core::MachineHandle;

use crate::instance::Instance;

/// A raw instance declaration, before name resolution.
#[derive(Debug, Clone)]
pub struct InstanceDeclaration {
    /// Proposed instance name (may collide with other declarations).
    pub name: String,
    /// Source key: the machine bundle path this declaration refers to.
    pub type_file: String,
    /// Handle of the machine loaded for this declaration.
    pub machine: MachineHandle,
}

/// The outcome of instance-name resolution.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Resolved instances, in declaration order, with unique names.
    pub instances: Vec<Instance>,
    /// De-duplicated, ordered machine bundle files to emit (with the
    /// `.machine` suffix appended where missing). Consumed by the
    /// emission step so that no shared machine is generated twice.
    pub machine_files: Vec<String>,
}

/// Resolve raw declarations into uniquely-named instances.
///
/// - Two entries proposing the same name for the **same** source key
///   collapse onto one instance sharing one machine.
/// - Two entries proposing the same name for **different** source keys
///   keep distinct machines; the later one renames to `<name>_<n>` with
///   the smallest `n` ≥ 1 that reaches a free (or same-key) slot.
pub fn resolve_instances(declarations: &[InstanceDeclaration]) -> Resolution {
    let mut seen: HashMap<String, (String, MachineHandle)> = HashMap::new();
    let mut instances: Vec<Instance> = Vec::new();
    let mut machine_files: Vec<String> = Vec::new();

    for declaration in declarations {
        let mut unique_name = declaration.name.clone();
        let source_key = declaration.type_file.clone();
        let mut machine = declaration.machine;
        let mut reused = false;
        let mut suffix = 1usize;
        while let Some((existing_key, existing_machine)) = seen.get(&unique_name) {
            if *existing_key == source_key {
                // Same physical machine: reuse the existing slot identity
                // and stop renaming.
                machine = *existing_machine;
                reused = true;
                break;
            }
            unique_name = format!("{}_{}", declaration.name, suffix);
            suffix += 1;
        }
        seen.insert(unique_name.clone(), (source_key.clone(), machine));
        if reused {
            // The slot already emitted an identical instance; a second
            // copy would duplicate its name in the output.
            continue;
        }
        let bundle_file = with_machine_suffix(&source_key);
        if !machine_files.contains(&bundle_file) {
            machine_files.push(bundle_file);
        }
        instances.push(Instance {
            name: unique_name,
            type_file: source_key,
            machine,
        });
    }

    Resolution {
        instances,
        machine_files,
    }
}

/// Append the machine-bundle suffix if the path lacks one.
pub fn with_machine_suffix(path: &str) -> String {
    if path.ends_with(".machine") {
        path.to_string()
    } else {
        format!("{path}.machine")
    }
}

/// A named, ordered collection of machine instances.
///
/// The order determines array layout in generated arrangement structs and
/// the "all except instance 0" convention for arrangement-wide
/// suspend/resume/restart.
#[derive(Debug, Clone, Default)]
pub struct Arrangement {
    pub instances: Vec<Instance>,
}

impl Arrangement {
    /// Build an arrangement from resolved instances.
    pub fn new(instances: Vec<Instance>) -> Self {
        Self { instances }
    }

    /// Instance names in declared order.
    pub fn names(&self) -> Vec<&str> {
        self.instances.iter().map(|i| i.name.as_str()).collect()
    }

    /// The `Machines` manifest text for this arrangement.
    pub fn manifest(&self) -> String {
        let mut text = String::new();
        for instance in &self.instances {
            text.push_str(&instance.name);
            text.push('\t');
            text.push_str(&instance.type_file);
            text.push('\n');
        }
        text
    }
}

/// Parse a `Machines` manifest into `(instanceName, typeFile)` pairs.
///
/// Each line is `<instanceName>\t<typeFile>`; a line without a tab names
/// only the type file, and the instance name defaults to the file stem.
pub fn parse_manifest(text: &str) -> Vec<(String, String)> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once('\t') {
            Some((name, file)) => (name.to_string(), file.to_string()),
            None => {
                let stem = line
                    .rsplit(['/', '\\'])
                    .next()
                    .unwrap_or(line)
                    .strip_suffix(".machine")
                    .unwrap_or_else(|| line.rsplit(['/', '\\']).next().unwrap_or(line));
                (stem.to_string(), line.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declaration(name: &str, file: &str, handle: usize) -> InstanceDeclaration {
        InstanceDeclaration {
            name: name.into(),
            type_file: file.into(),
            machine: MachineHandle(handle),
        }
    }

    #[test]
    fn unique_names_pass_through() {
        let resolution = resolve_instances(&[
            declaration("a", "X.machine", 0),
            declaration("b", "Y.machine", 1),
        ]);
        assert_eq!(
            resolution.instances.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
        assert_eq!(resolution.machine_files, vec!["X.machine", "Y.machine"]);
    }

    #[test]
    fn same_name_same_key_deduplicates() {
        let resolution = resolve_instances(&[
            declaration("a", "X.machine", 0),
            declaration("a", "X.machine", 1),
        ]);
        assert_eq!(resolution.instances.len(), 1);
        assert_eq!(resolution.instances[0].name, "a");
        // The second declaration reuses the first machine.
        assert_eq!(resolution.instances[0].machine, MachineHandle(0));
        assert_eq!(resolution.machine_files, vec!["X.machine"]);
    }

    #[test]
    fn same_name_different_key_renames() {
        let resolution = resolve_instances(&[
            declaration("M", "keyA.machine", 0),
            declaration("M", "keyB.machine", 1),
        ]);
        assert_eq!(
            resolution.instances.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
            vec!["M", "M_1"]
        );
        assert_eq!(resolution.instances[0].machine, MachineHandle(0));
        assert_eq!(resolution.instances[1].machine, MachineHandle(1));
    }

    #[test]
    fn third_entry_reuses_first_slot_not_the_renamed_second() {
        // [("A", fileX), ("B", fileY), ("A", fileX)]: the third entry
        // collides with slot "A", whose source key equals its own, so it
        // reuses machine X under the original name — it does not rename
        // past slot "A" and must not merge with "B".
        let resolution = resolve_instances(&[
            declaration("A", "fileX.machine", 0),
            declaration("B", "fileY.machine", 1),
            declaration("A", "fileX.machine", 2),
        ]);
        assert_eq!(
            resolution.instances.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
            vec!["A", "B"]
        );
        assert_eq!(resolution.instances[0].machine, MachineHandle(0));
        assert_eq!(resolution.machine_files, vec!["fileX.machine", "fileY.machine"]);
    }

    #[test]
    fn probe_compares_keys_only_against_the_colliding_slot() {
        // Three entries proposing one name: 2nd is a different machine,
        // 3rd is the same machine as the 1st. The 3rd collides with the
        // original slot first, matches its key, and reuses it — its
        // comparison never involves the renamed 2nd slot.
        let resolution = resolve_instances(&[
            declaration("M", "one.machine", 0),
            declaration("M", "two.machine", 1),
            declaration("M", "one.machine", 2),
        ]);
        assert_eq!(
            resolution.instances.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
            vec!["M", "M_1"]
        );
        assert_eq!(resolution.instances[1].machine, MachineHandle(1));
    }

    #[test]
    fn renaming_probes_until_a_free_slot() {
        let resolution = resolve_instances(&[
            declaration("M", "one.machine", 0),
            declaration("M_1", "two.machine", 1),
            declaration("M", "three.machine", 2),
        ]);
        assert_eq!(
            resolution.instances.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
            vec!["M", "M_1", "M_2"]
        );
    }

    #[test]
    fn machine_suffix_is_appended_when_missing() {
        let resolution = resolve_instances(&[declaration("a", "plain", 0)]);
        assert_eq!(resolution.machine_files, vec!["plain.machine"]);
        assert_eq!(resolution.instances[0].type_file, "plain");
    }

    #[test]
    fn manifest_round_trips() {
        let resolution = resolve_instances(&[
            declaration("a", "X.machine", 0),
            declaration("b", "Y.machine", 1),
        ]);
        let arrangement = Arrangement::new(resolution.instances);
        let manifest = arrangement.manifest();
        assert_eq!(manifest, "a\tX.machine\nb\tY.machine\n");
        assert_eq!(
            parse_manifest(&manifest),
            vec![
                ("a".to_string(), "X.machine".to_string()),
                ("b".to_string(), "Y.machine".to_string()),
            ]
        );
    }

    #[test]
    fn manifest_line_without_tab_uses_the_file_stem() {
        assert_eq!(
            parse_manifest("machines/Timer.machine\n"),
            vec![("Timer".to_string(), "machines/Timer.machine".to_string())]
        );
    }
}
