//! # Boilerplate Sections
//!
//! Named blocks of raw target-language source text that are injected
//! verbatim into generated files. The toolchain imposes no structure on a
//! section beyond its key: the text is the user's, and round-trips
//! unchanged through load, generation, and store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Number of distinct boilerplate sections.
pub const BOILERPLATE_SECTION_COUNT: usize = 9;

/// The fixed set of boilerplate section keys.
///
/// The first four apply at machine level; the remaining five are per-state
/// action bodies. Adding a section is a breaking change to every binding,
/// so the enum is exhaustive by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BoilerplateSection {
    /// Additional include search paths for the build.
    IncludePath,
    /// Header includes injected at the top of generated files.
    Includes,
    /// Machine or state variable declarations.
    Variables,
    /// Free functions and methods.
    Functions,
    /// Body of the state's on-entry action.
    OnEntry,
    /// Body of the state's on-exit action.
    OnExit,
    /// Body of the state's internal action.
    Internal,
    /// Body of the state's on-suspend action.
    OnSuspend,
    /// Body of the state's on-resume action.
    OnResume,
}

impl BoilerplateSection {
    /// All sections in declaration order.
    pub const ALL: [BoilerplateSection; BOILERPLATE_SECTION_COUNT] = [
        BoilerplateSection::IncludePath,
        BoilerplateSection::Includes,
        BoilerplateSection::Variables,
        BoilerplateSection::Functions,
        BoilerplateSection::OnEntry,
        BoilerplateSection::OnExit,
        BoilerplateSection::Internal,
        BoilerplateSection::OnSuspend,
        BoilerplateSection::OnResume,
    ];

    /// Canonical string key for this section.
    pub fn as_str(&self) -> &'static str {
        match self {
            BoilerplateSection::IncludePath => "includePath",
            BoilerplateSection::Includes => "includes",
            BoilerplateSection::Variables => "variables",
            BoilerplateSection::Functions => "functions",
            BoilerplateSection::OnEntry => "onEntry",
            BoilerplateSection::OnExit => "onExit",
            BoilerplateSection::Internal => "internal",
            BoilerplateSection::OnSuspend => "onSuspend",
            BoilerplateSection::OnResume => "onResume",
        }
    }

    /// Parse a canonical section key.
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == key)
    }
}

impl std::fmt::Display for BoilerplateSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of boilerplate sections attached to a machine or a state.
///
/// Sections that were never written read back as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Boilerplate {
    pub sections: BTreeMap<BoilerplateSection, String>,
}

impl Boilerplate {
    /// An empty boilerplate set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The text of a section, or `""` if the section was never written.
    pub fn section(&self, section: BoilerplateSection) -> &str {
        self.sections.get(&section).map(String::as_str).unwrap_or("")
    }

    /// Replace the text of a section. Setting an empty string removes the
    /// entry so that `is_empty` reflects user-visible content.
    pub fn set_section(&mut self, section: BoilerplateSection, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            self.sections.remove(&section);
        } else {
            self.sections.insert(section, text);
        }
    }

    /// True if every section is empty.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
