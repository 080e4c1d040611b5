//! The write-side output contract.

use llfsm_binding::Binding;
use llfsm_machine::{Arrangement, Machine, MachineArena};

use crate::error::{CodegenError, CodegenResult};
use crate::{c, objcpp, vhdl};

/// A single generated file: its name within the bundle and its full
/// contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub contents: String,
}

impl Artifact {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// The closed set of supported output languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputLanguage {
    C,
    ObjCpp,
    Vhdl,
}

impl OutputLanguage {
    /// The default output language for a machine's read-side binding.
    pub fn for_binding(binding: Binding) -> Self {
        match binding {
            Binding::C => Self::C,
            Binding::ObjCpp => Self::ObjCpp,
            Binding::Vhdl => Self::Vhdl,
        }
    }

    /// Parse a user-supplied format tag.
    pub fn parse(tag: &str) -> CodegenResult<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "c" => Ok(Self::C),
            "objc++" | "objcpp" | "objc" => Ok(Self::ObjCpp),
            "vhdl" => Ok(Self::Vhdl),
            _ => Err(CodegenError::UnknownFormatTag {
                tag: tag.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::C => "c",
            Self::ObjCpp => "objc++",
            Self::Vhdl => "vhdl",
        }
    }

    /// All artifacts for one machine, in emission order.
    pub fn machine_artifacts(&self, name: &str, machine: &Machine) -> Vec<Artifact> {
        match self {
            Self::C => c::machine_artifacts(name, machine),
            Self::ObjCpp => objcpp::machine_artifacts(name, machine),
            Self::Vhdl => vhdl::machine_artifacts(name, machine),
        }
    }

    /// All artifacts for an arrangement bundle. The per-machine bundles
    /// are emitted separately, once per distinct machine.
    pub fn arrangement_artifacts(
        &self,
        name: &str,
        arrangement: &Arrangement,
        arena: &MachineArena,
    ) -> CodegenResult<Vec<Artifact>> {
        match self {
            Self::C => c::arrangement_artifacts(name, arrangement, arena),
            Self::ObjCpp => objcpp::arrangement_artifacts(name, arrangement, arena),
            Self::Vhdl => Err(CodegenError::UnsupportedOutputFormat {
                format: "vhdl",
                operation: "arrangement generation",
            }),
        }
    }
}
