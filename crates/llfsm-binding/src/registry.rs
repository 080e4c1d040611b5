//! # Format Registry
//!
//! Maps the format tags found in a bundle's `Language` marker file to the
//! binding that authored the machine. The registry is an explicit value —
//! constructed once (usually in `main` or a test) and passed by reference
//! into every load call — rather than ambient global state.

use crate::Binding;

/// An explicit, ordered tag → binding table.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    entries: Vec<(String, Binding)>,
}

impl FormatRegistry {
    /// An empty registry. Lookups fall back to the default binding.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The standard registry covering every known format tag.
    ///
    /// `swift` machines are stored in the Objective-C++ layout, and
    /// `verilog` is handled by the VHDL binding.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("c", Binding::C);
        registry.register("c++", Binding::ObjCpp);
        registry.register("objc", Binding::ObjCpp);
        registry.register("objc++", Binding::ObjCpp);
        registry.register("swift", Binding::ObjCpp);
        registry.register("verilog", Binding::Vhdl);
        registry.register("vhdl", Binding::Vhdl);
        registry
    }

    /// Register (or override) a format tag.
    pub fn register(&mut self, tag: impl Into<String>, binding: Binding) {
        let tag = tag.into();
        if let Some(entry) = self.entries.iter_mut().find(|(t, _)| *t == tag) {
            entry.1 = binding;
        } else {
            self.entries.push((tag, binding));
        }
    }

    /// The binding for a format tag.
    ///
    /// Unknown or missing tags default to the Objective-C++ binding, the
    /// historical format of hand-authored machines.
    pub fn binding_for(&self, tag: Option<&str>) -> Binding {
        let Some(tag) = tag else {
            return Binding::ObjCpp;
        };
        let tag = tag.trim();
        self.entries
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, binding)| *binding)
            .unwrap_or(Binding::ObjCpp)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_resolves_known_tags() {
        let registry = FormatRegistry::standard();
        assert_eq!(registry.binding_for(Some("c")), Binding::C);
        assert_eq!(registry.binding_for(Some("objc++")), Binding::ObjCpp);
        assert_eq!(registry.binding_for(Some("swift")), Binding::ObjCpp);
        assert_eq!(registry.binding_for(Some("vhdl")), Binding::Vhdl);
        assert_eq!(registry.binding_for(Some("verilog")), Binding::Vhdl);
    }

    #[test]
    fn unknown_and_missing_tags_default_to_objcpp() {
        let registry = FormatRegistry::standard();
        assert_eq!(registry.binding_for(Some("cobol")), Binding::ObjCpp);
        assert_eq!(registry.binding_for(None), Binding::ObjCpp);
    }

    #[test]
    fn tags_are_trimmed_before_lookup() {
        let registry = FormatRegistry::standard();
        assert_eq!(registry.binding_for(Some("c\n")), Binding::C);
    }

    #[test]
    fn register_overrides_an_existing_tag() {
        let mut registry = FormatRegistry::standard();
        registry.register("c", Binding::Vhdl);
        assert_eq!(registry.binding_for(Some("c")), Binding::Vhdl);
    }
}
