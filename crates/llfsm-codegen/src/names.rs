//! Identifier transforms shared by the emitters.
//!
//! Machine and state names come from directory stems and user input;
//! generated identifiers must be valid C, so anything outside
//! `[A-Za-z0-9_]` maps to an underscore and a leading digit gains a
//! leading underscore.

/// A valid identifier fragment for use inside generated names.
pub fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if i == 0 && ch.is_ascii_digit() {
                out.push('_');
            }
            out.push(ch);
        } else {
            out.push('_');
        }
    }
    if out.is_empty() {
        out.push('_');
    }
    out
}

/// Upper-cased identifier, as used in macros and include guards.
pub fn upper(name: &str) -> String {
    sanitize(name).to_ascii_uppercase()
}

/// Lower-cased identifier, as used in function prefixes.
pub fn lower(name: &str) -> String {
    sanitize(name).to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_plain_identifiers_through() {
        assert_eq!(sanitize("CounterC"), "CounterC");
        assert_eq!(sanitize("Suspend_Counter"), "Suspend_Counter");
    }

    #[test]
    fn maps_punctuation_to_underscores() {
        assert_eq!(sanitize("My Machine-2"), "My_Machine_2");
    }

    #[test]
    fn guards_leading_digits() {
        assert_eq!(sanitize("2fast"), "_2fast");
    }

    #[test]
    fn casing_transforms() {
        assert_eq!(upper("CounterC"), "COUNTERC");
        assert_eq!(lower("CounterC"), "counterc");
    }
}
