//! Plain line-oriented source assembly.
//!
//! Generated files are built as an explicit `Vec<String>` of finished
//! lines. The emitters push exactly what the output file contains, in
//! order, and render with a single trailing newline. No templating, no
//! post-processing.

/// An ordered collection of output lines.
#[derive(Debug, Default)]
pub struct SourceFile {
    lines: Vec<String>,
}

impl SourceFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the standard generated-file banner.
    pub fn with_banner(file_name: &str, tool_line: &str) -> Self {
        let mut source = Self::new();
        source.line("//");
        source.line(format!("// {file_name}"));
        source.line("//");
        source.line(format!("// {tool_line}"));
        source.line("//");
        source
    }

    pub fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Append a multi-line fragment verbatim, split into lines.
    pub fn fragment(&mut self, text: &str) {
        for line in text.lines() {
            self.lines.push(line.to_string());
        }
    }

    pub fn render(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// Banner line used by the C emitter family.
pub const C_TOOL_LINE: &str =
    "Automatically created using fsmconvert -- do not change manually!";

/// Banner line used by the Objective-C++ (MiCASE) emitter family.
pub const OBJCPP_TOOL_LINE: &str =
    "Automatically created through MiCASE -- do not change manually!";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_lines_with_trailing_newline() {
        let mut source = SourceFile::new();
        source.line("a");
        source.blank();
        source.line("b");
        assert_eq!(source.render(), "a\n\nb\n");
    }

    #[test]
    fn banner_matches_generated_shape() {
        let source = SourceFile::with_banner("Machine_Demo.h", C_TOOL_LINE);
        let text = source.render();
        assert!(text.starts_with("//\n// Machine_Demo.h\n//\n// Automatically created using fsmconvert"));
    }

    #[test]
    fn fragment_splits_multi_line_text() {
        let mut source = SourceFile::new();
        source.fragment("x\ny");
        assert_eq!(source.render(), "x\ny\n");
    }
}
