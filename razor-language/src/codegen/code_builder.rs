//! Line-oriented text builder with indentation tracking.

use super::Indent;

/// Builds indented source text one line at a time.
///
/// # Example
///
/// ```
/// use razor_language::codegen::{CodeBuilder, Indent};
///
/// let mut builder = CodeBuilder::new(Indent::Spaces(2));
/// builder
///     .push_line("namespace App")
///     .push_open_brace()
///     .push_line("public class Index {}")
///     .push_close_brace();
///
/// assert_eq!(
///     builder.build(),
///     "namespace App\n{\n  public class Index {}\n}\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    unit: String,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            unit: indent.unit(),
            buffer: String::new(),
        }
    }

    /// Add a line with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add every line of `text`, each at the current indentation.
    /// Blank lines are written without indentation.
    pub fn push_lines(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            if line.trim().is_empty() {
                self.push_blank();
            } else {
                self.push_line(line.trim_end());
            }
        }
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Add a line that ignores the current indentation, such as `#pragma`.
    pub fn push_unindented(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Write `{` and indent.
    pub fn push_open_brace(&mut self) -> &mut Self {
        self.push_line("{").push_indent()
    }

    /// Dedent and write `}`.
    pub fn push_close_brace(&mut self) -> &mut Self {
        self.push_dedent().push_line("}")
    }

    /// Get the current indentation level.
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    /// Get a reference to the current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(&self.unit);
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::new(Indent::default())
    }
}
