//! Indentation configuration for generated C#.

use razor_ir::CodeGenerationOptions;

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width.
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// The indentation Visual Studio uses for C# by default.
    pub const CSHARP: Self = Self::Spaces(4);

    /// Indentation described by code generation options.
    pub fn from_options(options: &CodeGenerationOptions) -> Self {
        if options.indent_with_tabs {
            Self::Tab
        } else {
            Self::Spaces(options.indent_size.max(1))
        }
    }

    /// The text of one indent level.
    pub fn unit(&self) -> String {
        match self {
            Self::Spaces(width) => " ".repeat(usize::from(*width)),
            Self::Tab => "\t".to_string(),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::CSHARP
    }
}
