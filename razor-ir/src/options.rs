//! Code generation configuration carried by the IR document.

use serde::{Deserialize, Serialize};

/// Options that shape the generated output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeGenerationOptions {
    /// Compiling for editor tooling rather than a real build.
    pub design_time: bool,
    /// Namespace used when the template declares none.
    pub root_namespace: String,
    /// Width of one indentation level when indenting with spaces.
    pub indent_size: u8,
    /// Indent with tab characters instead of spaces.
    pub indent_with_tabs: bool,
}

impl CodeGenerationOptions {
    /// Namespace used when neither configuration nor template provide one.
    pub const DEFAULT_ROOT_NAMESPACE: &'static str = "AspNetCoreGeneratedDocument";

    /// Options for tooling analysis.
    pub fn design_time_default() -> Self {
        Self {
            design_time: true,
            ..Self::default()
        }
    }
}

impl Default for CodeGenerationOptions {
    fn default() -> Self {
        Self {
            design_time: false,
            root_namespace: Self::DEFAULT_ROOT_NAMESPACE.to_string(),
            indent_size: 4,
            indent_with_tabs: false,
        }
    }
}
