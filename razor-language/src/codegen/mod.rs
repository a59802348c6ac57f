//! C# code generation from the IR tree.

mod code_builder;
mod indent;
mod writer;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
use serde::Serialize;
pub use writer::CSharpWriter;

/// Output of the code generation phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedCode {
    /// The generated C# source.
    pub text: String,
    /// The document kind the source was generated for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_kind: Option<String>,
}
