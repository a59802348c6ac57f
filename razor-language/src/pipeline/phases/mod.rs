//! Built-in pipeline phases.
//!
//! [`PipelineBuilder::with_default_phases`](super::PipelineBuilder::with_default_phases)
//! installs these in order:
//!
//! - [`ParsingPhase`] - parses the template and its imports
//! - [`LoweringPhase`] - builds the initial IR tree
//! - [`DocumentClassificationPhase`] - assigns a document kind and shapes the tree
//! - [`OptimizationPhase`] - runs IR passes
//! - [`CodeGenerationPhase`] - writes C#

mod classify;
mod generate;
mod lower;
mod optimize;
mod parse;

pub use classify::{
    DefaultDocumentClassifierPass, DocumentClassificationPhase, last_directive_value,
};
pub use generate::CodeGenerationPhase;
pub use lower::LoweringPhase;
pub use optimize::OptimizationPhase;
pub use parse::ParsingPhase;
