//! Pipeline phase trait.

use std::fmt;

use eyre::Result;
use serde::Serialize;

use super::CompilationContext;
use crate::FeatureRegistry;

/// The role a phase plays in the pipeline.
///
/// Callers use this to stop a pipeline early, e.g. to inspect the IR before
/// code generation with [`Pipeline::execute_through`](super::Pipeline::execute_through).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseKind {
    Parsing,
    Lowering,
    DocumentClassification,
    Optimization,
    CodeGeneration,
    Custom,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PhaseKind::Parsing => "parsing",
            PhaseKind::Lowering => "lowering",
            PhaseKind::DocumentClassification => "document-classification",
            PhaseKind::Optimization => "optimization",
            PhaseKind::CodeGeneration => "code-generation",
            PhaseKind::Custom => "custom",
        })
    }
}

/// Information about a pipeline phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseInfo {
    /// The phase name.
    pub name: &'static str,
    /// A human-readable description.
    pub description: &'static str,
    /// The phase's role.
    pub kind: PhaseKind,
}

/// A phase in the compilation pipeline.
///
/// Phases are executed in order by the pipeline, each exactly once per
/// document. A phase resolves the capabilities it needs in
/// [`initialize`](Phase::initialize), which runs once when the pipeline is
/// built; a missing capability fails the build, not a compilation.
///
/// Built-in phases:
/// - `ParsingPhase` - parses the template and its imports
/// - `LoweringPhase` - builds the initial IR tree
/// - `DocumentClassificationPhase` - tags the document kind and shapes the tree
/// - `OptimizationPhase` - runs IR passes
/// - `CodeGenerationPhase` - writes C#
///
/// A phase whose input is missing leaves the context untouched.
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this phase does.
    fn description(&self) -> &'static str;

    /// The phase's role in the pipeline.
    fn kind(&self) -> PhaseKind {
        PhaseKind::Custom
    }

    /// Resolve required capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFeature`](crate::Error::MissingFeature) if a
    /// required capability is not registered.
    #[allow(unused_variables)]
    fn initialize(&mut self, features: &FeatureRegistry) -> crate::Result<()> {
        Ok(())
    }

    /// Run this phase on the compilation context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally. Non-fatal issues should
    /// be recorded as diagnostics instead.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;

    /// Get information about this phase.
    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
            kind: self.kind(),
        }
    }
}
