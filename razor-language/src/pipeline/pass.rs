//! IR passes and document classifiers.

use std::{fmt, sync::Arc};

use razor_ir::IrDocument;
use serde::Serialize;

use crate::{FeatureRegistry, SourceDocument};

/// Result of running a pass on one document.
///
/// Skipping is a normal outcome: it means the transformation does not apply
/// to the document, and the tree was left exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassOutcome {
    Applied,
    Skipped,
}

impl PassOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, PassOutcome::Applied)
    }
}

impl fmt::Display for PassOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PassOutcome::Applied => "applied",
            PassOutcome::Skipped => "skipped",
        })
    }
}

/// A transformation of the IR tree, run by the optimization phase.
///
/// Passes run in ascending [`order`](IrPass::order); passes with equal order
/// run in registration order. A pass must either apply its whole change or
/// leave the tree untouched.
pub trait IrPass: Send + Sync {
    /// The name of this pass (for logging).
    fn name(&self) -> &'static str;

    /// Position relative to other passes.
    fn order(&self) -> i32 {
        0
    }

    /// Resolve required capabilities once, when the pipeline is built.
    #[allow(unused_variables)]
    fn initialize(&mut self, features: &FeatureRegistry) -> crate::Result<()> {
        Ok(())
    }

    /// Transform `document`, compiled from `source`.
    fn execute(&self, source: &SourceDocument, document: &mut IrDocument) -> PassOutcome;
}

/// The passes installed on a pipeline, sorted by order.
///
/// Registered by [`PipelineBuilder::build`](super::PipelineBuilder::build)
/// after every pass has been initialised.
#[derive(Clone)]
pub struct IrPasses(pub(crate) Arc<[Box<dyn IrPass>]>);

impl IrPasses {
    pub fn iter(&self) -> impl Iterator<Item = &dyn IrPass> {
        self.0.iter().map(|pass| pass.as_ref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for IrPasses {
    fn default() -> Self {
        Self(Arc::from(Vec::new()))
    }
}

impl fmt::Debug for IrPasses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|p| p.name())).finish()
    }
}

/// The document classifiers installed on a pipeline, sorted by order.
#[derive(Clone)]
pub struct DocumentClassifiers(pub(crate) Arc<[Box<dyn DocumentClassifierPass>]>);

impl DocumentClassifiers {
    pub fn iter(&self) -> impl Iterator<Item = &dyn DocumentClassifierPass> {
        self.0.iter().map(|classifier| classifier.as_ref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for DocumentClassifiers {
    fn default() -> Self {
        Self(Arc::from(Vec::new()))
    }
}

impl fmt::Debug for DocumentClassifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|c| c.name())).finish()
    }
}

/// The generated type a classifier shapes the document into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStructure {
    pub namespace: String,
    pub class_name: String,
    pub base_type: Option<String>,
    pub class_modifiers: Vec<String>,
    pub method_name: String,
    pub return_type: String,
    pub method_modifiers: Vec<String>,
}

/// Decides what kind of document a template is and shapes its IR tree.
///
/// The classification phase offers an unclassified document to each
/// classifier in ascending order; the first whose [`is_match`] accepts it
/// claims it. Claiming sets the document kind and moves the tree into a
/// primary namespace, class and method built from a [`DocumentStructure`].
///
/// [`is_match`]: DocumentClassifierPass::is_match
pub trait DocumentClassifierPass: Send + Sync {
    /// The name of this classifier (for logging).
    fn name(&self) -> &'static str;

    /// The kind assigned to documents this classifier claims.
    fn document_kind(&self) -> &'static str;

    /// Position relative to other classifiers.
    fn order(&self) -> i32 {
        0
    }

    /// Resolve required capabilities once, when the pipeline is built.
    #[allow(unused_variables)]
    fn initialize(&mut self, features: &FeatureRegistry) -> crate::Result<()> {
        Ok(())
    }

    /// Returns true if this classifier claims the document.
    fn is_match(&self, source: &SourceDocument, document: &IrDocument) -> bool;

    /// Adjust the generated type before the tree is shaped.
    #[allow(unused_variables)]
    fn configure(
        &self,
        source: &SourceDocument,
        document: &IrDocument,
        structure: &mut DocumentStructure,
    ) {
    }

    /// Claim and shape `document` if it is unclassified and matches.
    fn classify(&self, source: &SourceDocument, document: &mut IrDocument) -> PassOutcome {
        if document.document_kind.is_some() || !self.is_match(source, document) {
            return PassOutcome::Skipped;
        }

        let mut structure = DocumentStructure::for_document(source, document);
        self.configure(source, document, &mut structure);
        structure.apply(document);
        document.document_kind = Some(self.document_kind().to_string());
        PassOutcome::Applied
    }
}
