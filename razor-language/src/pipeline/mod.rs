//! Compilation pipeline.
//!
//! A [`Pipeline`] runs an ordered list of [`Phase`]s over a
//! [`CompilationContext`], one context per template. The pipeline provides:
//!
//! - Explicit phase boundaries (parse → lower → classify → optimize → generate)
//! - Capability lookup at construction time via the [`FeatureRegistry`](crate::FeatureRegistry)
//! - Plugin hooks for extensibility (before/after each phase)
//! - Ordered IR passes and document classifiers
//!
//! # Example
//!
//! ```
//! use razor_language::{SourceDocument, pipeline::{Pipeline, PhaseKind, CompilationContext}};
//!
//! let pipeline = Pipeline::builder().build()?;
//!
//! let mut ctx = CompilationContext::new(SourceDocument::new("<h1>@Title</h1>"));
//! pipeline
//!     .execute_through(&mut ctx, PhaseKind::DocumentClassification)
//!     .expect("pipeline should succeed");
//!
//! let ir = ctx.ir.as_ref().expect("lowered");
//! assert_eq!(ir.document_kind.as_deref(), Some("default"));
//! # Ok::<(), Box<razor_language::Error>>(())
//! ```

mod pass;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use pass::{
    DocumentClassifierPass, DocumentClassifiers, DocumentStructure, IrPass, IrPasses, PassOutcome,
};
pub use phase::{Phase, PhaseInfo, PhaseKind};
pub use plugin::Plugin;
pub use runner::{Pipeline, PipelineBuilder};
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};

pub use crate::context::CompilationContext;
