//! Template compiler core: parsing, the compilation context and the phase
//! pipeline that turns a template into C#.
//!
//! The usual entry point is [`Pipeline::builder`](pipeline::Pipeline::builder),
//! which installs the built-in phases. Extensions add directives, document
//! classifiers and IR passes to the builder before it is built.

pub mod codegen;
mod config;
mod context;
pub mod csharp;
mod diagnostic;
mod error;
mod features;
mod options;
pub mod pipeline;
mod source;
pub mod syntax;

pub use config::{CodegenConfig, EngineConfig, ParserConfig};
pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use error::{Error, Result};
pub use features::{CodeGenerationOptionsFeature, FeatureRegistry, ParserOptionsFeature};
pub use options::ParserOptions;
pub use source::SourceDocument;
