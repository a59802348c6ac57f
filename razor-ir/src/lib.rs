//! Intermediate representation tree for the Razor template compiler.
//!
//! This crate provides the node types that every compilation phase after
//! lowering reads and mutates. The tree lives in an arena owned by
//! [`IrDocument`]; nodes refer to each other through [`NodeId`] handles, so a
//! node has exactly one owner (the arena) and parent links never own anything.
//!
//! # Architecture
//!
//! ```text
//! template → syntax tree (parse) → IrDocument (lower) → classify → passes → C# text
//! ```
//!
//! Mutation happens through two surfaces:
//! - [`IrBuilder`] - a scoped cursor that appends or descends at an insertion point
//! - [`IrDocument`] - positional surgery (insert, detach, adopt) used by passes

mod builder;
mod document;
mod node;
mod options;
mod visit;

pub use builder::IrBuilder;
pub use document::{Descendants, IrDocument};
pub use node::{Annotation, IrNode, NodeId, NodeKind};
pub use options::CodeGenerationOptions;
pub use visit::{Visitor, walk};
