//! IR node types.

use std::{collections::BTreeSet, fmt};

use serde::Serialize;

/// Handle to a node stored in an [`IrDocument`](crate::IrDocument) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural markers attached to nodes.
///
/// A marker identifies *the* node of its kind among possibly several
/// candidates. The document keeps each marker on at most one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Annotation {
    /// The namespace that governs the compiled unit's identity.
    PrimaryNamespace,
    /// The class generated for the template.
    PrimaryClass,
    /// The method that renders the template body.
    PrimaryMethod,
}

impl Annotation {
    /// Stable name used in snapshots and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Annotation::PrimaryNamespace => "primary-namespace",
            Annotation::PrimaryClass => "primary-class",
            Annotation::PrimaryMethod => "primary-method",
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed set of node variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    /// Root of the tree. Document-level data lives on the
    /// [`IrDocument`](crate::IrDocument) itself.
    Document,
    /// A `using` import.
    Using { content: String },
    /// A namespace block.
    NamespaceDeclaration { content: String },
    /// A class declaration.
    ClassDeclaration {
        class_name: String,
        base_type: Option<String>,
        modifiers: Vec<String>,
    },
    /// A method declaration.
    MethodDeclaration {
        method_name: String,
        return_type: String,
        modifiers: Vec<String>,
    },
    /// A template directive such as `@page` or `@model`.
    Directive { name: String, tokens: Vec<String> },
    /// Literal markup written to the output as-is.
    HtmlContent { content: String },
    /// An expression whose value is written to the output.
    CSharpExpression { content: String },
    /// A block of statements.
    CSharpCode { content: String },
    /// Text emitted verbatim by code generation.
    GeneratedCodeToken { text: String },
}

impl NodeKind {
    /// Short variant name for logs and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Using { .. } => "using",
            NodeKind::NamespaceDeclaration { .. } => "namespace",
            NodeKind::ClassDeclaration { .. } => "class",
            NodeKind::MethodDeclaration { .. } => "method",
            NodeKind::Directive { .. } => "directive",
            NodeKind::HtmlContent { .. } => "html",
            NodeKind::CSharpExpression { .. } => "expression",
            NodeKind::CSharpCode { .. } => "code",
            NodeKind::GeneratedCodeToken { .. } => "generated-code",
        }
    }

    /// Returns true for variants that hold other nodes.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeKind::Document
                | NodeKind::NamespaceDeclaration { .. }
                | NodeKind::ClassDeclaration { .. }
                | NodeKind::MethodDeclaration { .. }
        )
    }

    /// Returns true if this is a directive with the given name.
    pub fn is_directive(&self, directive: &str) -> bool {
        matches!(self, NodeKind::Directive { name, .. } if name == directive)
    }
}

/// A node in the arena.
#[derive(Debug, Clone)]
pub struct IrNode {
    /// Variant data.
    pub kind: NodeKind,
    /// Non-owning back reference, `None` for the root and detached nodes.
    pub(crate) parent: Option<NodeId>,
    /// Ordered children. Order is emission order.
    pub(crate) children: Vec<NodeId>,
    /// Structural markers.
    pub(crate) annotations: BTreeSet<Annotation>,
}

impl IrNode {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            annotations: BTreeSet::new(),
        }
    }

    /// The parent of this node.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The children of this node in emission order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns true if the node carries the given marker.
    pub fn has_annotation(&self, annotation: Annotation) -> bool {
        self.annotations.contains(&annotation)
    }

    /// Iterate the markers on this node.
    pub fn annotations(&self) -> impl Iterator<Item = Annotation> + '_ {
        self.annotations.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_kinds() {
        assert!(NodeKind::Document.is_container());
        assert!(
            NodeKind::NamespaceDeclaration {
                content: "A".into()
            }
            .is_container()
        );
        assert!(
            !NodeKind::GeneratedCodeToken {
                text: String::new()
            }
            .is_container()
        );
    }

    #[test]
    fn test_is_directive() {
        let kind = NodeKind::Directive {
            name: "page".into(),
            tokens: vec![],
        };
        assert!(kind.is_directive("page"));
        assert!(!kind.is_directive("model"));
        assert!(!NodeKind::Document.is_directive("page"));
    }

    #[test]
    fn test_annotation_display() {
        assert_eq!(Annotation::PrimaryNamespace.to_string(), "primary-namespace");
        assert_eq!(Annotation::PrimaryClass.to_string(), "primary-class");
    }
}
