//! The IR document: an arena of nodes rooted at a single `Document` node.

use std::collections::BTreeSet;

use serde::{Serialize, Serializer};

use crate::{Annotation, CodeGenerationOptions, IrNode, NodeId, NodeKind};

/// Owner of an IR tree.
///
/// Nodes are stored in an append-only arena. Detaching a node removes it from
/// its parent's child list but keeps it in the arena, so [`NodeId`]s stay
/// valid for the lifetime of the document. Traversals always start from the
/// root, which makes detached nodes unreachable.
#[derive(Debug, Clone)]
pub struct IrDocument {
    nodes: Vec<IrNode>,
    root: NodeId,
    /// Classification tag set by a document classifier (e.g. `"mvc.1.0.view"`).
    pub document_kind: Option<String>,
    /// Code generation configuration for this document.
    pub options: CodeGenerationOptions,
}

impl IrDocument {
    /// Create a document holding only the root node.
    pub fn new(options: CodeGenerationOptions) -> Self {
        Self {
            nodes: vec![IrNode::new(NodeKind::Document)],
            root: NodeId(0),
            document_kind: None,
            options,
        }
    }

    /// The root `Document` node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, including detached ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root node is created with the document.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different document.
    pub fn node(&self, id: NodeId) -> &IrNode {
        &self.nodes[id.0]
    }

    /// Borrow a node's variant data.
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    /// Mutably borrow a node's variant data.
    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.0].kind
    }

    /// Children of a node in emission order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Parent of a node, `None` for the root and detached nodes.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Position of `child` among the children of `parent`.
    pub fn index_of(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == child)
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(IrNode::new(kind));
        id
    }

    /// Create a node and append it as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.alloc(kind);
        self.adopt(parent, id);
        id
    }

    /// Create a node and insert it among the children of `parent` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the number of children.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, kind: NodeKind) -> NodeId {
        let id = self.alloc(kind);
        self.nodes[id.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(index, id);
        id
    }

    /// Append an existing node as the last child of `parent`.
    ///
    /// The node is detached from its current parent first.
    pub fn adopt(&mut self, parent: NodeId, child: NodeId) {
        debug_assert_ne!(parent, child, "a node cannot adopt itself");
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Remove a node from its parent's children. The subtree stays intact.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
    }

    /// Detach every child of `id` and return them in their former order.
    pub fn take_children(&mut self, id: NodeId) -> Vec<NodeId> {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for &child in &children {
            self.nodes[child.0].parent = None;
        }
        children
    }

    /// Put `annotation` on `id`, removing it from any other node.
    pub fn annotate(&mut self, id: NodeId, annotation: Annotation) {
        for node in &mut self.nodes {
            node.annotations.remove(&annotation);
        }
        self.nodes[id.0].annotations.insert(annotation);
    }

    /// The reachable node carrying `annotation`, if any.
    pub fn find_annotated(&self, annotation: Annotation) -> Option<NodeId> {
        self.descendants(self.root)
            .find(|&id| self.node(id).has_annotation(annotation))
    }

    /// The primary namespace node and its content.
    pub fn primary_namespace(&self) -> Option<(NodeId, &str)> {
        let id = self.find_annotated(Annotation::PrimaryNamespace)?;
        match self.kind(id) {
            NodeKind::NamespaceDeclaration { content } => Some((id, content.as_str())),
            _ => None,
        }
    }

    /// The primary class node and its name.
    pub fn primary_class(&self) -> Option<(NodeId, &str)> {
        let id = self.find_annotated(Annotation::PrimaryClass)?;
        match self.kind(id) {
            NodeKind::ClassDeclaration { class_name, .. } => Some((id, class_name.as_str())),
            _ => None,
        }
    }

    /// The primary method node.
    pub fn primary_method(&self) -> Option<NodeId> {
        self.find_annotated(Annotation::PrimaryMethod)
            .filter(|&id| matches!(self.kind(id), NodeKind::MethodDeclaration { .. }))
    }

    /// Pre-order traversal of the nodes below `id` (excluding `id`).
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants {
            document: self,
            stack,
        }
    }

    /// Every reachable directive node with the given name, in tree order.
    pub fn directives<'a>(&'a self, name: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.descendants(self.root)
            .filter(move |&id| self.kind(id).is_directive(name))
    }
}

impl Default for IrDocument {
    fn default() -> Self {
        Self::new(CodeGenerationOptions::default())
    }
}

/// Pre-order iterator returned by [`IrDocument::descendants`].
pub struct Descendants<'a> {
    document: &'a IrDocument,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.document.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Nested view of a subtree used for serialization.
#[derive(Serialize)]
struct TreeNode<'a> {
    #[serde(flatten)]
    kind: &'a NodeKind,
    #[serde(skip_serializing_if = "no_annotations")]
    annotations: &'a BTreeSet<Annotation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<TreeNode<'a>>,
}

fn no_annotations(annotations: &&BTreeSet<Annotation>) -> bool {
    annotations.is_empty()
}

impl<'a> TreeNode<'a> {
    fn build(document: &'a IrDocument, id: NodeId) -> Self {
        let node = document.node(id);
        Self {
            kind: &node.kind,
            annotations: &node.annotations,
            children: node
                .children
                .iter()
                .map(|&child| TreeNode::build(document, child))
                .collect(),
        }
    }
}

impl Serialize for IrDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Root<'a> {
            document_kind: &'a Option<String>,
            options: &'a CodeGenerationOptions,
            tree: TreeNode<'a>,
        }

        Root {
            document_kind: &self.document_kind,
            options: &self.options,
            tree: TreeNode::build(self, self.root),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn namespace(content: &str) -> NodeKind {
        NodeKind::NamespaceDeclaration {
            content: content.into(),
        }
    }

    fn token(text: &str) -> NodeKind {
        NodeKind::GeneratedCodeToken { text: text.into() }
    }

    #[test]
    fn test_new_document_has_only_root() {
        let doc = IrDocument::default();
        assert_eq!(doc.len(), 1);
        assert!(doc.children(doc.root()).is_empty());
        assert!(doc.document_kind.is_none());
    }

    #[test]
    fn test_insert_child_positions() {
        let mut doc = IrDocument::default();
        let root = doc.root();
        let a = doc.add_child(root, token("a"));
        let c = doc.add_child(root, token("c"));
        let b = doc.insert_child(root, 1, token("b"));

        assert_eq!(doc.children(root), &[a, b, c]);
        assert_eq!(doc.parent(b), Some(root));
        assert_eq!(doc.index_of(root, c), Some(2));
    }

    #[test]
    fn test_annotation_is_unique() {
        let mut doc = IrDocument::default();
        let root = doc.root();
        let first = doc.add_child(root, namespace("First"));
        let second = doc.add_child(first, namespace("Second"));

        doc.annotate(first, Annotation::PrimaryNamespace);
        doc.annotate(second, Annotation::PrimaryNamespace);

        assert!(!doc.node(first).has_annotation(Annotation::PrimaryNamespace));
        assert_eq!(doc.primary_namespace(), Some((second, "Second")));
    }

    #[test]
    fn test_primary_namespace_requires_namespace_kind() {
        let mut doc = IrDocument::default();
        let root = doc.root();
        let tok = doc.add_child(root, token("x"));
        doc.annotate(tok, Annotation::PrimaryNamespace);

        assert!(doc.primary_namespace().is_none());
    }

    #[test]
    fn test_descendants_pre_order() {
        let mut doc = IrDocument::default();
        let root = doc.root();
        let ns = doc.add_child(root, namespace("N"));
        let inner = doc.add_child(ns, token("inner"));
        let after = doc.add_child(root, token("after"));

        let order: Vec<_> = doc.descendants(root).collect();
        assert_eq!(order, vec![ns, inner, after]);
    }

    #[test]
    fn test_detach_and_adopt() {
        let mut doc = IrDocument::default();
        let root = doc.root();
        let ns = doc.add_child(root, namespace("N"));
        let tok = doc.add_child(root, token("t"));

        doc.adopt(ns, tok);

        assert_eq!(doc.children(root), &[ns]);
        assert_eq!(doc.children(ns), &[tok]);
        assert_eq!(doc.parent(tok), Some(ns));
    }

    #[test]
    fn test_detached_nodes_are_unreachable() {
        let mut doc = IrDocument::default();
        let root = doc.root();
        let ns = doc.add_child(root, namespace("N"));
        doc.annotate(ns, Annotation::PrimaryNamespace);
        doc.detach(ns);

        assert!(doc.find_annotated(Annotation::PrimaryNamespace).is_none());
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_take_children_preserves_order() {
        let mut doc = IrDocument::default();
        let root = doc.root();
        let a = doc.add_child(root, token("a"));
        let b = doc.add_child(root, token("b"));

        assert_eq!(doc.take_children(root), vec![a, b]);
        assert!(doc.children(root).is_empty());
        assert!(doc.parent(a).is_none());
    }

    #[test]
    fn test_serialize_nested_tree() {
        let mut doc = IrDocument::default();
        let root = doc.root();
        let ns = doc.add_child(root, namespace("N"));
        doc.annotate(ns, Annotation::PrimaryNamespace);

        let json = serde_json::to_value(&doc).expect("serialize");
        let namespace = &json["tree"]["children"][0];
        assert_eq!(namespace["kind"], "namespace_declaration");
        assert_eq!(namespace["content"], "N");
        assert_eq!(namespace["annotations"][0], "primary-namespace");
        assert!(json["document_kind"].is_null());
    }
}
