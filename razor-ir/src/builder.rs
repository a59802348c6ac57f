//! Scoped insertion cursor over an IR document.

use crate::{IrDocument, NodeId, NodeKind};

/// Cursor that wires new nodes into a document.
///
/// The builder keeps an explicit stack of insertion points. [`descend`]
/// attaches a node and makes it the new insertion point; [`append`] attaches
/// a node and leaves the insertion point alone; [`ascend`] returns to the
/// previous insertion point. Children always reflect call order.
///
/// The builder never owns nodes: the document's arena does.
///
/// [`descend`]: IrBuilder::descend
/// [`append`]: IrBuilder::append
/// [`ascend`]: IrBuilder::ascend
///
/// # Example
///
/// ```
/// use razor_ir::{IrBuilder, IrDocument, NodeKind};
///
/// let mut document = IrDocument::default();
/// let mut builder = IrBuilder::new(&mut document);
/// let namespace = builder.descend(NodeKind::NamespaceDeclaration {
///     content: "App".into(),
/// });
/// builder.append(NodeKind::Using {
///     content: "System".into(),
/// });
///
/// assert_eq!(document.children(document.root()), &[namespace]);
/// assert_eq!(document.children(namespace).len(), 1);
/// ```
pub struct IrBuilder<'a> {
    document: &'a mut IrDocument,
    stack: Vec<NodeId>,
}

impl<'a> IrBuilder<'a> {
    /// Create a builder whose insertion point is the document root.
    pub fn new(document: &'a mut IrDocument) -> Self {
        let root = document.root();
        Self::at(document, root)
    }

    /// Create a builder whose insertion point is `node`.
    pub fn at(document: &'a mut IrDocument, node: NodeId) -> Self {
        Self {
            document,
            stack: vec![node],
        }
    }

    /// The current insertion point.
    pub fn current(&self) -> NodeId {
        // The stack is never empty: `ascend` refuses to pop the last entry.
        self.stack[self.stack.len() - 1]
    }

    /// Nesting depth relative to where the builder started.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Attach `kind` as the next child of the insertion point and make it
    /// the new insertion point.
    pub fn descend(&mut self, kind: NodeKind) -> NodeId {
        let id = self.append(kind);
        self.stack.push(id);
        id
    }

    /// Attach `kind` as the next child of the insertion point.
    pub fn append(&mut self, kind: NodeKind) -> NodeId {
        let parent = self.current();
        self.document.add_child(parent, kind)
    }

    /// Move an existing node under the insertion point.
    pub fn adopt(&mut self, node: NodeId) {
        let parent = self.current();
        self.document.adopt(parent, node);
    }

    /// Return to the previous insertion point.
    ///
    /// Returns the node that was left, or `None` when already at the
    /// starting point.
    pub fn ascend(&mut self) -> Option<NodeId> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }
}
