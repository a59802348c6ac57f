//! Generic traversal over the node sum type.

use crate::{IrDocument, NodeId, NodeKind};

/// Read-only visitor over an IR tree.
///
/// Every `visit_*` hook defaults to descending into the node's children, so
/// an implementation only overrides the variants it cares about. Call
/// [`walk`] from an override to keep descending.
#[allow(unused_variables)]
pub trait Visitor {
    /// Dispatch on the node's variant.
    fn visit(&mut self, document: &IrDocument, id: NodeId) {
        match document.kind(id) {
            NodeKind::Document => self.visit_document(document, id),
            NodeKind::Using { content } => self.visit_using(document, id, content),
            NodeKind::NamespaceDeclaration { content } => {
                self.visit_namespace(document, id, content)
            }
            NodeKind::ClassDeclaration { class_name, .. } => {
                self.visit_class(document, id, class_name)
            }
            NodeKind::MethodDeclaration { method_name, .. } => {
                self.visit_method(document, id, method_name)
            }
            NodeKind::Directive { name, tokens } => {
                self.visit_directive(document, id, name, tokens)
            }
            NodeKind::HtmlContent { content } => self.visit_html(document, id, content),
            NodeKind::CSharpExpression { content } => {
                self.visit_expression(document, id, content)
            }
            NodeKind::CSharpCode { content } => self.visit_code(document, id, content),
            NodeKind::GeneratedCodeToken { text } => self.visit_token(document, id, text),
        }
    }

    fn visit_document(&mut self, document: &IrDocument, id: NodeId) {
        walk(self, document, id);
    }

    fn visit_using(&mut self, document: &IrDocument, id: NodeId, content: &str) {}

    fn visit_namespace(&mut self, document: &IrDocument, id: NodeId, content: &str) {
        walk(self, document, id);
    }

    fn visit_class(&mut self, document: &IrDocument, id: NodeId, class_name: &str) {
        walk(self, document, id);
    }

    fn visit_method(&mut self, document: &IrDocument, id: NodeId, method_name: &str) {
        walk(self, document, id);
    }

    fn visit_directive(
        &mut self,
        document: &IrDocument,
        id: NodeId,
        name: &str,
        tokens: &[String],
    ) {
    }

    fn visit_html(&mut self, document: &IrDocument, id: NodeId, content: &str) {}

    fn visit_expression(&mut self, document: &IrDocument, id: NodeId, content: &str) {}

    fn visit_code(&mut self, document: &IrDocument, id: NodeId, content: &str) {}

    fn visit_token(&mut self, document: &IrDocument, id: NodeId, text: &str) {}
}

/// Visit every child of `id` in order.
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, document: &IrDocument, id: NodeId) {
    for &child in document.children(id) {
        visitor.visit(document, child);
    }
}
