//! Serialises an IR tree to C#.

use razor_ir::{IrDocument, NodeId, NodeKind, Visitor, walk};

use super::{CodeBuilder, Indent};
use crate::csharp::verbatim_literal;

/// Writes C# for an IR document.
///
/// Structural nodes become blocks, markup becomes `WriteLiteral` calls and
/// expressions become `Write` calls. Directive nodes produce no output; the
/// classifiers have already folded them into the tree's structure.
pub struct CSharpWriter {
    builder: CodeBuilder,
    design_time: bool,
}

impl CSharpWriter {
    pub fn new(document: &IrDocument) -> Self {
        Self {
            builder: CodeBuilder::new(Indent::from_options(&document.options)),
            design_time: document.options.design_time,
        }
    }

    /// Write the whole document and return the source text.
    pub fn write(mut self, document: &IrDocument) -> String {
        self.visit(document, document.root());
        self.builder.build()
    }
}

impl Visitor for CSharpWriter {
    fn visit_document(&mut self, document: &IrDocument, id: NodeId) {
        self.builder.push_unindented("#pragma warning disable 1591");
        walk(self, document, id);
        self.builder.push_unindented("#pragma warning restore 1591");
    }

    fn visit_using(&mut self, _: &IrDocument, _: NodeId, content: &str) {
        self.builder.push_line(&format!("using {};", content));
    }

    fn visit_namespace(&mut self, document: &IrDocument, id: NodeId, content: &str) {
        self.builder
            .push_line(&format!("namespace {}", content))
            .push_open_brace();
        walk(self, document, id);
        self.builder.push_close_brace();
    }

    fn visit_class(&mut self, document: &IrDocument, id: NodeId, class_name: &str) {
        let NodeKind::ClassDeclaration {
            base_type,
            modifiers,
            ..
        } = document.kind(id)
        else {
            return;
        };

        let mut header = String::new();
        for modifier in modifiers {
            header.push_str(modifier);
            header.push(' ');
        }
        header.push_str("class ");
        header.push_str(class_name);
        if let Some(base_type) = base_type {
            header.push_str(" : ");
            header.push_str(base_type);
        }

        self.builder.push_line(&header).push_open_brace();
        walk(self, document, id);
        self.builder.push_close_brace();
    }

    fn visit_method(&mut self, document: &IrDocument, id: NodeId, method_name: &str) {
        let NodeKind::MethodDeclaration {
            return_type,
            modifiers,
            ..
        } = document.kind(id)
        else {
            return;
        };

        let mut header = String::new();
        for modifier in modifiers {
            header.push_str(modifier);
            header.push(' ');
        }
        header.push_str(return_type);
        header.push(' ');
        header.push_str(method_name);
        header.push_str("()");

        // async methods without awaits
        self.builder
            .push_line("#pragma warning disable 1998")
            .push_line(&header)
            .push_open_brace();
        walk(self, document, id);
        self.builder
            .push_close_brace()
            .push_line("#pragma warning restore 1998");
    }

    fn visit_html(&mut self, _: &IrDocument, _: NodeId, content: &str) {
        if self.design_time {
            return;
        }
        self.builder
            .push_line(&format!("WriteLiteral({});", verbatim_literal(Some(content))));
    }

    fn visit_expression(&mut self, _: &IrDocument, _: NodeId, content: &str) {
        self.builder.push_line(&format!("Write({});", content.trim()));
    }

    fn visit_code(&mut self, _: &IrDocument, _: NodeId, content: &str) {
        self.builder.push_lines(content.trim());
    }

    fn visit_token(&mut self, _: &IrDocument, _: NodeId, text: &str) {
        self.builder.push_line(text);
    }
}
