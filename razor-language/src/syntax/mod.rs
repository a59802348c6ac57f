//! Syntax trees produced by parsing a template.
//!
//! A tree is a flat sequence of [`SyntaxNode`]s in source order plus the
//! diagnostics found while parsing. Parsing never fails: malformed input is
//! reported through [`SyntaxTree::diagnostics`] and the parser recovers.

mod parser;

use serde::Serialize;

use crate::{Diagnostic, ParserOptions, SourceDocument};

/// A byte range in the template text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            len: end.saturating_sub(start),
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// What a syntax node represents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyntaxKind {
    /// Literal markup.
    Markup { text: String },
    /// `@* ... *@`
    Comment { text: String },
    /// `@{ ... }`
    CodeBlock { content: String },
    /// `@name` chains or `@( ... )`.
    Expression { content: String, explicit: bool },
    /// `@name value` for a recognised directive name.
    Directive { name: String, value: Option<String> },
}

/// A node with its location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxNode {
    #[serde(flatten)]
    pub kind: SyntaxKind,
    pub span: Span,
}

/// The parsed form of one template.
#[derive(Debug, Clone, Serialize)]
pub struct SyntaxTree {
    /// Name of the parsed document, for reporting.
    pub source_name: String,
    /// Nodes in source order.
    pub nodes: Vec<SyntaxNode>,
    /// Problems found while parsing.
    pub diagnostics: Vec<Diagnostic>,
    /// The options the tree was parsed with.
    #[serde(skip)]
    pub options: ParserOptions,
}

impl SyntaxTree {
    /// Parse a template. Never fails; see [`SyntaxTree::diagnostics`].
    pub fn parse(source: &SourceDocument, options: &ParserOptions) -> Self {
        let (nodes, diagnostics) = parser::Parser::new(source, options).parse();
        tracing::trace!(
            source = source.display_name(),
            nodes = nodes.len(),
            diagnostics = diagnostics.len(),
            "parsed template"
        );
        Self {
            source_name: source.display_name().to_string(),
            nodes,
            diagnostics,
            options: options.clone(),
        }
    }

    /// Returns true if any error diagnostics were recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Directive names and values in source order.
    pub fn directives(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.nodes.iter().filter_map(|node| match &node.kind {
            SyntaxKind::Directive { name, value } => Some((name.as_str(), value.as_deref())),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_end() {
        let span = Span::new(3, 7);
        assert_eq!(span.len, 4);
        assert_eq!(span.end(), 7);
    }

    #[test]
    fn test_directives_iterator() {
        let source = SourceDocument::new("@using System\n@namespace App\n<p></p>");
        let tree = SyntaxTree::parse(&source, &ParserOptions::default());

        let directives: Vec<_> = tree.directives().collect();
        assert_eq!(
            directives,
            vec![("using", Some("System")), ("namespace", Some("App"))]
        );
        assert!(!tree.has_errors());
    }
}
