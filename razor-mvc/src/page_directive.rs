//! The `@page` directive.

use razor_ir::{IrDocument, NodeId, NodeKind};

/// A `@page` directive found in an IR tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDirective {
    /// The directive node.
    pub node: NodeId,
    /// Route template, when the directive's first token is a string literal.
    pub route_template: Option<String>,
}

impl PageDirective {
    /// The directive name.
    pub const DIRECTIVE: &'static str = "page";

    /// The first `@page` directive anywhere in the tree.
    pub fn find(document: &IrDocument) -> Option<Self> {
        let node = document.directives(Self::DIRECTIVE).next()?;
        let route_template = match document.kind(node) {
            NodeKind::Directive { tokens, .. } => {
                tokens.first().and_then(|token| string_literal(token))
            }
            _ => None,
        };
        Some(Self {
            node,
            route_template,
        })
    }
}

fn string_literal(token: &str) -> Option<String> {
    token
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .map(str::to_string)
}
