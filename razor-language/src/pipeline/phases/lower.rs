//! Lowering phase - builds the initial IR tree from the syntax trees.

use eyre::Result;
use razor_ir::{CodeGenerationOptions, IrBuilder, IrDocument, NodeKind};

use crate::{
    CodeGenerationOptionsFeature, FeatureRegistry,
    pipeline::{CompilationContext, Phase, PhaseKind},
    syntax::{SyntaxKind, SyntaxTree},
};

/// Phase that lowers syntax trees into a flat IR tree under the root.
///
/// Imports contribute only their directives, in import order, ahead of the
/// template's own nodes. Comments are dropped.
#[derive(Debug, Default)]
pub struct LoweringPhase {
    options: CodeGenerationOptions,
}

impl LoweringPhase {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Phase for LoweringPhase {
    fn name(&self) -> &'static str {
        "lower"
    }

    fn description(&self) -> &'static str {
        "Transform syntax trees to the IR tree"
    }

    fn kind(&self) -> PhaseKind {
        PhaseKind::Lowering
    }

    fn initialize(&mut self, features: &FeatureRegistry) -> crate::Result<()> {
        self.options = features
            .require::<CodeGenerationOptionsFeature>(self.name())?
            .options();
        Ok(())
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let Some(syntax_tree) = &ctx.syntax_tree else {
            tracing::debug!("no syntax tree, skipping lowering");
            return Ok(());
        };

        let options = ctx
            .codegen_options
            .clone()
            .unwrap_or_else(|| self.options.clone());
        let mut document = IrDocument::new(options);
        let mut builder = IrBuilder::new(&mut document);

        for import in &ctx.import_syntax_trees {
            lower_tree(&mut builder, import, true);
        }
        lower_tree(&mut builder, syntax_tree, false);

        tracing::debug!(nodes = document.len(), "lowered");
        ctx.ir = Some(document);
        Ok(())
    }
}

fn lower_tree(builder: &mut IrBuilder<'_>, tree: &SyntaxTree, directives_only: bool) {
    for node in &tree.nodes {
        let kind = match &node.kind {
            SyntaxKind::Directive { name, value } => lower_directive(name, value.as_deref()),
            _ if directives_only => None,
            SyntaxKind::Markup { text } => Some(NodeKind::HtmlContent {
                content: text.clone(),
            }),
            SyntaxKind::Expression { content, .. } => Some(NodeKind::CSharpExpression {
                content: content.clone(),
            }),
            SyntaxKind::CodeBlock { content } => Some(NodeKind::CSharpCode {
                content: content.clone(),
            }),
            SyntaxKind::Comment { .. } => None,
        };
        if let Some(kind) = kind {
            builder.append(kind);
        }
    }
}

fn lower_directive(name: &str, value: Option<&str>) -> Option<NodeKind> {
    if name == "using" {
        let content = value?.trim_end_matches(';').trim();
        return (!content.is_empty()).then(|| NodeKind::Using {
            content: content.to_string(),
        });
    }
    Some(NodeKind::Directive {
        name: name.to_string(),
        tokens: value.map(directive_tokens).unwrap_or_default(),
    })
}

/// Split a directive value on whitespace, keeping quoted strings and
/// generic argument lists (`Dictionary<string, int>`) whole.
fn directive_tokens(value: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut angle_depth = 0usize;

    for c in value.chars() {
        match c {
            '"' => {
                in_string = !in_string;
                current.push(c);
            }
            '<' if !in_string => {
                angle_depth += 1;
                current.push(c);
            }
            '>' if !in_string => {
                angle_depth = angle_depth.saturating_sub(1);
                current.push(c);
            }
            c if c.is_whitespace() && !in_string && angle_depth == 0 => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParserOptions, SourceDocument};

    fn parsed(text: &str, imports: &[&str]) -> CompilationContext {
        let options = ParserOptions::default().with_directives(["model", "page"]);
        let mut ctx = CompilationContext::new(SourceDocument::new(text));
        ctx.imports = imports.iter().map(|i| SourceDocument::new(*i)).collect();
        ctx.syntax_tree = Some(SyntaxTree::parse(&ctx.source, &options));
        ctx.import_syntax_trees = ctx
            .imports
            .iter()
            .map(|i| SyntaxTree::parse(i, &options))
            .collect();
        ctx
    }

    fn root_kinds(document: &IrDocument) -> Vec<NodeKind> {
        document
            .children(document.root())
            .iter()
            .map(|&id| document.kind(id).clone())
            .collect()
    }

    #[test]
    fn test_lower_phase() {
        let mut ctx = parsed("@model Person\n<p>@Model.Name</p>@* note *@@{ var x = 1; }", &[]);

        LoweringPhase::new().run(&mut ctx).expect("lower should succeed");

        let document = ctx.ir.as_ref().expect("ir");
        assert_eq!(
            root_kinds(document),
            vec![
                NodeKind::Directive {
                    name: "model".into(),
                    tokens: vec!["Person".into()],
                },
                NodeKind::HtmlContent {
                    content: "<p>".into()
                },
                NodeKind::CSharpExpression {
                    content: "Model.Name".into()
                },
                NodeKind::HtmlContent {
                    content: "</p>".into()
                },
                NodeKind::CSharpCode {
                    content: " var x = 1; ".into()
                },
            ]
        );
    }

    #[test]
    fn test_imports_contribute_directives_first() {
        let mut ctx = parsed(
            "@using App.Models\n<p></p>",
            &["@using System\n<ignored/>", "@model Base"],
        );

        LoweringPhase::new().run(&mut ctx).expect("lower should succeed");

        let document = ctx.ir.as_ref().expect("ir");
        assert_eq!(
            root_kinds(document),
            vec![
                NodeKind::Using {
                    content: "System".into()
                },
                NodeKind::Directive {
                    name: "model".into(),
                    tokens: vec!["Base".into()],
                },
                NodeKind::Using {
                    content: "App.Models".into()
                },
                NodeKind::HtmlContent {
                    content: "<p></p>".into()
                },
            ]
        );
    }

    #[test]
    fn test_no_syntax_tree_is_noop() {
        let mut ctx = CompilationContext::new(SourceDocument::new("<p></p>"));
        LoweringPhase::new().run(&mut ctx).expect("lower should succeed");
        assert!(ctx.ir.is_none());
    }

    #[test]
    fn test_document_codegen_options_override() {
        let mut ctx = parsed("", &[]);
        ctx.codegen_options = Some(CodeGenerationOptions::design_time_default());

        LoweringPhase::new().run(&mut ctx).expect("lower should succeed");

        assert!(ctx.ir.as_ref().expect("ir").options.design_time);
    }

    #[test]
    fn test_directive_tokens() {
        assert_eq!(directive_tokens("IFoo Foo"), vec!["IFoo", "Foo"]);
        assert_eq!(directive_tokens("\"/a b\"  x"), vec!["\"/a b\"", "x"]);
        assert_eq!(
            directive_tokens("Dictionary<string, int>"),
            vec!["Dictionary<string, int>"]
        );
        assert!(directive_tokens("   ").is_empty());
    }
}
