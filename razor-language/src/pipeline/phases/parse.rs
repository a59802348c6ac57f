//! Parsing phase - turns the template and its imports into syntax trees.

use eyre::Result;

use crate::{
    FeatureRegistry, ParserOptions, ParserOptionsFeature,
    pipeline::{CompilationContext, Phase, PhaseKind},
    syntax::SyntaxTree,
};

/// Phase that parses the template and each import.
///
/// Options come from the context when the document overrides them, else from
/// the engine's [`ParserOptionsFeature`]. Imports are parsed independently of
/// each other, and tree `i` always belongs to import `i`.
#[derive(Debug, Default)]
pub struct ParsingPhase {
    options: ParserOptions,
}

impl ParsingPhase {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Phase for ParsingPhase {
    fn name(&self) -> &'static str {
        "parse"
    }

    fn description(&self) -> &'static str {
        "Parse the template and its imports into syntax trees"
    }

    fn kind(&self) -> PhaseKind {
        PhaseKind::Parsing
    }

    fn initialize(&mut self, features: &FeatureRegistry) -> crate::Result<()> {
        self.options = features
            .require::<ParserOptionsFeature>(self.name())?
            .options();
        Ok(())
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let options = ctx.parser_options.as_ref().unwrap_or(&self.options);

        let syntax_tree = SyntaxTree::parse(&ctx.source, options);
        let import_syntax_trees: Vec<_> = ctx
            .imports
            .iter()
            .map(|import| SyntaxTree::parse(import, options))
            .collect();

        tracing::debug!(
            source = ctx.source.display_name(),
            imports = import_syntax_trees.len(),
            diagnostics = syntax_tree.diagnostics.len(),
            "parsed"
        );

        ctx.syntax_tree = Some(syntax_tree);
        ctx.import_syntax_trees = import_syntax_trees;
        Ok(())
    }
}
