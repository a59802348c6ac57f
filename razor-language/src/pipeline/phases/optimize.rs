//! Optimization phase - runs the registered IR passes.

use eyre::Result;

use crate::{
    FeatureRegistry,
    pipeline::{CompilationContext, IrPasses, Phase, PhaseKind},
};

/// Phase that runs every [`IrPass`](crate::pipeline::IrPass) in order.
#[derive(Debug, Default)]
pub struct OptimizationPhase {
    passes: IrPasses,
}

impl OptimizationPhase {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Phase for OptimizationPhase {
    fn name(&self) -> &'static str {
        "optimize"
    }

    fn description(&self) -> &'static str {
        "Run IR passes over the classified tree"
    }

    fn kind(&self) -> PhaseKind {
        PhaseKind::Optimization
    }

    fn initialize(&mut self, features: &FeatureRegistry) -> crate::Result<()> {
        self.passes = features.require::<IrPasses>(self.name())?.clone();
        Ok(())
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let Some(document) = ctx.ir.as_mut() else {
            tracing::debug!("no IR tree, skipping passes");
            return Ok(());
        };

        for pass in self.passes.iter() {
            let outcome = pass.execute(&ctx.source, document);
            tracing::debug!(pass = pass.name(), %outcome, "ran pass");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use razor_ir::{IrDocument, NodeKind};

    use super::*;
    use crate::{
        SourceDocument,
        pipeline::{IrPass, PassOutcome},
    };

    struct AppendToken(&'static str);

    impl IrPass for AppendToken {
        fn name(&self) -> &'static str {
            "append-token"
        }

        fn execute(&self, _: &SourceDocument, document: &mut IrDocument) -> PassOutcome {
            let root = document.root();
            document.add_child(
                root,
                NodeKind::GeneratedCodeToken {
                    text: self.0.into(),
                },
            );
            PassOutcome::Applied
        }
    }

    #[test]
    fn test_runs_passes_in_order() {
        let mut registry = FeatureRegistry::new();
        registry.register(IrPasses(Arc::from(vec![
            Box::new(AppendToken("a")) as Box<dyn IrPass>,
            Box::new(AppendToken("b")),
        ])));
        let mut phase = OptimizationPhase::new();
        phase.initialize(&registry).expect("passes registered");

        let mut ctx = CompilationContext::new(SourceDocument::default());
        ctx.ir = Some(IrDocument::default());
        phase.run(&mut ctx).expect("optimize should succeed");

        let document = ctx.ir.as_ref().expect("ir");
        let texts: Vec<_> = document
            .children(document.root())
            .iter()
            .map(|&id| match document.kind(id) {
                NodeKind::GeneratedCodeToken { text } => text.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_requires_registered_passes() {
        let mut phase = OptimizationPhase::new();
        assert!(phase.initialize(&FeatureRegistry::new()).is_err());
    }
}
