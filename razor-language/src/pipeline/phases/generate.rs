//! Code generation phase - writes C# from the IR tree.

use eyre::Result;

use crate::{
    codegen::{CSharpWriter, GeneratedCode},
    pipeline::{CompilationContext, Phase, PhaseKind},
};

/// Phase that serialises the IR tree into [`GeneratedCode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeGenerationPhase;

impl Phase for CodeGenerationPhase {
    fn name(&self) -> &'static str {
        "generate"
    }

    fn description(&self) -> &'static str {
        "Write C# source from the IR tree"
    }

    fn kind(&self) -> PhaseKind {
        PhaseKind::CodeGeneration
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let Some(document) = &ctx.ir else {
            tracing::debug!("no IR tree, skipping code generation");
            return Ok(());
        };

        let text = CSharpWriter::new(document).write(document);
        tracing::debug!(bytes = text.len(), "generated code");
        ctx.generated = Some(GeneratedCode {
            text,
            document_kind: document.document_kind.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use razor_ir::IrDocument;

    use super::*;
    use crate::SourceDocument;

    #[test]
    fn test_generate_phase() {
        let mut ctx = CompilationContext::new(SourceDocument::default());
        let mut document = IrDocument::default();
        document.document_kind = Some("default".into());
        ctx.ir = Some(document);

        CodeGenerationPhase.run(&mut ctx).expect("generate should succeed");

        let generated = ctx.generated.expect("generated code");
        assert_eq!(generated.document_kind.as_deref(), Some("default"));
        assert!(generated.text.starts_with("#pragma warning disable 1591"));
    }

    #[test]
    fn test_no_ir_is_noop() {
        let mut ctx = CompilationContext::new(SourceDocument::default());
        CodeGenerationPhase.run(&mut ctx).expect("generate should succeed");
        assert!(ctx.generated.is_none());
    }
}
