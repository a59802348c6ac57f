//! Compile command report data structures.

use std::path::PathBuf;

use razor_language::{CompilationContext, Diagnostic, Severity};

use super::output::{Output, Report};

/// Report data from compiling one template.
#[derive(Debug)]
pub struct CompileReport {
    /// Syntax and phase diagnostics.
    pub diagnostics: Vec<Diagnostic>,
    /// Document kind chosen by classification.
    pub document_kind: Option<String>,
    /// Where the generated code was written, if not stdout.
    pub output: Option<PathBuf>,
    /// Where phase snapshots were written.
    pub snapshots: Option<PathBuf>,
}

impl CompileReport {
    pub fn from_context(ctx: &CompilationContext) -> Self {
        Self {
            diagnostics: ctx
                .syntax_diagnostics()
                .chain(&ctx.diagnostics)
                .cloned()
                .collect(),
            document_kind: ctx.ir.as_ref().and_then(|ir| ir.document_kind.clone()),
            output: None,
            snapshots: None,
        }
    }

    /// Whether any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

impl Report for CompileReport {
    fn render(&self, out: &mut dyn Output) {
        for diagnostic in &self.diagnostics {
            match diagnostic.severity {
                Severity::Error => out.error(&diagnostic.to_string()),
                Severity::Warning => out.warning(&diagnostic.to_string()),
                Severity::Info => out.preformatted(&diagnostic.to_string()),
            }
        }

        let Some(output) = &self.output else {
            return;
        };
        if !self.diagnostics.is_empty() {
            out.newline();
        }
        out.preformatted(&format!("✓ wrote {}", output.display()));
        if let Some(kind) = &self.document_kind {
            out.key_value("document kind", kind);
        }
        if let Some(dir) = &self.snapshots {
            out.key_value("snapshots", &dir.display().to_string());
        }
    }
}
