//! Compilation context passed through pipeline phases.

use razor_ir::{CodeGenerationOptions, IrDocument};

use crate::{
    Diagnostic, ParserOptions, Severity, SourceDocument, codegen::GeneratedCode,
    syntax::SyntaxTree,
};

/// Context passed through all pipeline phases.
///
/// One context exists per compiled template. Phases only ever add to it:
/// the parsing phase fills in the syntax trees, lowering creates the IR and
/// later phases mutate the IR or attach the generated output.
#[derive(Debug)]
pub struct CompilationContext {
    /// The template being compiled.
    pub source: SourceDocument,
    /// Import fragments, in the order they apply.
    pub imports: Vec<SourceDocument>,
    /// Document-level parser options, taking precedence over the engine's.
    pub parser_options: Option<ParserOptions>,
    /// Document-level code generation options, taking precedence over the engine's.
    pub codegen_options: Option<CodeGenerationOptions>,
    /// Parsed form of `source` (populated by ParsingPhase).
    pub syntax_tree: Option<SyntaxTree>,
    /// Parsed form of each import; index `i` belongs to `imports[i]`.
    pub import_syntax_trees: Vec<SyntaxTree>,
    /// The IR tree (populated by LoweringPhase).
    pub ir: Option<IrDocument>,
    /// The generated source (populated by CodeGenerationPhase).
    pub generated: Option<GeneratedCode>,
    /// Diagnostics raised by phases. Parse diagnostics stay on the trees.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    /// Create a new compilation context for a template.
    pub fn new(source: SourceDocument) -> Self {
        Self {
            source,
            imports: Vec::new(),
            parser_options: None,
            codegen_options: None,
            syntax_tree: None,
            import_syntax_trees: Vec::new(),
            ir: None,
            generated: None,
            diagnostics: Vec::new(),
        }
    }

    /// Set the import fragments.
    pub fn with_imports(mut self, imports: Vec<SourceDocument>) -> Self {
        self.imports = imports;
        self
    }

    /// Override the engine's parser options for this document.
    pub fn with_parser_options(mut self, options: ParserOptions) -> Self {
        self.parser_options = Some(options);
        self
    }

    /// Override the engine's code generation options for this document.
    pub fn with_codegen_options(mut self, options: CodeGenerationOptions) -> Self {
        self.codegen_options = Some(options);
        self
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    /// Count the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    /// Count the number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    /// Add an error diagnostic.
    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    /// Add a warning diagnostic.
    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    /// Add an info diagnostic.
    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    /// Add a prepared diagnostic.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get all error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Diagnostics attached to the syntax trees: imports first, then the
    /// template itself.
    pub fn syntax_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.import_syntax_trees
            .iter()
            .chain(self.syntax_tree.iter())
            .flat_map(|tree| tree.diagnostics.iter())
    }

    /// Returns true if any syntax tree carries an error.
    pub fn has_syntax_errors(&self) -> bool {
        self.syntax_diagnostics().any(|d| d.severity.is_error())
    }

    /// Take the generated code out of the context.
    pub fn take_generated(&mut self) -> Option<GeneratedCode> {
        self.generated.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_creation() {
        let ctx = CompilationContext::new(SourceDocument::new("<p></p>"));

        assert!(ctx.syntax_tree.is_none());
        assert!(ctx.import_syntax_trees.is_empty());
        assert!(ctx.ir.is_none());
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_context_diagnostics() {
        let mut ctx = CompilationContext::new(SourceDocument::default());

        ctx.add_error("test", "test error");
        ctx.add_warning("test", "test warning");

        assert!(ctx.has_errors());
        assert!(ctx.has_warnings());
        assert_eq!(ctx.error_count(), 1);
        assert_eq!(ctx.warning_count(), 1);
    }

    #[test]
    fn test_context_no_errors() {
        let mut ctx = CompilationContext::new(SourceDocument::default());

        ctx.add_warning("test", "just a warning");
        ctx.add_info("test", "just info");

        assert!(!ctx.has_errors());
        assert!(ctx.has_warnings());
    }

    #[test]
    fn test_syntax_diagnostics_order() {
        let options = ParserOptions::default();
        let import = SourceDocument::new("@(").with_relative_path("/_ViewImports.cshtml");
        let source = SourceDocument::new("@*").with_relative_path("/Index.cshtml");

        let mut ctx = CompilationContext::new(source.clone());
        ctx.import_syntax_trees = vec![SyntaxTree::parse(&import, &options)];
        ctx.syntax_tree = Some(SyntaxTree::parse(&source, &options));

        let codes: Vec<_> = ctx
            .syntax_diagnostics()
            .filter_map(|d| d.code.as_deref())
            .collect();
        assert_eq!(codes, vec!["RZ1006", "RZ1004"]);
        assert!(ctx.has_syntax_errors());
        assert!(!ctx.has_errors());
    }
}
