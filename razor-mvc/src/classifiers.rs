//! Document classifiers for MVC views and Razor pages.

use razor_ir::IrDocument;
use razor_language::{
    SourceDocument,
    pipeline::{DocumentClassifierPass, DocumentStructure, phases::last_directive_value},
};

use crate::{MVC_VIEW_DOCUMENT_KIND, PageDirective, RAZOR_PAGE_DOCUMENT_KIND};

/// Claims documents that contain a `@page` directive.
#[derive(Debug, Clone, Copy, Default)]
pub struct RazorPageDocumentClassifierPass;

impl RazorPageDocumentClassifierPass {
    pub const BASE_TYPE: &'static str = "global::Microsoft.AspNetCore.Mvc.RazorPages.Page";
}

impl DocumentClassifierPass for RazorPageDocumentClassifierPass {
    fn name(&self) -> &'static str {
        "razor-page-classifier"
    }

    fn document_kind(&self) -> &'static str {
        RAZOR_PAGE_DOCUMENT_KIND
    }

    fn order(&self) -> i32 {
        100
    }

    fn is_match(&self, _: &SourceDocument, document: &IrDocument) -> bool {
        PageDirective::find(document).is_some()
    }

    fn configure(&self, _: &SourceDocument, _: &IrDocument, structure: &mut DocumentStructure) {
        structure
            .base_type
            .get_or_insert_with(|| Self::BASE_TYPE.to_string());
    }
}

/// Claims every document not claimed by an earlier classifier.
///
/// The base type is `RazorPage<TModel>`, with `TModel` taken from the last
/// `@model` directive or `dynamic`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MvcViewDocumentClassifierPass;

impl MvcViewDocumentClassifierPass {
    pub const BASE_TYPE: &'static str = "global::Microsoft.AspNetCore.Mvc.Razor.RazorPage";
    pub const DEFAULT_MODEL: &'static str = "dynamic";
}

impl DocumentClassifierPass for MvcViewDocumentClassifierPass {
    fn name(&self) -> &'static str {
        "mvc-view-classifier"
    }

    fn document_kind(&self) -> &'static str {
        MVC_VIEW_DOCUMENT_KIND
    }

    fn order(&self) -> i32 {
        200
    }

    fn is_match(&self, _: &SourceDocument, _: &IrDocument) -> bool {
        true
    }

    fn configure(&self, _: &SourceDocument, document: &IrDocument, structure: &mut DocumentStructure) {
        if structure.base_type.is_some() {
            return;
        }
        let model = last_directive_value(document, "model")
            .unwrap_or_else(|| Self::DEFAULT_MODEL.to_string());
        structure.base_type = Some(format!("{}<{}>", Self::BASE_TYPE, model));
    }
}

#[cfg(test)]
mod tests {
    use razor_ir::NodeKind;
    use razor_language::pipeline::PassOutcome;

    use super::*;

    fn document(directives: &[(&str, &str)]) -> IrDocument {
        let mut document = IrDocument::default();
        let root = document.root();
        for (name, token) in directives {
            document.add_child(
                root,
                NodeKind::Directive {
                    name: name.to_string(),
                    tokens: vec![token.to_string()],
                },
            );
        }
        document.add_child(
            root,
            NodeKind::HtmlContent {
                content: "<p></p>".into(),
            },
        );
        document
    }

    fn base_type(document: &IrDocument) -> Option<&str> {
        let (class, _) = document.primary_class()?;
        match document.kind(class) {
            NodeKind::ClassDeclaration { base_type, .. } => base_type.as_deref(),
            _ => None,
        }
    }

    #[test]
    fn test_page_classifier_claims_page() {
        let source = SourceDocument::new("").with_relative_path("/Pages/Index.cshtml");
        let mut document = document(&[("page", "\"/home\"")]);

        let outcome = RazorPageDocumentClassifierPass.classify(&source, &mut document);

        assert_eq!(outcome, PassOutcome::Applied);
        assert_eq!(document.document_kind.as_deref(), Some(RAZOR_PAGE_DOCUMENT_KIND));
        assert_eq!(base_type(&document), Some(RazorPageDocumentClassifierPass::BASE_TYPE));
        assert_eq!(
            document.primary_class().map(|(_, name)| name),
            Some("Pages_Index")
        );
    }

    #[test]
    fn test_page_classifier_ignores_views() {
        let mut document = document(&[]);
        let outcome =
            RazorPageDocumentClassifierPass.classify(&SourceDocument::default(), &mut document);

        assert_eq!(outcome, PassOutcome::Skipped);
        assert_eq!(document.document_kind, None);
        assert!(document.primary_namespace().is_none());
    }

    #[test]
    fn test_view_classifier_uses_model() {
        let mut document = document(&[("model", "IEnumerable<Order>")]);

        MvcViewDocumentClassifierPass.classify(&SourceDocument::default(), &mut document);

        assert_eq!(document.document_kind.as_deref(), Some(MVC_VIEW_DOCUMENT_KIND));
        assert_eq!(
            base_type(&document),
            Some("global::Microsoft.AspNetCore.Mvc.Razor.RazorPage<IEnumerable<Order>>")
        );
    }

    #[test]
    fn test_view_classifier_defaults_to_dynamic() {
        let mut document = document(&[]);
        MvcViewDocumentClassifierPass.classify(&SourceDocument::default(), &mut document);
        assert_eq!(
            base_type(&document),
            Some("global::Microsoft.AspNetCore.Mvc.Razor.RazorPage<dynamic>")
        );
    }

    #[test]
    fn test_inherits_wins_over_model() {
        let mut document = document(&[("inherits", "MyBase"), ("model", "Order")]);
        MvcViewDocumentClassifierPass.classify(&SourceDocument::default(), &mut document);
        assert_eq!(base_type(&document), Some("MyBase"));
    }
}
