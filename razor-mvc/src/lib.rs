//! MVC view and Razor page support for the template compiler.
//!
//! [`register`] installs everything on a [`PipelineBuilder`]:
//!
//! - the `model`, `page` and `inject` directives
//! - [`RazorPageDocumentClassifierPass`] and [`MvcViewDocumentClassifierPass`]
//! - [`InjectDirectivePass`] and [`AssemblyAttributeInjectionPass`]
//!
//! ```
//! use razor_language::{SourceDocument, pipeline::Pipeline};
//!
//! let pipeline = razor_mvc::register(Pipeline::builder()).build()?;
//! let source = SourceDocument::new("@page\n<h1>Hi</h1>").with_relative_path("/Pages/Index.cshtml");
//! let ctx = pipeline.process(source, Vec::new()).expect("pipeline should succeed");
//!
//! let ir = ctx.ir.as_ref().expect("lowered");
//! assert_eq!(ir.document_kind.as_deref(), Some(razor_mvc::RAZOR_PAGE_DOCUMENT_KIND));
//! # Ok::<(), Box<razor_language::Error>>(())
//! ```

mod assembly_attribute;
mod classifiers;
mod inject;
mod page_directive;

pub use assembly_attribute::{
    AssemblyAttributeInjectionPass, RAZOR_PAGE_ATTRIBUTE, RAZOR_VIEW_ATTRIBUTE,
};
pub use classifiers::{MvcViewDocumentClassifierPass, RazorPageDocumentClassifierPass};
pub use inject::{InjectDirectivePass, RAZOR_INJECT_ATTRIBUTE};
pub use page_directive::PageDirective;

use razor_language::{ParserOptionsFeature, pipeline::PipelineBuilder};

/// Document kind of an MVC view.
pub const MVC_VIEW_DOCUMENT_KIND: &str = "mvc.1.0.view";
/// Document kind of a Razor page.
pub const RAZOR_PAGE_DOCUMENT_KIND: &str = "mvc.1.0.razor-page";

/// Directives added to the parser.
pub const DIRECTIVES: &[&str] = &["model", PageDirective::DIRECTIVE, InjectDirectivePass::DIRECTIVE];

/// Install the MVC directives, classifiers and passes.
pub fn register(builder: PipelineBuilder) -> PipelineBuilder {
    builder
        .update_feature(|feature: &mut ParserOptionsFeature| {
            feature.options.directives.extend(DIRECTIVES.iter().map(|d| d.to_string()));
        })
        .classifier(RazorPageDocumentClassifierPass)
        .classifier(MvcViewDocumentClassifierPass)
        .pass(InjectDirectivePass)
        .pass(AssemblyAttributeInjectionPass)
}
