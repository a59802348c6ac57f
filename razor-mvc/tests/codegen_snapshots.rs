//! Snapshot tests for generated views and pages.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use razor_ir::CodeGenerationOptions;
use razor_language::{
    CodeGenerationOptionsFeature, SourceDocument,
    pipeline::{CompilationContext, Pipeline},
};

fn compile(path: &str, template: &str) -> CompilationContext {
    let pipeline = razor_mvc::register(Pipeline::builder())
        .build()
        .expect("Failed to build pipeline");
    let source = SourceDocument::new(template).with_relative_path(path);
    pipeline
        .process(source, Vec::new())
        .expect("Pipeline failed")
}

fn generated(ctx: &CompilationContext) -> &str {
    &ctx.generated.as_ref().expect("No generated code").text
}

#[test]
fn test_mvc_view() {
    let ctx = compile(
        "/Views/Orders/Index.cshtml",
        "@using System.Linq\n@model IEnumerable<Order>\n@inject IClock Clock\n<h1>@Model.Count()</h1>@{ var now = Clock.Now; }<p>@now</p>",
    );

    assert!(!ctx.has_syntax_errors());
    assert_eq!(
        ctx.generated.as_ref().and_then(|g| g.document_kind.as_deref()),
        Some(razor_mvc::MVC_VIEW_DOCUMENT_KIND)
    );
    insta::assert_snapshot!("mvc_view", generated(&ctx));
}

#[test]
fn test_razor_page() {
    let ctx = compile(
        "/Pages/Orders/Details.cshtml",
        "@page \"/orders/{id:int}\"\n@namespace Shop.Pages\n<h1>Order @Model.Id</h1>",
    );

    assert_eq!(
        ctx.generated.as_ref().and_then(|g| g.document_kind.as_deref()),
        Some(razor_mvc::RAZOR_PAGE_DOCUMENT_KIND)
    );
    insta::assert_snapshot!("razor_page", generated(&ctx));
}

#[test]
fn test_design_time_has_no_attribute() {
    let pipeline = razor_mvc::register(Pipeline::builder())
        .feature(CodeGenerationOptionsFeature::new(
            CodeGenerationOptions::design_time_default(),
        ))
        .build()
        .expect("Failed to build pipeline");
    let source = SourceDocument::new("<p>@Model</p>").with_relative_path("/Views/Home/Index.cshtml");

    let ctx = pipeline.process(source, Vec::new()).expect("Pipeline failed");
    let code = generated(&ctx);

    assert!(!code.contains("RazorViewAttribute"));
    assert!(!code.contains("WriteLiteral"));
    assert!(code.contains("Write(Model);"));
}

#[test]
fn test_imported_model_applies_to_view() {
    let pipeline = razor_mvc::register(Pipeline::builder())
        .build()
        .expect("Failed to build pipeline");
    let imports = vec![SourceDocument::new("@using App.Models\n@model Customer")
        .with_relative_path("/Views/_ViewImports.cshtml")];
    let source = SourceDocument::new("<p>@Model.Name</p>").with_relative_path("/Views/Home/Index.cshtml");

    let ctx = pipeline.process(source, imports).expect("Pipeline failed");
    let code = generated(&ctx);

    assert_eq!(ctx.import_syntax_trees.len(), 1);
    assert!(code.contains("using App.Models;"));
    assert!(code.contains(
        "public class Views_Home_Index : global::Microsoft.AspNetCore.Mvc.Razor.RazorPage<Customer>"
    ));
}
