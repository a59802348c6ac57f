//! Assembly-level view and page attributes.
//!
//! Compiled views are discovered at runtime through an assembly attribute
//! naming the view's path and generated type. This pass emits that attribute
//! as a [`NodeKind::GeneratedCodeToken`] placed just before the primary
//! namespace.

use razor_ir::{IrDocument, NodeKind};
use razor_language::{
    SourceDocument,
    csharp::verbatim_literal,
    pipeline::{IrPass, PassOutcome},
};

use crate::{MVC_VIEW_DOCUMENT_KIND, PageDirective, RAZOR_PAGE_DOCUMENT_KIND};

pub const RAZOR_VIEW_ATTRIBUTE: &str =
    "global::Microsoft.AspNetCore.Mvc.Razor.Compilation.RazorViewAttribute";
pub const RAZOR_PAGE_ATTRIBUTE: &str =
    "global::Microsoft.AspNetCore.Mvc.RazorPages.Infrastructure.RazorPageAttribute";

/// Inserts the `RazorViewAttribute` or `RazorPageAttribute` declaration for
/// classified views and pages.
///
/// Nothing happens at design time, for other document kinds, or when the
/// tree has no named primary namespace and class.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssemblyAttributeInjectionPass;

impl IrPass for AssemblyAttributeInjectionPass {
    fn name(&self) -> &'static str {
        "assembly-attribute-injection"
    }

    fn execute(&self, source: &SourceDocument, document: &mut IrDocument) -> PassOutcome {
        if document.options.design_time {
            return skipped("design time");
        }
        let Some((namespace, namespace_name)) = document.primary_namespace() else {
            return skipped("no primary namespace");
        };
        if namespace_name.is_empty() {
            return skipped("primary namespace has no name");
        }
        let Some((_, class_name)) = document.primary_class() else {
            return skipped("no primary class");
        };
        if class_name.is_empty() {
            return skipped("primary class has no name");
        }

        let type_name = format!("{namespace_name}.{class_name}");
        let path = verbatim_literal(Some(&view_engine_path(source.relative_path.as_deref())));

        let text = match document.document_kind.as_deref() {
            Some(MVC_VIEW_DOCUMENT_KIND) => view_attribute(&path, &type_name),
            Some(RAZOR_PAGE_DOCUMENT_KIND) => match PageDirective::find(document) {
                Some(page) => {
                    let route = verbatim_literal(page.route_template.as_deref());
                    format!("[assembly:{RAZOR_PAGE_ATTRIBUTE}({path}, typeof({type_name}), {route})]")
                }
                None => view_attribute(&path, &type_name),
            },
            _ => return skipped("not a view or page"),
        };

        let root = document.root();
        let Some(index) = document.index_of(root, namespace) else {
            return skipped("primary namespace is not a root child");
        };
        document.insert_child(root, index, NodeKind::GeneratedCodeToken { text });
        PassOutcome::Applied
    }
}

fn skipped(reason: &str) -> PassOutcome {
    tracing::debug!(reason, "assembly attribute not injected");
    PassOutcome::Skipped
}

fn view_attribute(path: &str, type_name: &str) -> String {
    format!("[assembly:{RAZOR_VIEW_ATTRIBUTE}({path}, typeof({type_name}))]")
}

/// `Views\Home\Index.cshtml` -> `/Views/Home/Index.cshtml`.
fn view_engine_path(relative_path: Option<&str>) -> String {
    let path = relative_path.unwrap_or_default().replace('\\', "/");
    if path.is_empty() || path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    }
}
