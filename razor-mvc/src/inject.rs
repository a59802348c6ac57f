//! `@inject <Type> <Name>` support.

use razor_ir::{IrDocument, NodeKind};
use razor_language::{
    SourceDocument,
    pipeline::{IrPass, PassOutcome},
};

pub const RAZOR_INJECT_ATTRIBUTE: &str =
    "global::Microsoft.AspNetCore.Mvc.Razor.Internal.RazorInjectAttribute";

/// Turns each `@inject` directive into an injected property on the primary
/// class, declared ahead of the primary method.
#[derive(Debug, Clone, Copy, Default)]
pub struct InjectDirectivePass;

impl InjectDirectivePass {
    pub const DIRECTIVE: &'static str = "inject";
}

impl IrPass for InjectDirectivePass {
    fn name(&self) -> &'static str {
        "inject-directive"
    }

    fn execute(&self, _: &SourceDocument, document: &mut IrDocument) -> PassOutcome {
        let (Some((class, _)), Some(method)) = (document.primary_class(), document.primary_method())
        else {
            return PassOutcome::Skipped;
        };
        let Some(mut index) = document.index_of(class, method) else {
            return PassOutcome::Skipped;
        };

        let properties: Vec<(String, String)> = document
            .directives(Self::DIRECTIVE)
            .filter_map(|id| match document.kind(id) {
                NodeKind::Directive { tokens, .. } if tokens.len() >= 2 => {
                    Some((tokens[0].clone(), tokens[1].clone()))
                }
                _ => None,
            })
            .collect();
        if properties.is_empty() {
            return PassOutcome::Skipped;
        }

        for (type_name, member) in properties {
            tracing::trace!(%type_name, %member, "injecting property");
            for text in [
                format!("[{RAZOR_INJECT_ATTRIBUTE}]"),
                format!("public {type_name} {member} {{ get; private set; }}"),
            ] {
                document.insert_child(class, index, NodeKind::GeneratedCodeToken { text });
                index += 1;
            }
        }
        PassOutcome::Applied
    }
}
