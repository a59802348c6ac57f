//! Document classification phase and the fallback classifier.

use eyre::Result;
use razor_ir::{Annotation, IrBuilder, IrDocument, NodeKind};

use crate::{
    FeatureRegistry, SourceDocument,
    csharp::class_name_from_path,
    pipeline::{
        CompilationContext, DocumentClassifierPass, DocumentClassifiers, DocumentStructure, Phase,
        PhaseKind,
    },
};

/// Phase that offers the IR tree to each registered classifier.
#[derive(Debug, Default)]
pub struct DocumentClassificationPhase {
    classifiers: DocumentClassifiers,
}

impl DocumentClassificationPhase {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Phase for DocumentClassificationPhase {
    fn name(&self) -> &'static str {
        "classify"
    }

    fn description(&self) -> &'static str {
        "Assign a document kind and shape the IR tree into a class"
    }

    fn kind(&self) -> PhaseKind {
        PhaseKind::DocumentClassification
    }

    fn initialize(&mut self, features: &FeatureRegistry) -> crate::Result<()> {
        self.classifiers = features
            .require::<DocumentClassifiers>(self.name())?
            .clone();
        Ok(())
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let Some(document) = ctx.ir.as_mut() else {
            tracing::debug!("no IR tree, skipping classification");
            return Ok(());
        };

        for classifier in self.classifiers.iter() {
            if classifier.classify(&ctx.source, document).is_applied() {
                tracing::debug!(
                    classifier = classifier.name(),
                    kind = classifier.document_kind(),
                    "classified document"
                );
                break;
            }
        }
        Ok(())
    }
}

/// Claims any document, with kind `"default"`. Runs after every other classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDocumentClassifierPass;

impl DefaultDocumentClassifierPass {
    pub const DOCUMENT_KIND: &'static str = "default";
}

impl DocumentClassifierPass for DefaultDocumentClassifierPass {
    fn name(&self) -> &'static str {
        "default-classifier"
    }

    fn document_kind(&self) -> &'static str {
        Self::DOCUMENT_KIND
    }

    fn order(&self) -> i32 {
        i32::MAX
    }

    fn is_match(&self, _: &SourceDocument, _: &IrDocument) -> bool {
        true
    }
}

impl DocumentStructure {
    /// The structure every classifier starts from.
    ///
    /// The namespace is the last `@namespace` value, else the configured root
    /// namespace. The base type is the last `@inherits` value, if any.
    pub fn for_document(source: &SourceDocument, document: &IrDocument) -> Self {
        let namespace = last_directive_value(document, "namespace")
            .unwrap_or_else(|| document.options.root_namespace.clone());

        Self {
            namespace,
            class_name: class_name_from_path(source.relative_path.as_deref()),
            base_type: last_directive_value(document, "inherits"),
            class_modifiers: vec!["public".into()],
            method_name: "ExecuteAsync".into(),
            return_type: "global::System.Threading.Tasks.Task".into(),
            method_modifiers: vec!["public".into(), "async".into(), "override".into()],
        }
    }

    /// Move the root's children into a primary namespace, class and method.
    ///
    /// Directives stay at the root in their original order. `using` nodes go
    /// to the top of the namespace; all other content goes into the method.
    pub fn apply(self, document: &mut IrDocument) {
        let root = document.root();
        let mut directives = Vec::new();
        let mut usings = Vec::new();
        let mut body = Vec::new();

        for child in document.take_children(root) {
            match document.kind(child) {
                NodeKind::Directive { .. } => directives.push(child),
                NodeKind::Using { .. } => usings.push(child),
                _ => body.push(child),
            }
        }
        for directive in directives {
            document.adopt(root, directive);
        }

        let mut builder = IrBuilder::new(document);
        let namespace = builder.descend(NodeKind::NamespaceDeclaration {
            content: self.namespace,
        });
        for using in usings {
            builder.adopt(using);
        }
        let class = builder.descend(NodeKind::ClassDeclaration {
            class_name: self.class_name,
            base_type: self.base_type,
            modifiers: self.class_modifiers,
        });
        let method = builder.descend(NodeKind::MethodDeclaration {
            method_name: self.method_name,
            return_type: self.return_type,
            modifiers: self.method_modifiers,
        });
        for node in body {
            builder.adopt(node);
        }

        document.annotate(namespace, Annotation::PrimaryNamespace);
        document.annotate(class, Annotation::PrimaryClass);
        document.annotate(method, Annotation::PrimaryMethod);
    }
}

/// Tokens of the last directive named `name`, joined with spaces.
pub fn last_directive_value(document: &IrDocument, name: &str) -> Option<String> {
    document
        .directives(name)
        .last()
        .and_then(|id| match document.kind(id) {
            NodeKind::Directive { tokens, .. } if !tokens.is_empty() => Some(tokens.join(" ")),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use razor_ir::CodeGenerationOptions;

    use super::*;
    use crate::pipeline::PassOutcome;

    fn flat_document() -> IrDocument {
        let mut document = IrDocument::new(CodeGenerationOptions::default());
        let root = document.root();
        document.add_child(
            root,
            NodeKind::Using {
                content: "System".into(),
            },
        );
        document.add_child(
            root,
            NodeKind::HtmlContent {
                content: "<p>".into(),
            },
        );
        document.add_child(
            root,
            NodeKind::Directive {
                name: "namespace".into(),
                tokens: vec!["Company.Web".into()],
            },
        );
        document.add_child(
            root,
            NodeKind::CSharpExpression {
                content: "x".into(),
            },
        );
        document
    }

    struct NeverMatches;

    impl DocumentClassifierPass for NeverMatches {
        fn name(&self) -> &'static str {
            "never"
        }

        fn document_kind(&self) -> &'static str {
            "never"
        }

        fn is_match(&self, _: &SourceDocument, _: &IrDocument) -> bool {
            false
        }
    }

    #[test]
    fn test_default_classifier_shapes_tree() {
        let source = SourceDocument::new("").with_relative_path("/Views/Home/Index.cshtml");
        let mut document = flat_document();

        let outcome = DefaultDocumentClassifierPass.classify(&source, &mut document);

        assert_eq!(outcome, PassOutcome::Applied);
        assert_eq!(document.document_kind.as_deref(), Some("default"));

        let root_children = document.children(document.root()).to_vec();
        assert_eq!(root_children.len(), 2);
        assert!(document.kind(root_children[0]).is_directive("namespace"));

        let (namespace, content) = document.primary_namespace().expect("namespace");
        assert_eq!(namespace, root_children[1]);
        assert_eq!(content, "Company.Web");

        let (class, class_name) = document.primary_class().expect("class");
        assert_eq!(class_name, "Views_Home_Index");
        assert_eq!(document.parent(class), Some(namespace));
        assert!(matches!(
            document.kind(document.children(namespace)[0]),
            NodeKind::Using { .. }
        ));

        let method = document.primary_method().expect("method");
        assert_eq!(document.parent(method), Some(class));
        let body: Vec<_> = document
            .children(method)
            .iter()
            .map(|&id| document.kind(id).name())
            .collect();
        assert_eq!(body, vec!["html", "expression"]);
    }

    #[test]
    fn test_root_namespace_fallback() {
        let mut document = IrDocument::new(CodeGenerationOptions {
            root_namespace: "Fallback".into(),
            ..CodeGenerationOptions::default()
        });

        DefaultDocumentClassifierPass.classify(&SourceDocument::default(), &mut document);

        assert_eq!(document.primary_namespace().map(|(_, c)| c), Some("Fallback"));
        assert_eq!(
            document.primary_class().map(|(_, c)| c),
            Some("GeneratedDocument")
        );
    }

    #[test]
    fn test_classified_document_is_not_reclassified() {
        let mut document = flat_document();
        document.document_kind = Some("custom".into());
        let before = document.children(document.root()).to_vec();

        let outcome = DefaultDocumentClassifierPass.classify(&SourceDocument::default(), &mut document);

        assert_eq!(outcome, PassOutcome::Skipped);
        assert_eq!(document.children(document.root()), before.as_slice());
    }

    #[test]
    fn test_phase_uses_first_matching_classifier() {
        let mut registry = FeatureRegistry::new();
        registry.register(DocumentClassifiers(Arc::from(vec![
            Box::new(NeverMatches) as Box<dyn DocumentClassifierPass>,
            Box::new(DefaultDocumentClassifierPass),
        ])));
        let mut phase = DocumentClassificationPhase::new();
        phase.initialize(&registry).expect("classifiers registered");

        let mut ctx = CompilationContext::new(SourceDocument::default());
        ctx.ir = Some(flat_document());
        phase.run(&mut ctx).expect("classify should succeed");

        assert_eq!(
            ctx.ir.as_ref().and_then(|ir| ir.document_kind.as_deref()),
            Some("default")
        );
    }

    #[test]
    fn test_last_directive_value() {
        let mut document = IrDocument::default();
        let root = document.root();
        for value in ["First", "Second"] {
            document.add_child(
                root,
                NodeKind::Directive {
                    name: "inherits".into(),
                    tokens: vec![value.into()],
                },
            );
        }
        assert_eq!(
            last_directive_value(&document, "inherits").as_deref(),
            Some("Second")
        );
        assert_eq!(last_directive_value(&document, "model"), None);
    }
}
