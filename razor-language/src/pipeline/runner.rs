//! Pipeline construction and execution.

use std::{any::Any, sync::Arc};

use eyre::Result;

use super::{
    CompilationContext, DocumentClassifierPass, DocumentClassifiers, IrPass, IrPasses, Phase,
    PhaseInfo, PhaseKind, Plugin,
    phases::{
        CodeGenerationPhase, DefaultDocumentClassifierPass, DocumentClassificationPhase,
        LoweringPhase, OptimizationPhase, ParsingPhase,
    },
};
use crate::{
    CodeGenerationOptionsFeature, FeatureRegistry, ParserOptionsFeature, SourceDocument,
};

/// Collects capabilities, phases, passes and plugins, then builds a [`Pipeline`].
///
/// # Example
///
/// ```
/// use razor_language::{SourceDocument, pipeline::PipelineBuilder};
///
/// let pipeline = PipelineBuilder::new().with_default_phases().build()?;
/// let ctx = pipeline
///     .process(SourceDocument::new("<p>@Model.Name</p>"), Vec::new())
///     .expect("pipeline should succeed");
///
/// assert!(ctx.generated.is_some());
/// # Ok::<(), Box<razor_language::Error>>(())
/// ```
#[derive(Default)]
pub struct PipelineBuilder {
    features: FeatureRegistry,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
    classifiers: Vec<Box<dyn DocumentClassifierPass>>,
    passes: Vec<Box<dyn IrPass>>,
}

impl PipelineBuilder {
    /// Create an empty builder: no capabilities, phases or passes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability, replacing any previous provider of its type.
    pub fn feature<T: Any + Send + Sync>(mut self, feature: T) -> Self {
        self.features.register(feature);
        self
    }

    /// Modify a registered capability, registering its default first if absent.
    pub fn update_feature<T, F>(mut self, update: F) -> Self
    where
        T: Any + Send + Sync + Default,
        F: FnOnce(&mut T),
    {
        if !self.features.contains::<T>() {
            self.features.register(T::default());
        }
        if let Some(feature) = self.features.get_mut::<T>() {
            update(feature);
        }
        self
    }

    /// Append a phase.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Add a document classifier.
    pub fn classifier(mut self, classifier: impl DocumentClassifierPass + 'static) -> Self {
        self.classifiers.push(Box::new(classifier));
        self
    }

    /// Add an IR pass.
    pub fn pass(mut self, pass: impl IrPass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// Install the built-in phases, the fallback classifier and default
    /// parser and code generation options where none are registered yet.
    pub fn with_default_phases(self) -> Self {
        let mut builder = self
            .phase(ParsingPhase::new())
            .phase(LoweringPhase::new())
            .phase(DocumentClassificationPhase::new())
            .phase(OptimizationPhase::new())
            .phase(CodeGenerationPhase)
            .classifier(DefaultDocumentClassifierPass);
        if !builder.features.contains::<ParserOptionsFeature>() {
            builder = builder.feature(ParserOptionsFeature::default());
        }
        if !builder.features.contains::<CodeGenerationOptionsFeature>() {
            builder = builder.feature(CodeGenerationOptionsFeature::default());
        }
        builder
    }

    /// The capabilities registered so far.
    pub fn features(&self) -> &FeatureRegistry {
        &self.features
    }

    /// Initialise every pass and phase and produce the pipeline.
    ///
    /// # Errors
    ///
    /// Returns the first initialisation failure, typically
    /// [`Error::MissingFeature`](crate::Error::MissingFeature). No document
    /// can be processed by a pipeline that failed to build.
    pub fn build(self) -> crate::Result<Pipeline> {
        let Self {
            mut features,
            mut phases,
            plugins,
            mut classifiers,
            mut passes,
        } = self;

        for classifier in &mut classifiers {
            classifier.initialize(&features)?;
        }
        for pass in &mut passes {
            pass.initialize(&features)?;
        }
        // stable: equal orders keep registration order
        classifiers.sort_by_key(|c| c.order());
        passes.sort_by_key(|p| p.order());

        features.register(DocumentClassifiers(Arc::from(classifiers)));
        features.register(IrPasses(Arc::from(passes)));

        for phase in &mut phases {
            phase.initialize(&features)?;
        }

        tracing::debug!(
            phases = phases.len(),
            plugins = plugins.len(),
            features = ?features.names(),
            "pipeline built"
        );

        Ok(Pipeline {
            features,
            phases,
            plugins,
        })
    }
}

/// The compilation pipeline orchestrator.
///
/// The pipeline runs its phases in order on a [`CompilationContext`],
/// calling plugin hooks before and after each phase. It holds no per-document
/// state, so one pipeline can compile any number of documents, including
/// from several threads at once.
pub struct Pipeline {
    features: FeatureRegistry,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// A builder with the built-in phases installed.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new().with_default_phases()
    }

    /// Run every phase on `ctx`.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase or plugin fails fatally.
    pub fn execute(&self, ctx: &mut CompilationContext) -> Result<()> {
        for phase in &self.phases {
            self.run_phase(phase.as_ref(), ctx)?;
        }
        tracing::info!(source = ctx.source.display_name(), "compiled template");
        Ok(())
    }

    /// Run phases up to and including the first phase of `kind`.
    ///
    /// Runs every phase when none has that kind.
    pub fn execute_through(&self, ctx: &mut CompilationContext, kind: PhaseKind) -> Result<()> {
        for phase in &self.phases {
            self.run_phase(phase.as_ref(), ctx)?;
            if phase.kind() == kind {
                tracing::debug!(%kind, "stopping pipeline early");
                break;
            }
        }
        Ok(())
    }

    /// Compile a template with its imports.
    pub fn process(
        &self,
        source: SourceDocument,
        imports: Vec<SourceDocument>,
    ) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(source).with_imports(imports);
        self.execute(&mut ctx)?;
        Ok(ctx)
    }

    /// The phases in execution order.
    pub fn phases(&self) -> Vec<PhaseInfo> {
        self.phases.iter().map(|phase| phase.info()).collect()
    }

    /// The capabilities the pipeline was built with.
    pub fn features(&self) -> &FeatureRegistry {
        &self.features
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();
        let _span = tracing::debug_span!("phase", name = phase_name).entered();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}
