//! Engine capabilities resolved by phases at pipeline construction.

use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    fmt,
};

use razor_ir::CodeGenerationOptions;

use crate::{Error, ParserOptions, Result};

/// Type-keyed registry of engine capabilities.
///
/// Each capability type has at most one provider; registering a second value
/// of the same type replaces the first. Phases look capabilities up once, in
/// [`Phase::initialize`](crate::pipeline::Phase::initialize), and keep what
/// they need. After the pipeline is built the registry is read-only.
#[derive(Default)]
pub struct FeatureRegistry {
    features: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    names: Vec<&'static str>,
}

impl FeatureRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability, replacing any previous provider of the same type.
    pub fn register<T: Any + Send + Sync>(&mut self, feature: T) {
        if self
            .features
            .insert(TypeId::of::<T>(), Box::new(feature))
            .is_none()
        {
            self.names.push(short_type_name::<T>());
        }
    }

    /// Look up a capability.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.features
            .get(&TypeId::of::<T>())
            .and_then(|f| f.downcast_ref::<T>())
    }

    /// Look up a capability mutably.
    pub fn get_mut<T: Any + Send + Sync>(&mut self) -> Option<&mut T> {
        self.features
            .get_mut(&TypeId::of::<T>())
            .and_then(|f| f.downcast_mut::<T>())
    }

    /// Returns true if a provider of `T` is registered.
    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.features.contains_key(&TypeId::of::<T>())
    }

    /// Look up a capability that `phase` cannot work without.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFeature`] if no provider is registered.
    pub fn require<T: Any + Send + Sync>(&self, phase: &'static str) -> Result<&T> {
        self.get::<T>()
            .ok_or_else(|| Error::missing_feature(short_type_name::<T>(), phase))
    }

    /// Names of the registered capability types, in registration order.
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }
}

impl fmt::Debug for FeatureRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureRegistry")
            .field("features", &self.names)
            .finish()
    }
}

fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Provides the engine-wide parser options.
#[derive(Debug, Clone, Default)]
pub struct ParserOptionsFeature {
    pub options: ParserOptions,
}

impl ParserOptionsFeature {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// A copy of the configured options.
    pub fn options(&self) -> ParserOptions {
        self.options.clone()
    }
}

/// Provides the engine-wide code generation options.
#[derive(Debug, Clone, Default)]
pub struct CodeGenerationOptionsFeature {
    pub options: CodeGenerationOptions,
}

impl CodeGenerationOptionsFeature {
    pub fn new(options: CodeGenerationOptions) -> Self {
        Self { options }
    }

    /// A copy of the configured options.
    pub fn options(&self) -> CodeGenerationOptions {
        self.options.clone()
    }
}
