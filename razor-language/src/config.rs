//! `razor.toml` engine configuration.

use std::path::{Path, PathBuf};

use razor_ir::CodeGenerationOptions;
use serde::Deserialize;

use crate::{
    CodeGenerationOptionsFeature, Error, ParserOptionsFeature, Result,
    SourceDocument, csharp::is_qualified_name, pipeline::PipelineBuilder,
};

/// Engine configuration loaded from `razor.toml`.
///
/// ```toml
/// imports = ["Views/_ViewImports.cshtml"]
///
/// [codegen]
/// root_namespace = "Company.Web"
/// indent_size = 2
///
/// [parser]
/// directives = ["section"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Import fragments, relative to the configuration file.
    #[serde(default)]
    pub imports: Vec<PathBuf>,
    #[serde(default)]
    pub codegen: CodegenConfig,
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

/// The `[codegen]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodegenConfig {
    pub root_namespace: Option<String>,
    pub design_time: Option<bool>,
    pub indent_size: Option<u8>,
    pub indent_with_tabs: Option<bool>,
}

/// The `[parser]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParserConfig {
    /// Directive names recognised in addition to the built-in ones.
    #[serde(default)]
    pub directives: Vec<String>,
}

impl EngineConfig {
    /// Open and parse a configuration file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let filename = path.display().to_string();
        let mut config = Self::from_str_with_filename(&content, &filename)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Parse configuration text, naming it `filename` in errors.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::config(e, content, filename))?;
        config.validate(content, filename)?;
        Ok(config)
    }

    fn validate(&self, content: &str, filename: &str) -> Result<()> {
        if let Some(namespace) = &self.codegen.root_namespace
            && !is_qualified_name(namespace)
        {
            return Err(Error::invalid_config(
                format!("root_namespace '{namespace}' is not a valid namespace name"),
                content,
                filename,
            ));
        }

        if self.codegen.indent_size == Some(0) {
            return Err(Error::invalid_config(
                "indent_size must be at least 1",
                content,
                filename,
            ));
        }

        for directive in &self.parser.directives {
            let valid = directive
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && directive
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !valid {
                return Err(Error::invalid_config(
                    format!("'{directive}' is not a valid directive name"),
                    content,
                    filename,
                ));
            }
        }

        Ok(())
    }

    /// Code generation options with configured values applied to the defaults.
    pub fn codegen_options(&self) -> CodeGenerationOptions {
        let defaults = CodeGenerationOptions::default();
        CodeGenerationOptions {
            design_time: self.codegen.design_time.unwrap_or(defaults.design_time),
            root_namespace: self
                .codegen
                .root_namespace
                .clone()
                .unwrap_or(defaults.root_namespace),
            indent_size: self.codegen.indent_size.unwrap_or(defaults.indent_size),
            indent_with_tabs: self
                .codegen
                .indent_with_tabs
                .unwrap_or(defaults.indent_with_tabs),
        }
    }

    /// Import paths resolved against the configuration file's directory.
    pub fn import_paths(&self) -> Vec<PathBuf> {
        self.imports
            .iter()
            .map(|import| match &self.base_dir {
                Some(base) if import.is_relative() => base.join(import),
                _ => import.clone(),
            })
            .collect()
    }

    /// Read every configured import, in order.
    pub fn load_imports(&self) -> Result<Vec<SourceDocument>> {
        self.imports
            .iter()
            .zip(self.import_paths())
            .map(|(relative, path)| {
                let relative = format!("/{}", relative.display().to_string().replace('\\', "/"));
                SourceDocument::open(&path).map(|doc| doc.with_relative_path(relative))
            })
            .collect()
    }

    /// Apply this configuration to the engine's capabilities.
    ///
    /// Configured directives are added to whatever the builder already
    /// recognises; code generation options, design time included, replace
    /// the current ones. Design time does not change parsing.
    pub fn apply(&self, builder: PipelineBuilder) -> PipelineBuilder {
        let directives = self.parser.directives.clone();
        builder
            .update_feature(|feature: &mut ParserOptionsFeature| {
                let options = std::mem::take(&mut feature.options);
                feature.options = options.with_directives(directives);
            })
            .feature(CodeGenerationOptionsFeature::new(self.codegen_options()))
    }
}
