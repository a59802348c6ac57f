use std::path::{Path, PathBuf};

use clap::Args;
use eyre::{Context, Result};
use razor_language::{
    CompilationContext, EngineConfig, SourceDocument,
    pipeline::{Pipeline, PhaseKind},
};

use super::{UnwrapOrExit, open_template};
use crate::reports::{CheckReport, Report, TerminalOutput};

#[derive(Args)]
pub struct CheckCommand {
    /// Templates to parse
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Path to razor.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let config = match &self.config {
            Some(path) => EngineConfig::open(path).unwrap_or_exit(),
            None => EngineConfig::default(),
        };
        let pipeline = razor_mvc::register(config.apply(Pipeline::builder()))
            .build()
            .unwrap_or_exit();
        let imports = config.load_imports().unwrap_or_exit();

        let mut valid = true;
        let mut out = TerminalOutput::new();
        for file in &self.files {
            let report = check(&pipeline, file, imports.clone())?;
            report.render(&mut out);
            valid &= report.is_valid();
        }

        if !valid {
            std::process::exit(1);
        }
        Ok(())
    }
}

fn check(pipeline: &Pipeline, file: &Path, imports: Vec<SourceDocument>) -> Result<CheckReport> {
    let source = open_template(file, None).unwrap_or_exit();
    let mut ctx = CompilationContext::new(source).with_imports(imports);
    pipeline
        .execute_through(&mut ctx, PhaseKind::Parsing)
        .wrap_err_with(|| format!("Failed to parse {}", file.display()))?;

    Ok(CheckReport {
        path: file.to_path_buf(),
        diagnostics: ctx.syntax_diagnostics().cloned().collect(),
    })
}
