use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use razor_language::{CompilationContext, pipeline::PhaseKind};

use super::{EngineArgs, UnwrapOrExit, open_template};

#[derive(Args)]
pub struct IrCommand {
    /// Template to lower
    pub file: PathBuf,

    /// Path recorded for the template (defaults to the file path)
    #[arg(long)]
    pub relative_path: Option<String>,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Also run the IR passes
    #[arg(long)]
    pub optimize: bool,
}

impl IrCommand {
    /// Run the ir command
    pub fn run(&self) -> Result<()> {
        let config = self.engine.config();
        let pipeline = self.engine.builder(&config).build().unwrap_or_exit();

        let source = open_template(&self.file, self.relative_path.as_deref()).unwrap_or_exit();
        let imports = self.engine.imports(&config).unwrap_or_exit();
        tracing::debug!(file = %self.file.display(), imports = imports.len(), "lowering");
        let mut ctx = CompilationContext::new(source).with_imports(imports);

        let last = if self.optimize {
            PhaseKind::Optimization
        } else {
            PhaseKind::DocumentClassification
        };
        pipeline
            .execute_through(&mut ctx, last)
            .wrap_err_with(|| format!("Failed to lower {}", self.file.display()))?;

        for diagnostic in ctx.syntax_diagnostics() {
            eprintln!("{}", diagnostic);
        }
        let ir = ctx
            .ir
            .as_ref()
            .ok_or_else(|| eyre::eyre!("No IR tree was produced for {}", self.file.display()))?;
        println!("{}", serde_json::to_string_pretty(ir)?);

        Ok(())
    }
}
