use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use razor_language::pipeline::SnapshotPlugin;

use super::{EngineArgs, UnwrapOrExit, open_template};
use crate::reports::{CompileReport, Report, TerminalOutput};

#[derive(Args)]
pub struct CompileCommand {
    /// Template to compile
    pub file: PathBuf,

    /// Path recorded for the template (defaults to the file path)
    #[arg(long)]
    pub relative_path: Option<String>,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Write the generated C# to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a JSON snapshot of each phase into this directory
    #[arg(long)]
    pub snapshots: Option<PathBuf>,
}

impl CompileCommand {
    /// Run the compile command
    pub fn run(&self) -> Result<()> {
        let config = self.engine.config();
        let mut builder = self.engine.builder(&config);
        if let Some(dir) = &self.snapshots {
            builder = builder.plugin(SnapshotPlugin::with_output_dir(dir));
        }
        let pipeline = builder.build().unwrap_or_exit();

        let source = open_template(&self.file, self.relative_path.as_deref()).unwrap_or_exit();
        let imports = self.engine.imports(&config).unwrap_or_exit();

        tracing::debug!(file = %self.file.display(), imports = imports.len(), "compiling");
        let mut ctx = pipeline
            .process(source, imports)
            .wrap_err_with(|| format!("Failed to compile {}", self.file.display()))?;

        let mut report = CompileReport::from_context(&ctx);
        if report.has_errors() {
            report.render(&mut TerminalOutput::new());
            std::process::exit(1);
        }

        let code = ctx
            .take_generated()
            .ok_or_else(|| eyre::eyre!("No code was generated for {}", self.file.display()))?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &code.text)
                    .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
                report.output = Some(path.clone());
                report.snapshots = self.snapshots.clone();
            }
            None => print!("{}", code.text),
        }
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
