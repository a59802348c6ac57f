mod check;
mod compile;
mod ir;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{ArgAction, Args, Parser, Subcommand};
use compile::CompileCommand;
use eyre::Result;
use ir::IrCommand;
use razor_language::{
    CodeGenerationOptionsFeature, EngineConfig, ParserOptionsFeature, SourceDocument,
    pipeline::{Pipeline, PipelineBuilder},
};

/// Extension trait for exiting on library errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for razor_language::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "razor")]
#[command(version)]
#[command(about = "Compile Razor templates into C#")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Compile(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Ir(cmd) => cmd.run(),
        }
    }

    /// Log to stderr. `RUST_LOG` applies unless a verbosity flag is given.
    pub fn setup_logging(&self) -> Result<()> {
        use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

        let filter = if self.quiet {
            EnvFilter::new("error")
        } else {
            match self.verbose {
                0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
                1 => EnvFilter::new("info"),
                2 => EnvFilter::new("debug"),
                _ => EnvFilter::new("trace"),
            }
        };

        let formatter = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(formatter)
            .with(filter)
            .try_init()?;
        Ok(())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a template to C#
    Compile(CompileCommand),

    /// Parse templates and report syntax diagnostics
    Check(CheckCommand),

    /// Print the IR tree of a template as JSON
    Ir(IrCommand),
}

/// Options shared by commands that run the pipeline.
#[derive(Args)]
pub struct EngineArgs {
    /// Path to razor.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Import fragment parsed before the template (repeatable, after configured imports)
    #[arg(short, long = "import")]
    pub imports: Vec<PathBuf>,

    /// Compile for editor tooling instead of a real build
    #[arg(long)]
    pub design_time: bool,
}

impl EngineArgs {
    /// The configuration file, or defaults when none is given.
    pub fn config(&self) -> EngineConfig {
        match &self.config {
            Some(path) => EngineConfig::open(path).unwrap_or_exit(),
            None => EngineConfig::default(),
        }
    }

    /// A pipeline builder with configuration and the MVC extension applied.
    pub fn builder(&self, config: &EngineConfig) -> PipelineBuilder {
        let builder = razor_mvc::register(config.apply(Pipeline::builder()));
        if !self.design_time {
            return builder;
        }
        builder.update_feature(|feature: &mut CodeGenerationOptionsFeature| {
            feature.options.design_time = true;
        })
    }

    /// Configured imports followed by `--import` files.
    pub fn imports(&self, config: &EngineConfig) -> razor_language::Result<Vec<SourceDocument>> {
        let mut imports = config.load_imports()?;
        for path in &self.imports {
            imports.push(SourceDocument::open(path)?.with_relative_path(view_path(path)));
        }
        Ok(imports)
    }
}

/// Read a template, recording `relative_path` or a path derived from the file name.
pub fn open_template(
    path: &Path,
    relative_path: Option<&str>,
) -> razor_language::Result<SourceDocument> {
    let relative_path = relative_path.map_or_else(|| view_path(path), str::to_string);
    Ok(SourceDocument::open(path)?.with_relative_path(relative_path))
}

/// `./Views/Home/Index.cshtml` -> `/Views/Home/Index.cshtml`.
fn view_path(path: &Path) -> String {
    let path = path.to_string_lossy().replace('\\', "/");
    let path = path.trim_start_matches("./").trim_start_matches('/');
    format!("/{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_view_path() {
        assert_eq!(view_path(Path::new("./Views/Home/Index.cshtml")), "/Views/Home/Index.cshtml");
        assert_eq!(view_path(Path::new("Index.cshtml")), "/Index.cshtml");
        assert_eq!(view_path(Path::new("/abs/Index.cshtml")), "/abs/Index.cshtml");
    }

    #[test]
    fn test_parse_compile_args() {
        let cli = Cli::try_parse_from([
            "razor",
            "-vv",
            "compile",
            "Index.cshtml",
            "--import",
            "_ViewImports.cshtml",
            "--design-time",
        ])
        .expect("arguments should parse");

        assert_eq!(cli.verbose, 2);
        let Commands::Compile(cmd) = cli.command else {
            panic!("expected compile");
        };
        assert!(cmd.engine.design_time);
        assert_eq!(cmd.engine.imports, vec![PathBuf::from("_ViewImports.cshtml")]);
    }

    #[test]
    fn test_design_time_flag_updates_features() {
        let args = EngineArgs {
            config: None,
            imports: Vec::new(),
            design_time: true,
        };
        let builder = args.builder(&EngineConfig::default());
        let features = builder.features();

        assert!(
            features
                .get::<CodeGenerationOptionsFeature>()
                .is_some_and(|f| f.options.design_time)
        );
        assert!(
            features
                .get::<ParserOptionsFeature>()
                .is_some_and(|f| f.options.is_directive("page"))
        );
    }
}
