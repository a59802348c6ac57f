//! Hooks around pipeline phases.

use eyre::Result;

use super::CompilationContext;

/// Observes or adjusts a compilation between phases.
///
/// Both hooks see the context of the template being compiled. Returning an
/// error aborts that compilation; it does not affect other templates sharing
/// the pipeline.
///
/// # Example
///
/// ```
/// use razor_language::pipeline::{CompilationContext, Plugin};
///
/// /// Fails the build once the parser has reported an error.
/// struct StrictSyntax;
///
/// impl Plugin for StrictSyntax {
///     fn name(&self) -> &'static str {
///         "strict-syntax"
///     }
///
///     fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> eyre::Result<()> {
///         if phase == "parse" && ctx.has_syntax_errors() {
///             eyre::bail!("{} has syntax errors", ctx.source.display_name());
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Runs before `phase`.
    ///
    /// # Errors
    ///
    /// An error stops the compilation before `phase` runs.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }

    /// Runs after `phase` succeeded.
    ///
    /// # Errors
    ///
    /// An error stops the compilation; later phases do not run.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }
}
