//! Report data structures for commands.
//!
//! Commands collect what happened into a report, then render it to an
//! [`Output`] target.

mod check;
mod compile;
mod output;

pub use check::CheckReport;
pub use compile::CompileReport;
pub use output::{Report, TerminalOutput};
