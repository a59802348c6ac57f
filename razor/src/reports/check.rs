//! Check command report data structures.

use std::path::PathBuf;

use razor_language::{Diagnostic, Severity};

use super::output::{Output, Report};

/// Diagnostics found in one template.
#[derive(Debug)]
pub struct CheckReport {
    /// The template that was parsed.
    pub path: PathBuf,
    /// Syntax diagnostics, imports first.
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    /// Whether the template parsed without errors.
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for diagnostic in &self.diagnostics {
            match diagnostic.severity {
                Severity::Error => out.error(&diagnostic.to_string()),
                Severity::Warning => out.warning(&diagnostic.to_string()),
                Severity::Info => out.preformatted(&diagnostic.to_string()),
            }
        }

        if self.is_valid() {
            out.preformatted(&format!("✓ {} is valid", self.path.display()));
        }
    }
}
