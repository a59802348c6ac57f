//! Parser configuration.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Options that control how templates are parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserOptions {
    /// Directive names recognised after `@`.
    pub directives: BTreeSet<String>,
}

impl ParserOptions {
    /// Directives every engine understands.
    pub const CORE_DIRECTIVES: &'static [&'static str] = &["inherits", "namespace", "using"];

    /// Add directive names to the recognised set.
    pub fn with_directives<I, S>(mut self, directives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directives
            .extend(directives.into_iter().map(Into::into));
        self
    }

    /// Returns true if `name` is parsed as a directive.
    pub fn is_directive(&self, name: &str) -> bool {
        self.directives.contains(name)
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            directives: Self::CORE_DIRECTIVES
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        let options = ParserOptions::default();
        assert!(options.is_directive("using"));
        assert!(options.is_directive("namespace"));
        assert!(!options.is_directive("page"));
    }

    #[test]
    fn test_with_directives() {
        let options = ParserOptions::default().with_directives(["page", "model"]);
        assert!(options.is_directive("page"));
        assert!(options.is_directive("model"));
        assert!(options.is_directive("using"));
    }
}
