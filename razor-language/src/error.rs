use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for razor-language operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Fatal errors raised while configuring or assembling a pipeline.
///
/// Template syntax problems are never reported through this type; they are
/// collected as [`Diagnostic`](crate::Diagnostic)s on the syntax tree.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(razor::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration")]
    #[diagnostic(code(razor::config))]
    Config {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {message}")]
    #[diagnostic(code(razor::invalid_config))]
    InvalidConfig {
        #[source_code]
        src: NamedSource<String>,
        message: String,
    },

    #[error("phase '{phase}' requires feature '{feature}', which is not registered")]
    #[diagnostic(
        code(razor::missing_feature),
        help("register the feature on the pipeline builder before calling build()")
    )]
    MissingFeature {
        feature: &'static str,
        phase: &'static str,
    },
}

impl Error {
    /// Create an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }

    /// Create a configuration parse error from a toml error.
    pub fn config(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Config {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create a configuration validation error.
    pub fn invalid_config(message: impl Into<String>, src: &str, filename: &str) -> Box<Self> {
        Box::new(Error::InvalidConfig {
            src: NamedSource::new(filename, src.to_string()),
            message: message.into(),
        })
    }

    /// Create a missing feature error.
    pub fn missing_feature(feature: &'static str, phase: &'static str) -> Box<Self> {
        Box::new(Error::MissingFeature { feature, phase })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_feature_message() {
        let err = Error::missing_feature("ParserOptionsFeature", "parse");
        assert_eq!(
            err.to_string(),
            "phase 'parse' requires feature 'ParserOptionsFeature', which is not registered"
        );
    }

    #[test]
    fn test_config_error_keeps_span() {
        let src = "[codegen\n";
        let source = toml::from_str::<toml::Table>(src).unwrap_err();
        let err = Error::config(source, src, "razor.toml");
        match *err {
            Error::Config { span, .. } => assert!(span.is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
