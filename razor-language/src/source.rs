//! Template source documents.

use std::path::Path;

use serde::Serialize;

use crate::{Error, Result};

/// A template and the paths it was loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceDocument {
    /// The template text.
    pub text: String,
    /// Path on disk, if the document came from a file.
    pub file_path: Option<String>,
    /// Path relative to the project root (e.g. `/Views/Home/Index.cshtml`).
    pub relative_path: Option<String>,
}

impl SourceDocument {
    /// Create a document from text with no recorded paths.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            file_path: None,
            relative_path: None,
        }
    }

    /// Read a document from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Self {
            text,
            file_path: Some(path.display().to_string()),
            relative_path: None,
        })
    }

    /// Set the project-relative path.
    pub fn with_relative_path(mut self, relative_path: impl Into<String>) -> Self {
        self.relative_path = Some(relative_path.into());
        self
    }

    /// Set the on-disk path.
    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    /// Name used in diagnostics: the relative path, then the file path.
    pub fn display_name(&self) -> &str {
        self.relative_path
            .as_deref()
            .or(self.file_path.as_deref())
            .unwrap_or("<template>")
    }

    /// One-based line and column of a byte offset.
    pub fn line_column(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.text.len());
        let before = &self.text[..floor_char_boundary(&self.text, offset)];
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(newline) => before[newline + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };
        (line, column)
    }
}

fn floor_char_boundary(text: &str, mut offset: usize) -> usize {
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_display_name_prefers_relative_path() {
        let doc = SourceDocument::new("")
            .with_file_path("/srv/app/Views/Index.cshtml")
            .with_relative_path("/Views/Index.cshtml");
        assert_eq!(doc.display_name(), "/Views/Index.cshtml");
        assert_eq!(SourceDocument::new("").display_name(), "<template>");
    }

    #[test]
    fn test_line_column() {
        let doc = SourceDocument::new("ab\ncd\n@x");
        assert_eq!(doc.line_column(0), (1, 1));
        assert_eq!(doc.line_column(4), (2, 2));
        assert_eq!(doc.line_column(6), (3, 1));
    }

    #[test]
    fn test_open_reads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "<p>@Model.Name</p>").expect("write");

        let doc = SourceDocument::open(file.path()).expect("open");
        assert_eq!(doc.text, "<p>@Model.Name</p>");
        assert!(doc.file_path.is_some());
        assert!(doc.relative_path.is_none());
    }

    #[test]
    fn test_open_missing_file() {
        let err = SourceDocument::open("/definitely/not/here.cshtml").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
