//! Pipeline snapshot plugin for visualization and debugging.
//!
//! This module provides a plugin that captures the compilation state after
//! each phase, so the IR can be inspected as it is built up.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use eyre::Result;
use razor_ir::IrDocument;
use serde::Serialize;

use super::{CompilationContext, Plugin};
use crate::Diagnostic;

/// A snapshot of the compilation state after a phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    /// The phase that just completed.
    pub phase: String,

    /// The document kind (available after classification).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_kind: Option<String>,

    /// The IR tree (available after lowering).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ir: Option<IrDocument>,

    /// Diagnostics on the syntax trees.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub syntax_diagnostics: Vec<Diagnostic>,

    /// Diagnostics raised by phases so far.
    pub diagnostics: Vec<Diagnostic>,
}

/// A plugin that captures compilation state after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::builder()
///     .plugin(SnapshotPlugin::with_output_dir(".razor/debug"))
///     .build()?;
/// pipeline.process(source, imports)?;
/// ```
pub struct SnapshotPlugin {
    /// Collected snapshots.
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    /// Output directory for snapshots.
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    /// Create a new snapshot plugin.
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a new snapshot plugin that writes to a directory.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// Get all collected snapshots.
    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Write all snapshots to `dir`, one `<phase>.json` file each.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        for snapshot in self
            .snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
        {
            write_snapshot(dir, snapshot)?;
        }

        Ok(())
    }

    fn capture_snapshot(&self, phase: &str, ctx: &CompilationContext) -> PhaseSnapshot {
        let snapshot = PhaseSnapshot {
            phase: phase.to_string(),
            document_kind: ctx.ir.as_ref().and_then(|ir| ir.document_kind.clone()),
            ir: ctx.ir.clone(),
            syntax_diagnostics: ctx.syntax_diagnostics().cloned().collect(),
            diagnostics: ctx.diagnostics.clone(),
        };
        self.snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(snapshot.clone());
        snapshot
    }
}

fn write_snapshot(dir: &Path, snapshot: &PhaseSnapshot) -> Result<()> {
    let path = dir.join(format!("{}.json", snapshot.phase));
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&path, json)?;
    tracing::debug!(path = %path.display(), "wrote snapshot");
    Ok(())
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        let snapshot = self.capture_snapshot(phase, ctx);

        // If output directory is configured, write immediately
        if let Some(ref dir) = self.output_dir {
            fs::create_dir_all(dir)?;
            write_snapshot(dir, &snapshot)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourceDocument;

    #[test]
    fn test_snapshot_plugin_creation() {
        let plugin = SnapshotPlugin::new();
        assert!(plugin.snapshots().is_empty());
    }

    #[test]
    fn test_captures_context() {
        let plugin = SnapshotPlugin::new();
        let mut ctx = CompilationContext::new(SourceDocument::new("<p></p>"));
        ctx.add_warning("lower", "something odd");

        plugin
            .on_after_phase("lower", &mut ctx)
            .expect("capture should succeed");

        let snapshots = plugin.snapshots();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].phase, "lower");
        assert!(snapshots[0].ir.is_none());
        assert_eq!(snapshots[0].diagnostics.len(), 1);
    }

    #[test]
    fn test_writes_to_output_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let plugin = SnapshotPlugin::with_output_dir(dir.path().join("debug"));
        let mut ctx = CompilationContext::new(SourceDocument::default());
        ctx.ir = Some(IrDocument::default());

        plugin
            .on_after_phase("lower", &mut ctx)
            .expect("write should succeed");

        let json = fs::read_to_string(dir.path().join("debug/lower.json")).expect("snapshot file");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["phase"], "lower");
        assert_eq!(value["ir"]["tree"]["kind"], "document");
    }
}
