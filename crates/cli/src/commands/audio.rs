//! Audio preview generation

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use audio_clip::{preview_targets, truncate_wav, ClipError, TruncationReport};
use serde::Serialize;
use tracing::warn;

use crate::context::AppContext;
use crate::report::{table, Report};

#[derive(Debug, Serialize)]
pub struct PreviewEntry {
    pub name: &'static str,
    pub input: PathBuf,
    pub output: PathBuf,
    /// `None` when the input was missing
    pub result: Option<TruncationReport>,
}

#[derive(Debug, Serialize)]
pub struct PreviewReport {
    pub max_seconds: f64,
    pub entries: Vec<PreviewEntry>,
}

/// Truncate a single file
pub fn truncate(input: &Path, output: &Path, max_seconds: f64) -> Result<PreviewReport> {
    let result = truncate_wav(input, output, max_seconds)
        .with_context(|| format!("failed to truncate {}", input.display()))?;
    Ok(PreviewReport {
        max_seconds,
        entries: vec![PreviewEntry {
            name: "clip",
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            result: Some(result),
        }],
    })
}

/// Cut the study and phone songs in the outputs directory down to previews.
///
/// A missing song is reported and skipped.
pub fn previews(ctx: &AppContext) -> Result<PreviewReport> {
    let max_seconds = ctx.settings.audio.preview_seconds;
    let mut entries = Vec::new();

    for target in preview_targets(&ctx.settings.paths.outputs_dir) {
        let result = match truncate_wav(&target.input, &target.output, max_seconds) {
            Ok(report) => Some(report),
            Err(ClipError::NotFound(path)) => {
                warn!("File not found: {}", path.display());
                None
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to truncate {}", target.input.display()));
            }
        };
        entries.push(PreviewEntry {
            name: target.name,
            input: target.input,
            output: target.output,
            result,
        });
    }

    Ok(PreviewReport { max_seconds, entries })
}

impl Report for PreviewReport {
    fn render(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .entries
            .iter()
            .map(|e| {
                let (original, written, status) = match &e.result {
                    Some(r) => (
                        format!("{:.2}s", r.original_secs),
                        format!("{:.2}s", r.written_secs),
                        if r.truncated { "truncated" } else { "copied" },
                    ),
                    None => ("-".into(), "-".into(), "missing"),
                };
                vec![
                    e.name.to_string(),
                    original,
                    written,
                    status.to_string(),
                    e.output.display().to_string(),
                ]
            })
            .collect();
        format!(
            "Preview limit {}s\n\n{}",
            self.max_seconds,
            table(&["clip", "original", "written", "status", "output"], &rows)
        )
    }
}
