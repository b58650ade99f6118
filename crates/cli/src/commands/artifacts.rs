//! Rendered chart and audio inventory
//!
//! Charts and songs are produced offline; the report shows each one as present
//! or as a placeholder.

use std::fs;
use std::path::Path;

use anyhow::Result;
use eeg_dataset::FEATURE_COLUMNS;
use feature_engine::EegBand;
use serde::Serialize;
use tracing::debug;

use crate::context::AppContext;
use crate::report::{table, Report};

const SUMMARY_ROC: &str = "roc_curve.png";

const LEARNING_CURVE_MODELS: [&str; 5] = [
    "Logistic_Regression",
    "Random_Forest",
    "CNN_1D",
    "Gradient_Boosting",
    "MLP_Neural_Network",
];

/// Expected file in the outputs directory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artifact {
    pub section: &'static str,
    pub file: String,
}

impl Artifact {
    fn new(section: &'static str, file: impl Into<String>) -> Self {
        Self {
            section,
            file: file.into(),
        }
    }
}

/// Every chart and audio file the report can show
pub fn expected_artifacts() -> Vec<Artifact> {
    let mut artifacts = Vec::new();

    for band in EegBand::ALL {
        artifacts.push(Artifact::new("band distributions", format!("box_{}.png", band.name())));
    }
    for band in EegBand::ALL {
        artifacts.push(Artifact::new("band distributions", format!("hist_{}.png", band.name())));
    }
    // Derived indices follow the ten band columns
    for feature in &FEATURE_COLUMNS[10..] {
        artifacts.push(Artifact::new("derived features", format!("hist_{feature}_derived.png")));
    }
    artifacts.push(Artifact::new("dataset", "correlation_matrix.png"));
    artifacts.push(Artifact::new("dataset", "label_distribution.png"));

    for name in ["study", "phone"] {
        artifacts.push(Artifact::new("brain music", format!("{name}_song_full.wav")));
        artifacts.push(Artifact::new("brain music", format!("{name}_song_preview.wav")));
        artifacts.push(Artifact::new("brain music", format!("{name}_mfcc.png")));
    }

    for file in [
        "distraction_vs_focus.png",
        "phone_usage_vs_focus.png",
        "pairplot_multi_variable.png",
    ] {
        artifacts.push(Artifact::new("survey", file));
    }

    for model in LEARNING_CURVE_MODELS {
        artifacts.push(Artifact::new("model insights", format!("learning_curve_{model}.png")));
    }
    for file in [
        "mlp_loss_curve.png",
        "gb_loss_curve.png",
        "cnn1d_loss_curve.png",
        "cnn1d_accuracy_curve.png",
        "confusion_matrix.png",
        SUMMARY_ROC,
    ] {
        artifacts.push(Artifact::new("model insights", file));
    }

    artifacts
}

/// Per-model ROC curves (`roc_<model>.png`) found in `dir`, sorted by name
pub fn model_roc_curves(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with("roc_") && name.ends_with(".png") && name != SUMMARY_ROC)
        .collect();
    files.sort();
    files
}

#[derive(Debug, Serialize)]
pub struct ArtifactStatus {
    pub section: &'static str,
    pub file: String,
    pub present: bool,
}

#[derive(Debug, Serialize)]
pub struct ArtifactReport {
    pub outputs_dir: String,
    pub present: usize,
    pub placeholders: usize,
    pub artifacts: Vec<ArtifactStatus>,
}

/// Check which expected artifacts exist in the outputs directory
pub fn run(ctx: &AppContext) -> Result<ArtifactReport> {
    let dir = &ctx.settings.paths.outputs_dir;

    let mut artifacts: Vec<ArtifactStatus> = expected_artifacts()
        .into_iter()
        .map(|a| ArtifactStatus {
            present: dir.join(&a.file).is_file(),
            section: a.section,
            file: a.file,
        })
        .collect();
    artifacts.extend(model_roc_curves(dir).into_iter().map(|file| ArtifactStatus {
        section: "model roc curves",
        file,
        present: true,
    }));

    let present = artifacts.iter().filter(|a| a.present).count();
    debug!("{} of {} artifacts present in {}", present, artifacts.len(), dir.display());

    Ok(ArtifactReport {
        outputs_dir: dir.display().to_string(),
        present,
        placeholders: artifacts.len() - present,
        artifacts,
    })
}

impl Report for ArtifactReport {
    fn render(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .artifacts
            .iter()
            .map(|a| {
                vec![
                    a.file.clone(),
                    a.section.to_string(),
                    if a.present { "present" } else { "placeholder" }.to_string(),
                ]
            })
            .collect();
        format!(
            "{}: {} present, {} placeholders\n\n{}",
            self.outputs_dir,
            self.present,
            self.placeholders,
            table(&["file", "section", "status"], &rows)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_expected_artifacts() {
        let artifacts = expected_artifacts();
        let files: Vec<&str> = artifacts.iter().map(|a| a.file.as_str()).collect();
        assert!(files.contains(&"box_alpha.png"));
        assert!(files.contains(&"hist_calmness_derived.png"));
        assert!(files.contains(&"phone_song_full.wav"));
        assert!(files.contains(&"learning_curve_CNN_1D.png"));
        assert!(!files.contains(&"hist_delta_rel_derived.png"));
    }

    #[test]
    fn test_report_marks_present_and_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("roc_curve.png"), b"png").unwrap();
        fs::write(dir.path().join("roc_Random_Forest.png"), b"png").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let mut settings = Settings::default();
        settings.paths.outputs_dir = dir.path().to_path_buf();
        let report = run(&AppContext::new(settings)).unwrap();

        let expected = expected_artifacts().len();
        assert_eq!(report.artifacts.len(), expected + 1);
        assert_eq!(report.present, 2);
        assert_eq!(report.placeholders, expected - 1);
        assert_eq!(model_roc_curves(dir.path()), vec!["roc_Random_Forest.png"]);
    }

    #[test]
    fn test_missing_outputs_dir() {
        assert!(model_roc_curves(Path::new("no/such/dir")).is_empty());
    }
}
