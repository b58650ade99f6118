//! Trained model comparison

use anyhow::{Context, Result};
use eeg_dataset::{best_model, load_model_comparison, AccuracyTier, ModelScore};
use serde::Serialize;

use crate::context::AppContext;
use crate::report::{table, Report};

#[derive(Debug, Serialize)]
pub struct ModelRow {
    #[serde(flatten)]
    pub score: ModelScore,
    pub tier: AccuracyTier,
}

#[derive(Debug, Serialize)]
pub struct ModelsReport {
    pub models: Vec<ModelRow>,
    /// Highest accuracy, first listed on ties
    pub best: Option<String>,
}

/// Metrics of every trained model from `paths.model_comparison_csv`
pub fn compare(ctx: &AppContext) -> Result<ModelsReport> {
    let path = &ctx.settings.paths.model_comparison_csv;
    let scores = load_model_comparison(path)
        .with_context(|| format!("failed to load model comparison {}", path.display()))?;

    let best = best_model(&scores).map(|s| s.model.clone());
    let models = scores
        .into_iter()
        .map(|score| ModelRow {
            tier: score.tier(),
            score,
        })
        .collect();
    Ok(ModelsReport { models, best })
}

fn pct(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

impl Report for ModelsReport {
    fn render(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .models
            .iter()
            .map(|m| {
                let s = &m.score;
                vec![
                    s.model.clone(),
                    pct(s.accuracy),
                    pct(s.precision),
                    pct(s.recall),
                    pct(s.f1),
                    format!("{:.4}", s.roc_auc),
                    match m.tier {
                        AccuracyTier::Excellent => "excellent",
                        AccuracyTier::Good => "good",
                        AccuracyTier::Weak => "weak",
                    }
                    .to_string(),
                ]
            })
            .collect();

        let mut out = table(
            &["model", "accuracy", "precision", "recall", "f1", "roc-auc", "tier"],
            &rows,
        );
        if let Some(best) = &self.best {
            out.push_str(&format!("\n\nBest by accuracy: {best}"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use std::io::Write;

    #[test]
    fn test_compare() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "Model,Accuracy,Precision,Recall,F1-score,ROC-AUC\n\
             Random Forest,0.9995,0.999,1.0,0.9995,1.0\n\
             Logistic Regression,0.985,0.98,0.99,0.985,0.998"
        )
        .unwrap();
        let mut settings = Settings::default();
        settings.paths.model_comparison_csv = file.path().to_path_buf();

        let report = compare(&AppContext::new(settings)).unwrap();
        assert_eq!(report.models.len(), 2);
        assert_eq!(report.best.as_deref(), Some("Random Forest"));
        assert_eq!(report.models[1].tier, AccuracyTier::Weak);

        let rendered = report.render();
        assert!(rendered.contains("99.95%"));
        assert!(rendered.contains("0.9980"));
        assert!(rendered.ends_with("Best by accuracy: Random Forest"));
    }

    #[test]
    fn test_missing_comparison_file() {
        let mut settings = Settings::default();
        settings.paths.model_comparison_csv = "does/not/exist.csv".into();
        assert!(compare(&AppContext::new(settings)).is_err());
    }
}
