//! Model Comparison Table
//!
//! Evaluation metrics of the trained classifiers, as exported by the training
//! notebook to `model_comparison.csv`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::DatasetError;

/// Accuracy at or above which a model is rated excellent (percent)
pub const EXCELLENT_ACCURACY_PCT: f64 = 99.9;

/// Accuracy at or above which a model is rated good (percent)
pub const GOOD_ACCURACY_PCT: f64 = 99.0;

/// Held-out metrics of one model, as fractions in `[0, 1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelScore {
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Accuracy")]
    pub accuracy: f64,
    #[serde(rename = "Precision")]
    pub precision: f64,
    #[serde(rename = "Recall")]
    pub recall: f64,
    #[serde(rename = "F1-score")]
    pub f1: f64,
    #[serde(rename = "ROC-AUC")]
    pub roc_auc: f64,
}

/// Accuracy band used when presenting a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyTier {
    Excellent,
    Good,
    Weak,
}

impl ModelScore {
    pub fn tier(&self) -> AccuracyTier {
        let pct = self.accuracy * 100.0;
        if pct >= EXCELLENT_ACCURACY_PCT {
            AccuracyTier::Excellent
        } else if pct >= GOOD_ACCURACY_PCT {
            AccuracyTier::Good
        } else {
            AccuracyTier::Weak
        }
    }
}

/// Load the comparison table; at least one model row is required
pub fn load_model_comparison(path: impl AsRef<Path>) -> Result<Vec<ModelScore>, DatasetError> {
    let path = path.as_ref();
    info!("Loading model comparison from {}", path.display());

    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_model_comparison(file)
}

/// Parse the comparison table from any reader
pub fn read_model_comparison<R: Read>(reader: R) -> Result<Vec<ModelScore>, DatasetError> {
    let scores = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize::<ModelScore>()
        .collect::<Result<Vec<_>, _>>()?;
    if scores.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(scores)
}

/// Model with the highest accuracy; ties keep the earlier row
pub fn best_model(scores: &[ModelScore]) -> Option<&ModelScore> {
    scores.iter().fold(None, |best: Option<&ModelScore>, s| match best {
        Some(b) if b.accuracy >= s.accuracy => Some(b),
        _ => Some(s),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "Model,Accuracy,Precision,Recall,F1-score,ROC-AUC
Logistic Regression,0.985,0.98,0.99,0.985,0.998
Random Forest,0.9995,0.999,1.0,0.9995,1.0
XGBoost,0.9995,1.0,0.999,0.9995,0.99999
SVM,0.992,0.99,0.994,0.992,0.999";

    #[test]
    fn test_read_model_comparison() {
        let scores = read_model_comparison(CSV.as_bytes()).unwrap();
        assert_eq!(scores.len(), 4);
        assert_eq!(scores[1].model, "Random Forest");
        assert_eq!(scores[3].f1, 0.992);
    }

    #[test]
    fn test_tiers_and_best_model() {
        let scores = read_model_comparison(CSV.as_bytes()).unwrap();
        assert_eq!(scores[0].tier(), AccuracyTier::Weak);
        assert_eq!(scores[1].tier(), AccuracyTier::Excellent);
        assert_eq!(scores[3].tier(), AccuracyTier::Good);
        assert_eq!(best_model(&scores).unwrap().model, "Random Forest");
        assert_eq!(best_model(&[]), None);
    }

    #[test]
    fn test_header_only_is_empty() {
        assert!(matches!(
            read_model_comparison("Model,Accuracy,Precision,Recall,F1-score,ROC-AUC\n".as_bytes()),
            Err(DatasetError::Empty)
        ));
    }

    #[test]
    fn test_missing_metric_column() {
        assert!(matches!(
            read_model_comparison("Model,Accuracy\nSVM,0.9\n".as_bytes()),
            Err(DatasetError::Csv(_))
        ));
    }
}
