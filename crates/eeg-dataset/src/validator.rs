//! Row Validator for Range Checking

use crate::error::DatasetError;
use crate::record::{EegRecord, FEATURE_COLUMNS};
use feature_engine::{CognitiveState, EegBand};
use serde::{Deserialize, Serialize};

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Relative band power valid range
    pub relative_range: (f64, f64),
    /// Absolute band power valid range
    pub absolute_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            relative_range: (0.0, 1.0),
            absolute_range: (0.0, f64::MAX),
        }
    }
}

/// Validator for dataset rows
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        row: usize,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), DatasetError> {
        if value < range.0 || value > range.1 {
            Err(DatasetError::OutOfRange {
                row,
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate a full row and resolve its label.
    ///
    /// `row` is the zero-based data row index, used only in error messages.
    pub fn validate_record(
        &self,
        row: usize,
        record: &EegRecord,
    ) -> Result<CognitiveState, DatasetError> {
        for (field, value) in FEATURE_COLUMNS.into_iter().zip(record.features()) {
            if !value.is_finite() {
                return Err(DatasetError::NonFinite { row, field });
            }
        }

        for (i, band) in EegBand::ALL.iter().enumerate() {
            self.validate_range(
                row,
                FEATURE_COLUMNS[i],
                record.absolute(*band),
                self.config.absolute_range,
            )?;
            self.validate_range(
                row,
                FEATURE_COLUMNS[i + 5],
                record.relative(*band),
                self.config.relative_range,
            )?;
        }

        CognitiveState::from_label(record.label).ok_or(DatasetError::UnknownLabel {
            row,
            label: record.label,
        })
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(label: i64) -> EegRecord {
        EegRecord {
            delta: 12.0,
            theta: 8.0,
            alpha: 10.0,
            beta: 6.0,
            gamma: 2.0,
            delta_rel: 0.3,
            theta_rel: 0.2,
            alpha_rel: 0.25,
            beta_rel: 0.15,
            gamma_rel: 0.1,
            alpha_beta_ratio: 1.67,
            theta_beta_ratio: 1.33,
            engagement_index: 0.4,
            fatigue: 0.5,
            workload: 0.6,
            calmness: 0.7,
            label,
        }
    }

    #[test]
    fn test_valid_record() {
        let validator = Validator::default();
        assert_eq!(validator.validate_record(0, &record(1)).unwrap(), CognitiveState::Study);
        assert_eq!(validator.validate_record(0, &record(0)).unwrap(), CognitiveState::Phone);
    }

    #[test]
    fn test_unknown_label() {
        let validator = Validator::default();
        assert!(matches!(
            validator.validate_record(4, &record(2)),
            Err(DatasetError::UnknownLabel { row: 4, label: 2 })
        ));
    }

    #[test]
    fn test_relative_out_of_range() {
        let validator = Validator::default();
        let mut bad = record(1);
        bad.alpha_rel = 1.5;
        assert!(matches!(
            validator.validate_record(0, &bad),
            Err(DatasetError::OutOfRange { field: "alpha_rel", .. })
        ));
    }

    #[test]
    fn test_non_finite() {
        let validator = Validator::default();
        let mut bad = record(1);
        bad.fatigue = f64::NAN;
        assert!(matches!(
            validator.validate_record(0, &bad),
            Err(DatasetError::NonFinite { field: "fatigue", .. })
        ));
    }
}
