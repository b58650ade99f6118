//! Dataset Loading and Aggregation

use std::fs::File;
use std::io::Read;
use std::path::Path;

use feature_engine::{CognitiveState, EegBand};
use ndarray::{aview1, Array2, Axis};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::DatasetError;
use crate::record::{EegRecord, FEATURE_COLUMNS};
use crate::validator::Validator;

/// Row counts per class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassCounts {
    pub total: usize,
    pub study: usize,
    pub phone: usize,
}

/// Descriptive statistics of one feature column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: &'static str,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (N-1); 0 for a single row
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// Validated, labelled EEG feature rows
#[derive(Debug, Clone)]
pub struct EegDataset {
    records: Vec<EegRecord>,
    states: Vec<CognitiveState>,
}

impl EegDataset {
    /// Load and validate a CSV file with a header row
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        info!("Loading EEG dataset from {}", path.display());

        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Parse and validate CSV from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let records = reader
            .deserialize::<EegRecord>()
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_records(records, &Validator::default())
    }

    /// Build from already-parsed rows
    pub fn from_records(records: Vec<EegRecord>, validator: &Validator) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let states = records
            .iter()
            .enumerate()
            .map(|(row, record)| validator.validate_record(row, record))
            .collect::<Result<Vec<_>, _>>()?;

        let dataset = Self { records, states };
        let counts = dataset.class_counts();
        info!(
            "Loaded {} rows ({} study, {} phone)",
            counts.total, counts.study, counts.phone
        );
        Ok(dataset)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a loaded dataset
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All rows in file order
    pub fn records(&self) -> &[EegRecord] {
        &self.records
    }

    /// Row by index
    pub fn record(&self, index: usize) -> Result<&EegRecord, DatasetError> {
        self.records.get(index).ok_or(DatasetError::RowOutOfRange {
            index,
            len: self.records.len(),
        })
    }

    /// State of a row by index
    pub fn state_of(&self, index: usize) -> Result<CognitiveState, DatasetError> {
        self.states
            .get(index)
            .copied()
            .ok_or(DatasetError::RowOutOfRange {
                index,
                len: self.states.len(),
            })
    }

    /// First row labelled with `state`
    pub fn first_of(&self, state: CognitiveState) -> Option<&EegRecord> {
        self.rows_of(state).next()
    }

    fn rows_of(&self, state: CognitiveState) -> impl Iterator<Item = &EegRecord> + '_ {
        self.records
            .iter()
            .zip(&self.states)
            .filter(move |&(_, &s)| s == state)
            .map(|(r, _)| r)
    }

    /// Total / study / phone row counts
    pub fn class_counts(&self) -> ClassCounts {
        let study = self
            .states
            .iter()
            .filter(|&&s| s == CognitiveState::Study)
            .count();
        ClassCounts {
            total: self.states.len(),
            study,
            phone: self.states.len() - study,
        }
    }

    /// Mean absolute power of each band over all rows
    pub fn band_means(&self) -> Vec<(EegBand, f64)> {
        let n = self.records.len() as f64;
        EegBand::ALL
            .iter()
            .map(|&band| {
                let sum: f64 = self.records.iter().map(|r| r.absolute(band)).sum();
                (band, sum / n)
            })
            .collect()
    }

    /// Mean of every feature column over the rows of one class.
    ///
    /// `None` when the class has no rows.
    pub fn class_means(&self, state: CognitiveState) -> Option<Vec<(&'static str, f64)>> {
        let mut sums = [0.0; FEATURE_COLUMNS.len()];
        let mut count = 0usize;
        for record in self.rows_of(state) {
            for (sum, value) in sums.iter_mut().zip(record.features()) {
                *sum += value;
            }
            count += 1;
        }

        if count == 0 {
            return None;
        }
        debug!("Averaged {} {} rows", count, state.name());

        Some(
            FEATURE_COLUMNS
                .iter()
                .zip(sums)
                .map(|(&column, sum)| (column, sum / count as f64))
                .collect(),
        )
    }

    /// Feature matrix `[rows, 16]` in [`FEATURE_COLUMNS`] order
    pub fn feature_matrix(&self) -> Array2<f64> {
        let mut matrix = Array2::zeros((self.records.len(), FEATURE_COLUMNS.len()));
        for (mut row, record) in matrix.axis_iter_mut(Axis(0)).zip(&self.records) {
            row.assign(&aview1(&record.features()));
        }
        matrix
    }

    /// Values of one feature column
    pub fn column(&self, name: &str) -> Result<Vec<f64>, DatasetError> {
        let index = column_index(name)?;
        Ok(self.records.iter().map(|r| r.features()[index]).collect())
    }

    /// Count, mean, sample std, min and max for every feature column
    pub fn describe(&self) -> Vec<ColumnSummary> {
        let matrix = self.feature_matrix();
        let count = matrix.nrows();
        let ddof = if count > 1 { 1.0 } else { 0.0 };
        let stds = matrix.std_axis(Axis(0), ddof);

        FEATURE_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, &column)| {
                let values = matrix.column(i);
                ColumnSummary {
                    column,
                    count,
                    mean: values.sum() / count as f64,
                    std: stds[i],
                    min: values.fold(f64::INFINITY, |m, &v| m.min(v)),
                    max: values.fold(f64::NEG_INFINITY, |m, &v| m.max(v)),
                }
            })
            .collect()
    }

    /// Pearson correlation of two feature columns.
    ///
    /// `None` when either column is constant.
    pub fn correlation(&self, a: &str, b: &str) -> Result<Option<f64>, DatasetError> {
        let xs = self.column(a)?;
        let ys = self.column(b)?;
        Ok(pearson(&xs, &ys))
    }
}

fn column_index(name: &str) -> Result<usize, DatasetError> {
    FEATURE_COLUMNS
        .iter()
        .position(|&c| c == name)
        .ok_or_else(|| DatasetError::UnknownColumn(name.to_string()))
}

/// Pearson correlation of paired samples; `None` below two pairs or when a
/// side is constant
pub(crate) fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() < 2 || xs.len() != ys.len() {
        return None;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x * var_y).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;

    const HEADER: &str = "subject,delta,theta,alpha,beta,gamma,delta_rel,theta_rel,alpha_rel,beta_rel,gamma_rel,\
alpha_beta_ratio,theta_beta_ratio,engagement_index,fatigue,workload,calmness,label";

    fn sample_csv() -> String {
        [
            HEADER,
            "s1,10,8,14,6,2,0.25,0.2,0.35,0.15,0.05,2.33,1.33,0.3,0.4,0.5,0.8,1",
            "s2,12,9,12,7,2,0.29,0.21,0.29,0.17,0.04,1.71,1.29,0.35,0.45,0.55,0.7,1",
            "s3,11,12,6,10,4,0.26,0.28,0.14,0.23,0.09,0.6,1.2,0.6,0.7,0.8,0.3,0",
        ]
        .join("\n")
    }

    #[test]
    fn test_load_from_reader() {
        let dataset = EegDataset::from_reader(sample_csv().as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(
            dataset.class_counts(),
            ClassCounts { total: 3, study: 2, phone: 1 }
        );
        assert_eq!(dataset.state_of(2).unwrap(), CognitiveState::Phone);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample_csv().as_bytes()).unwrap();
        let dataset = EegDataset::load(file.path()).unwrap();
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            EegDataset::load("/nonexistent/eeg.csv"),
            Err(DatasetError::Io { .. })
        ));
    }

    #[test]
    fn test_missing_column_rejected() {
        let csv = "delta,theta,label\n1,2,1\n";
        assert!(matches!(
            EegDataset::from_reader(csv.as_bytes()),
            Err(DatasetError::Csv(_))
        ));
    }

    #[test]
    fn test_unknown_label_rejected() {
        let csv = format!(
            "{}\n{}",
            sample_csv(),
            "s4,1,1,1,1,1,0.2,0.2,0.2,0.2,0.2,1,1,1,1,1,1,7"
        );
        assert!(matches!(
            EegDataset::from_reader(csv.as_bytes()),
            Err(DatasetError::UnknownLabel { row: 3, label: 7 })
        ));
    }

    #[test]
    fn test_header_only_is_empty() {
        assert!(matches!(
            EegDataset::from_reader(HEADER.as_bytes()),
            Err(DatasetError::Empty)
        ));
    }

    #[test]
    fn test_band_and_class_means() {
        let dataset = EegDataset::from_reader(sample_csv().as_bytes()).unwrap();

        let means = dataset.band_means();
        assert_eq!(means[0], (EegBand::Delta, 11.0));
        assert_eq!(means[2].0, EegBand::Alpha);
        assert!((means[2].1 - 32.0 / 3.0).abs() < 1e-12);

        let study = dataset.class_means(CognitiveState::Study).unwrap();
        assert_eq!(study[2], ("alpha", 13.0));
        let phone = dataset.class_means(CognitiveState::Phone).unwrap();
        assert_eq!(phone[2], ("alpha", 6.0));
    }

    #[test]
    fn test_first_of_and_row_lookup() {
        let dataset = EegDataset::from_reader(sample_csv().as_bytes()).unwrap();
        assert_eq!(dataset.first_of(CognitiveState::Phone).unwrap().alpha, 6.0);
        assert_eq!(dataset.record(1).unwrap().delta, 12.0);
        assert!(matches!(
            dataset.record(3),
            Err(DatasetError::RowOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_feature_matrix_and_describe() {
        let dataset = EegDataset::from_reader(sample_csv().as_bytes()).unwrap();
        let matrix = dataset.feature_matrix();
        assert_eq!(matrix.dim(), (3, 16));
        assert_eq!(matrix[[2, 15]], 0.3);

        let summary = dataset.describe();
        assert_eq!(summary.len(), 16);
        assert_eq!(summary[0].column, "delta");
        assert_eq!(summary[0].min, 10.0);
        assert_eq!(summary[0].max, 12.0);
        assert!((summary[0].mean - 11.0).abs() < 1e-12);
        assert!((summary[0].std - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation() {
        let dataset = EegDataset::from_reader(sample_csv().as_bytes()).unwrap();
        let same = dataset.correlation("alpha", "alpha").unwrap().unwrap();
        assert!((same - 1.0).abs() < 1e-12);

        let calm = dataset.correlation("alpha", "calmness").unwrap().unwrap();
        assert!(calm > 0.9);

        assert!(matches!(
            dataset.correlation("alpha", "mood"),
            Err(DatasetError::UnknownColumn(_))
        ));
    }

    fn uniform_record(value: f64, label: i64) -> EegRecord {
        EegRecord {
            delta: value,
            theta: value,
            alpha: value,
            beta: value,
            gamma: value,
            delta_rel: 0.2,
            theta_rel: 0.2,
            alpha_rel: 0.2,
            beta_rel: 0.2,
            gamma_rel: 0.2,
            alpha_beta_ratio: 1.0,
            theta_beta_ratio: 1.0,
            engagement_index: 0.5,
            fatigue: 0.5,
            workload: 0.5,
            calmness: 0.5,
            label,
        }
    }

    proptest! {
        #[test]
        fn prop_class_counts_sum_to_total(
            rows in prop::collection::vec((0.0f64..100.0, 0i64..2), 1..64)
        ) {
            let records = rows.iter().map(|&(v, label)| uniform_record(v, label)).collect();
            let dataset = EegDataset::from_records(records, &Validator::default()).unwrap();

            let counts = dataset.class_counts();
            let study = rows.iter().filter(|&&(_, label)| label == 1).count();
            prop_assert_eq!(counts.total, rows.len());
            prop_assert_eq!(counts.study, study);
            prop_assert_eq!(counts.study + counts.phone, counts.total);
        }

        #[test]
        fn prop_feature_matrix_rows_match_records(
            rows in prop::collection::vec((0.0f64..100.0, 0i64..2), 1..64)
        ) {
            let records: Vec<EegRecord> =
                rows.iter().map(|&(v, label)| uniform_record(v, label)).collect();
            let dataset = EegDataset::from_records(records.clone(), &Validator::default()).unwrap();

            let matrix = dataset.feature_matrix();
            prop_assert_eq!(matrix.dim(), (records.len(), FEATURE_COLUMNS.len()));
            for (row, record) in matrix.outer_iter().zip(&records) {
                prop_assert_eq!(row.to_vec(), record.features().to_vec());
            }
        }
    }
}
