//! Dataset statistics

use anyhow::Result;
use eeg_dataset::{ClassCounts, ColumnSummary, EegRecord, FEATURE_COLUMNS};
use feature_engine::{CognitiveState, EegBand};
use serde::Serialize;

use crate::context::AppContext;
use crate::report::{num, opt, table, Report};

#[derive(Debug, Serialize)]
pub struct BandMean {
    pub band: EegBand,
    pub mean: f64,
}

/// One feature averaged per class
#[derive(Debug, Serialize)]
pub struct ClassComparison {
    pub column: &'static str,
    pub study: Option<f64>,
    pub phone: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub counts: ClassCounts,
    pub band_means: Vec<BandMean>,
    pub class_means: Vec<ClassComparison>,
    pub columns: Vec<ColumnSummary>,
}

/// Class balance, band means, per-class feature means and column statistics
pub fn summary(ctx: &AppContext) -> Result<SummaryReport> {
    let dataset = ctx.dataset()?;

    let band_means = dataset
        .band_means()
        .into_iter()
        .map(|(band, mean)| BandMean { band, mean })
        .collect();

    let study = dataset.class_means(CognitiveState::Study);
    let phone = dataset.class_means(CognitiveState::Phone);
    let lookup = |means: &Option<Vec<(&'static str, f64)>>, i: usize| {
        means.as_ref().map(|m| m[i].1)
    };
    let class_means = FEATURE_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, &column)| ClassComparison {
            column,
            study: lookup(&study, i),
            phone: lookup(&phone, i),
        })
        .collect();

    Ok(SummaryReport {
        counts: dataset.class_counts(),
        band_means,
        class_means,
        columns: dataset.describe(),
    })
}

impl Report for SummaryReport {
    fn render(&self) -> String {
        let bands: Vec<Vec<String>> = self
            .band_means
            .iter()
            .map(|b| {
                let range = b.band.range();
                vec![
                    format!("{} ({}-{} Hz)", b.band, range.low, range.high),
                    num(b.mean),
                ]
            })
            .collect();
        let classes: Vec<Vec<String>> = self
            .class_means
            .iter()
            .map(|c| vec![c.column.to_string(), opt(c.study), opt(c.phone)])
            .collect();
        let columns: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|c| {
                vec![
                    c.column.to_string(),
                    c.count.to_string(),
                    num(c.mean),
                    num(c.std),
                    num(c.min),
                    num(c.max),
                ]
            })
            .collect();

        [
            format!(
                "Rows: {} (study {}, phone {})",
                self.counts.total, self.counts.study, self.counts.phone
            ),
            table(&["band", "mean power"], &bands),
            table(&["feature", "study", "phone"], &classes),
            table(&["feature", "count", "mean", "std", "min", "max"], &columns),
        ]
        .join("\n\n")
    }
}

#[derive(Debug, Serialize)]
pub struct RowReport {
    pub index: usize,
    pub state: CognitiveState,
    pub record: EegRecord,
}

/// A single labelled row
pub fn row(ctx: &AppContext, index: usize) -> Result<RowReport> {
    let dataset = ctx.dataset()?;
    Ok(RowReport {
        index,
        state: dataset.state_of(index)?,
        record: dataset.record(index)?.clone(),
    })
}

impl Report for RowReport {
    fn render(&self) -> String {
        let rows: Vec<Vec<String>> = FEATURE_COLUMNS
            .iter()
            .zip(self.record.features())
            .map(|(&column, value)| vec![column.to_string(), num(value)])
            .collect();
        format!(
            "Row {}: {} (label {})\n\n{}",
            self.index,
            self.state,
            self.state.label(),
            table(&["feature", "value"], &rows)
        )
    }
}

#[derive(Debug, Serialize)]
pub struct CorrelationReport {
    pub a: String,
    pub b: String,
    /// `None` when either column is constant
    pub pearson: Option<f64>,
}

/// Pearson correlation of two feature columns
pub fn correlation(ctx: &AppContext, a: &str, b: &str) -> Result<CorrelationReport> {
    let pearson = ctx.dataset()?.correlation(a, b)?;
    Ok(CorrelationReport {
        a: a.to_string(),
        b: b.to_string(),
        pearson,
    })
}

impl Report for CorrelationReport {
    fn render(&self) -> String {
        match self.pearson {
            Some(r) => format!("corr({}, {}) = {:.4}", self.a, self.b, r),
            None => format!("corr({}, {}) undefined (constant column)", self.a, self.b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::test_support::SAMPLE_CSV;
    use std::io::Write;

    fn context_with_sample() -> (tempfile::NamedTempFile, AppContext) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{SAMPLE_CSV}").unwrap();
        let mut settings = Settings::default();
        settings.paths.data_csv = file.path().to_path_buf();
        (file, AppContext::new(settings))
    }

    #[test]
    fn test_summary() {
        let (_file, ctx) = context_with_sample();
        let report = summary(&ctx).unwrap();

        assert_eq!(report.counts, ClassCounts { total: 3, study: 2, phone: 1 });
        assert_eq!(report.band_means.len(), 5);
        assert_eq!(report.band_means[0].mean, 11.0);

        let alpha_rel = report
            .class_means
            .iter()
            .find(|c| c.column == "alpha_rel")
            .unwrap();
        assert!((alpha_rel.study.unwrap() - 0.32).abs() < 1e-12);
        assert!((alpha_rel.phone.unwrap() - 0.14).abs() < 1e-12);
        assert_eq!(report.columns.len(), 16);
        assert!(report.render().starts_with("Rows: 3 (study 2, phone 1)"));
    }

    #[test]
    fn test_row_lookup() {
        let (_file, ctx) = context_with_sample();
        let report = row(&ctx, 2).unwrap();
        assert_eq!(report.state, CognitiveState::Phone);
        assert_eq!(report.record.alpha, 6.0);
        assert!(row(&ctx, 3).is_err());
    }

    #[test]
    fn test_correlation() {
        let (_file, ctx) = context_with_sample();
        let report = correlation(&ctx, "alpha", "alpha").unwrap();
        assert!((report.pearson.unwrap() - 1.0).abs() < 1e-12);
        assert!(correlation(&ctx, "alpha", "nope").is_err());
    }
}
