//! Single-segment comparison of focused and distracted alpha waves

use anyhow::Result;
use feature_engine::{Band, CognitiveState, FeatureExtractor};
use serde::Serialize;

use crate::context::AppContext;
use crate::report::{num, table, Report};

#[derive(Debug, Serialize)]
pub struct SegmentRow {
    pub state: CognitiveState,
    pub mean: f64,
    pub variance: f64,
    pub energy: f64,
    pub relative_band_power: f64,
    /// Strongest spectral component (Hz)
    pub dominant_hz: f64,
}

#[derive(Debug, Serialize)]
pub struct SegmentReport {
    pub sample_rate: f64,
    pub window_size: usize,
    pub band: Band,
    pub rows: Vec<SegmentRow>,
}

/// Synthesise one analysis window per state and extract its features
pub fn run(ctx: &mut AppContext) -> Result<SegmentReport> {
    let analysis = ctx.settings.analysis.clone();
    let mut extractor = FeatureExtractor::new(analysis.sample_rate, analysis.band())?;

    let mut rows = Vec::with_capacity(CognitiveState::ALL.len());
    for state in CognitiveState::ALL {
        let wave = ctx
            .generator
            .alpha_wave(state, analysis.sample_rate, analysis.window_seconds)?;
        let features = extractor.extract(&wave)?;
        let dominant_hz = extractor.analyzer().dominant_frequency(&wave)?;

        rows.push(SegmentRow {
            state,
            mean: features.mean,
            variance: features.variance,
            energy: features.energy,
            relative_band_power: features.relative_band_power,
            dominant_hz,
        });
    }

    Ok(SegmentReport {
        sample_rate: analysis.sample_rate,
        window_size: analysis.window_size(),
        band: extractor.band(),
        rows,
    })
}

impl Report for SegmentReport {
    fn render(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| {
                vec![
                    r.state.to_string(),
                    num(r.mean),
                    num(r.variance),
                    num(r.energy),
                    num(r.relative_band_power),
                    format!("{:.1}", r.dominant_hz),
                ]
            })
            .collect();

        format!(
            "Band {}-{} Hz, {} samples @ {} Hz\n\n{}",
            self.band.low,
            self.band.high,
            self.window_size,
            self.sample_rate,
            table(
                &["state", "mean", "variance", "energy", "band power", "peak Hz"],
                &rows
            )
        )
    }
}
