//! Multi-window tracking of variance and band power over a longer recording

use anyhow::{ensure, Result};
use feature_engine::{summarize, CognitiveState, FeatureExtractor, FeatureSummary, WindowFeatures};
use serde::Serialize;
use tracing::info;

use crate::context::AppContext;
use crate::report::{num, table, Report};

#[derive(Debug, Serialize)]
pub struct StateWindows {
    pub state: CognitiveState,
    pub windows: Vec<WindowFeatures>,
    pub summary: FeatureSummary,
}

#[derive(Debug, Serialize)]
pub struct WindowsReport {
    pub sample_rate: f64,
    pub window_size: usize,
    pub duration_s: f64,
    pub states: Vec<StateWindows>,
}

/// Synthesise `count` windows per state and extract features window by window
pub fn run(ctx: &mut AppContext, count: Option<usize>) -> Result<WindowsReport> {
    let analysis = ctx.settings.analysis.clone();
    let count = count.unwrap_or(analysis.windows);
    ensure!(count > 0, "window count must be at least 1");

    let plan = analysis.plan();
    // Whole windows of samples, so rounding the window size never costs a window
    let duration_s = (count * plan.window_size) as f64 / analysis.sample_rate;
    let mut extractor = FeatureExtractor::new(analysis.sample_rate, analysis.band())?;

    let mut states = Vec::with_capacity(CognitiveState::ALL.len());
    for state in CognitiveState::ALL {
        let wave = ctx.generator.alpha_wave(state, analysis.sample_rate, duration_s)?;
        let windows = extractor.extract_windows(&wave, plan)?;
        let summary = summarize(&windows)?;
        info!(
            "{}: {} windows, mean band power {:.3}",
            state.name(),
            summary.windows,
            summary.relative_band_power
        );
        states.push(StateWindows { state, windows, summary });
    }

    Ok(WindowsReport {
        sample_rate: analysis.sample_rate,
        window_size: plan.window_size,
        duration_s,
        states,
    })
}

impl Report for WindowsReport {
    fn render(&self) -> String {
        let mut header = vec!["window".to_string()];
        for s in &self.states {
            header.push(format!("{} var", s.state.name().to_lowercase()));
            header.push(format!("{} band", s.state.name().to_lowercase()));
        }

        let count = self.states.iter().map(|s| s.windows.len()).min().unwrap_or(0);
        let mut rows: Vec<Vec<String>> = (0..count)
            .map(|i| {
                let mut row = vec![(i + 1).to_string()];
                for s in &self.states {
                    row.push(num(s.windows[i].variance));
                    row.push(num(s.windows[i].relative_band_power));
                }
                row
            })
            .collect();

        let mut average = vec!["avg".to_string()];
        for s in &self.states {
            average.push(num(s.summary.variance));
            average.push(num(s.summary.relative_band_power));
        }
        rows.push(average);

        let header: Vec<&str> = header.iter().map(String::as_str).collect();
        format!(
            "{} windows of {} samples @ {} Hz ({} s)\n\n{}",
            count,
            self.window_size,
            self.sample_rate,
            self.duration_s,
            table(&header, &rows)
        )
    }
}
