//! Window Feature Assembly

use crate::bands::Band;
use crate::fft::FftAnalyzer;
use crate::statistics::time_domain_features;
use crate::FeatureError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Features of a single signal window
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowFeatures {
    /// Arithmetic mean
    pub mean: f64,
    /// Population variance
    pub variance: f64,
    /// Sum of squared samples
    pub energy: f64,
    /// Fraction of spectral power inside the analysis band
    pub relative_band_power: f64,
}

/// How a long signal is cut into windows.
///
/// Windows start at `0, step, 2*step, ...` while a full window still fits;
/// trailing samples that do not fill a window are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowingPlan {
    /// Samples per window
    pub window_size: usize,
    /// Samples between consecutive window starts
    pub step_size: usize,
}

impl WindowingPlan {
    /// Consecutive windows with no overlap (`step == size`)
    pub fn non_overlapping(window_size: usize) -> Self {
        Self {
            window_size,
            step_size: window_size,
        }
    }

    /// Reject zero-sized windows or steps
    pub fn validate(&self) -> Result<(), FeatureError> {
        if self.window_size == 0 || self.step_size == 0 {
            return Err(FeatureError::InvalidPlan {
                window_size: self.window_size,
                step_size: self.step_size,
            });
        }
        Ok(())
    }

    /// Number of complete windows in a signal of `len` samples
    pub fn window_count(&self, len: usize) -> usize {
        if self.window_size == 0 || self.step_size == 0 || len < self.window_size {
            return 0;
        }
        (len - self.window_size) / self.step_size + 1
    }

    /// Iterate over the windows of `signal`, in order
    pub fn windows<'a>(&self, signal: &'a [f64]) -> impl Iterator<Item = &'a [f64]> + 'a {
        let Self {
            window_size,
            step_size,
        } = *self;
        (0..self.window_count(signal.len())).map(move |i| {
            let start = i * step_size;
            &signal[start..start + window_size]
        })
    }
}

/// Per-field averages across a run of windows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureSummary {
    /// Number of windows averaged
    pub windows: usize,
    pub mean: f64,
    pub variance: f64,
    pub energy: f64,
    pub relative_band_power: f64,
}

/// Feature extractor bound to a sampling rate and analysis band
pub struct FeatureExtractor {
    /// FFT analyzer
    fft_analyzer: FftAnalyzer,
    /// Analysis band
    band: Band,
}

impl FeatureExtractor {
    /// Create a new feature extractor, validating the band against Nyquist
    pub fn new(sample_rate: f64, band: Band) -> Result<Self, FeatureError> {
        band.validate(sample_rate)?;
        Ok(Self {
            fft_analyzer: FftAnalyzer::new(sample_rate)?,
            band,
        })
    }

    /// Sampling frequency (Hz)
    pub fn sample_rate(&self) -> f64 {
        self.fft_analyzer.sample_rate()
    }

    /// Analysis band
    pub fn band(&self) -> Band {
        self.band
    }

    /// Mutable access to the underlying analyzer (spectra, dominant frequency)
    pub fn analyzer(&mut self) -> &mut FftAnalyzer {
        &mut self.fft_analyzer
    }

    /// Extract features from one window
    pub fn extract(&mut self, window: &[f64]) -> Result<WindowFeatures, FeatureError> {
        let stats = time_domain_features(window)?;
        let relative_band_power = self.fft_analyzer.relative_band_power(window, self.band)?;

        Ok(WindowFeatures {
            mean: stats.mean,
            variance: stats.variance,
            energy: stats.energy,
            relative_band_power,
        })
    }

    /// Extract features from every window of `signal`, preserving window order
    pub fn extract_windows(
        &mut self,
        signal: &[f64],
        plan: WindowingPlan,
    ) -> Result<Vec<WindowFeatures>, FeatureError> {
        plan.validate()?;

        let count = plan.window_count(signal.len());
        debug!(
            "Extracting {} windows (size={}, step={}) from {} samples",
            count,
            plan.window_size,
            plan.step_size,
            signal.len()
        );

        let mut results = Vec::with_capacity(count);
        for window in plan.windows(signal) {
            results.push(self.extract(window)?);
        }
        Ok(results)
    }
}

/// Extract features from a single window
pub fn extract_window(window: &[f64], sample_rate: f64, band: Band) -> Result<WindowFeatures, FeatureError> {
    FeatureExtractor::new(sample_rate, band)?.extract(window)
}

/// Extract features from each window of a longer signal, in window order
pub fn extract_windows(
    signal: &[f64],
    sample_rate: f64,
    band: Band,
    plan: WindowingPlan,
) -> Result<Vec<WindowFeatures>, FeatureError> {
    FeatureExtractor::new(sample_rate, band)?.extract_windows(signal, plan)
}

/// Average every field across `results`
pub fn summarize(results: &[WindowFeatures]) -> Result<FeatureSummary, FeatureError> {
    if results.is_empty() {
        return Err(FeatureError::EmptySummary);
    }

    let n = results.len() as f64;
    let avg = |f: fn(&WindowFeatures) -> f64| results.iter().map(f).sum::<f64>() / n;

    Ok(FeatureSummary {
        windows: results.len(),
        mean: avg(|w| w.mean),
        variance: avg(|w| w.variance),
        energy: avg(|w| w.energy),
        relative_band_power: avg(|w| w.relative_band_power),
    })
}
