//! FFT-based Relative Band Power

use rustfft::{num_complex::Complex, FftPlanner};

use crate::bands::{validate_sample_rate, Band};
use crate::FeatureError;

/// Frequency (Hz) of FFT bin `k` for an `n`-point transform at `sample_rate`.
///
/// Bins below `ceil(n/2)` are non-negative; the rest are the mirrored negative
/// frequencies, so an even-length transform labels its Nyquist bin `-fs/2`.
pub fn fft_frequency(k: usize, n: usize, sample_rate: f64) -> f64 {
    let signed = if k < (n + 1) / 2 {
        k as f64
    } else {
        k as f64 - n as f64
    };
    signed * sample_rate / n as f64
}

/// FFT analyzer bound to one sampling rate.
///
/// The planner caches plans per length, so analysing many windows of the same
/// size only plans once.
pub struct FftAnalyzer {
    planner: FftPlanner<f64>,
    sample_rate: f64,
}

impl FftAnalyzer {
    /// Create a new analyzer, rejecting non-positive or non-finite rates
    pub fn new(sample_rate: f64) -> Result<Self, FeatureError> {
        validate_sample_rate(sample_rate)?;
        Ok(Self {
            planner: FftPlanner::new(),
            sample_rate,
        })
    }

    /// Sampling frequency (Hz)
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Two-sided power spectrum `|X_k|^2`, one entry per bin
    pub fn power_spectrum(&mut self, window: &[f64]) -> Result<Vec<f64>, FeatureError> {
        if window.is_empty() {
            return Err(FeatureError::EmptyWindow);
        }

        let mut buffer: Vec<Complex<f64>> =
            window.iter().map(|&v| Complex::new(v, 0.0)).collect();

        let fft = self.planner.plan_fft_forward(window.len());
        fft.process(&mut buffer);

        Ok(buffer.iter().map(|c| c.norm_sqr()).collect())
    }

    /// Fraction of total spectral power whose bin frequency magnitude lies in `band`.
    ///
    /// The total covers every bin of the two-sided spectrum; a bin at `-f` is
    /// matched against the band through `|f|`, so the mirror of an in-band
    /// component is counted along with it. Zero total power yields `0.0`;
    /// a total that overflows `f64` is rejected.
    pub fn relative_band_power(&mut self, window: &[f64], band: Band) -> Result<f64, FeatureError> {
        band.validate(self.sample_rate)?;
        let power = self.power_spectrum(window)?;

        let total_power: f64 = power.iter().sum();
        if !total_power.is_finite() {
            return Err(FeatureError::NonFiniteSignal);
        }
        if total_power == 0.0 {
            return Ok(0.0);
        }

        let n = power.len();
        let band_power: f64 = power
            .iter()
            .enumerate()
            .filter(|&(k, _)| band.contains(fft_frequency(k, n, self.sample_rate).abs()))
            .map(|(_, &p)| p)
            .sum();

        Ok(band_power / total_power)
    }

    /// Frequency (Hz) of the strongest non-negative bin, DC excluded when possible
    pub fn dominant_frequency(&mut self, window: &[f64]) -> Result<f64, FeatureError> {
        let power = self.power_spectrum(window)?;
        let n = power.len();
        let positive = (n + 1) / 2;

        let start = if positive > 1 { 1 } else { 0 };
        let mut best = start;
        for k in start..positive {
            if power[k] > power[best] {
                best = k;
            }
        }

        Ok(fft_frequency(best, n, self.sample_rate))
    }
}

/// One-shot relative band power for a single window.
///
/// Convenience over [`FftAnalyzer::relative_band_power`] for callers that do
/// not keep an analyzer around.
pub fn relative_band_power(window: &[f64], sample_rate: f64, band: Band) -> Result<f64, FeatureError> {
    FftAnalyzer::new(sample_rate)?.relative_band_power(window, band)
}
