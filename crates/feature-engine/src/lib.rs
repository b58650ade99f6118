//! Feature Engineering Engine
//!
//! Windowed feature extraction for EEG-like signals: time-domain statistics
//! (mean, variance, energy) and the fraction of spectral power that falls in
//! a frequency band.

mod bands;
mod features;
mod fft;
mod state;
mod statistics;

pub use bands::{Band, EegBand, ALPHA_BAND};
pub use features::{
    extract_window, extract_windows, summarize, FeatureExtractor, FeatureSummary,
    WindowFeatures, WindowingPlan,
};
pub use fft::{fft_frequency, relative_band_power, FftAnalyzer};
pub use state::CognitiveState;
pub use statistics::{time_domain_features, TimeDomainFeatures};

use thiserror::Error;

/// Errors raised by feature extraction.
///
/// Every variant is an invalid-input failure: the call is rejected before any
/// computation and retrying with the same input fails the same way. A window
/// with zero spectral power is not an error (its relative band power is `0`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("Signal window is empty")]
    EmptyWindow,
    #[error("Invalid sampling rate: {0} Hz")]
    InvalidSampleRate(f64),
    #[error("Invalid band [{low}, {high}] Hz (must satisfy 0 <= low <= high <= {nyquist} Hz)")]
    InvalidBand { low: f64, high: f64, nyquist: f64 },
    #[error("Invalid windowing plan: window_size={window_size}, step_size={step_size}")]
    InvalidPlan { window_size: usize, step_size: usize },
    #[error("No window features to summarize")]
    EmptySummary,
    #[error("Signal power is not finite (non-finite samples or amplitude beyond ~1e150)")]
    NonFiniteSignal,
    #[error("Unknown EEG band '{0}'")]
    UnknownBand(String),
}
