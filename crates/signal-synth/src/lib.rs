//! Synthetic EEG Signal Source
//!
//! Generates EEG-like waveforms for analysis and display:
//! - noisy 10 Hz alpha waves whose noise level depends on the cognitive state
//! - band-mixture resynthesis of a recorded band-power profile

mod generator;

pub use generator::{
    alpha_noise_std, alpha_wave, band_mixture, normalize_peak, sample_count, time_axis,
    BandPowers, SignalGenerator, ALPHA_CARRIER_HZ, MIXTURE_NOISE_STD,
};

use thiserror::Error;

/// Signal generation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthError {
    #[error("Invalid sampling rate: {0} Hz")]
    InvalidSampleRate(f64),
    #[error("Invalid duration: {0} s")]
    InvalidDuration(f64),
    #[error("Invalid noise standard deviation: {0}")]
    InvalidNoise(f64),
}
