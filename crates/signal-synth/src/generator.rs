//! Waveform Generators

use feature_engine::{CognitiveState, EegBand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

use crate::SynthError;

/// Carrier frequency of the synthetic alpha wave (Hz)
pub const ALPHA_CARRIER_HZ: f64 = 10.0;

/// Gaussian noise added to a band mixture before peak normalisation
pub const MIXTURE_NOISE_STD: f64 = 0.05;

/// Guards the peak normalisation against an all-zero signal
const PEAK_EPSILON: f64 = 1e-9;

/// Noise level of the synthetic alpha wave for each state.
///
/// Focused recordings are modelled as a clean rhythm, distracted ones as the
/// same rhythm buried in three times the noise.
pub fn alpha_noise_std(state: CognitiveState) -> f64 {
    match state {
        CognitiveState::Study => 0.2,
        CognitiveState::Phone => 0.6,
    }
}

/// Number of samples covering `duration_s` seconds at `sample_rate`
pub fn sample_count(sample_rate: f64, duration_s: f64) -> Result<usize, SynthError> {
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(SynthError::InvalidSampleRate(sample_rate));
    }
    if !(duration_s.is_finite() && duration_s > 0.0) {
        return Err(SynthError::InvalidDuration(duration_s));
    }
    let n = (sample_rate * duration_s).round() as usize;
    if n == 0 {
        return Err(SynthError::InvalidDuration(duration_s));
    }
    Ok(n)
}

/// Sample times `i / fs` for `n` samples
pub fn time_axis(sample_rate: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64 / sample_rate).collect()
}

fn gaussian(std_dev: f64) -> Result<Normal<f64>, SynthError> {
    if !std_dev.is_finite() {
        return Err(SynthError::InvalidNoise(std_dev));
    }
    Normal::new(0.0, std_dev).map_err(|_| SynthError::InvalidNoise(std_dev))
}

/// `sin(2π·10·t) + N(0, σ_state)` sampled at `sample_rate` for `duration_s` seconds
pub fn alpha_wave<R: Rng + ?Sized>(
    state: CognitiveState,
    sample_rate: f64,
    duration_s: f64,
    rng: &mut R,
) -> Result<Vec<f64>, SynthError> {
    let n = sample_count(sample_rate, duration_s)?;
    let noise = gaussian(alpha_noise_std(state))?;

    debug!("Generating {} alpha wave: {} samples @ {} Hz", state.name(), n, sample_rate);

    Ok(time_axis(sample_rate, n)
        .into_iter()
        .map(|t| (2.0 * PI * ALPHA_CARRIER_HZ * t).sin() + noise.sample(rng))
        .collect())
}

/// Relative power of each EEG band, as stored in the dataset's `*_rel` columns
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BandPowers {
    pub delta: f64,
    pub theta: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl BandPowers {
    /// Build from a per-band lookup
    pub fn from_fn(mut f: impl FnMut(EegBand) -> f64) -> Self {
        Self {
            delta: f(EegBand::Delta),
            theta: f(EegBand::Theta),
            alpha: f(EegBand::Alpha),
            beta: f(EegBand::Beta),
            gamma: f(EegBand::Gamma),
        }
    }

    /// Power of one band
    pub fn get(&self, band: EegBand) -> f64 {
        match band {
            EegBand::Delta => self.delta,
            EegBand::Theta => self.theta,
            EegBand::Alpha => self.alpha,
            EegBand::Beta => self.beta,
            EegBand::Gamma => self.gamma,
        }
    }
}

/// Resynthesise a band-power profile into a waveform.
///
/// Each band contributes a sinusoid at its carrier frequency weighted by its
/// relative power; Gaussian noise is added and the result is scaled so its
/// peak magnitude is just under 1.
pub fn band_mixture<R: Rng + ?Sized>(
    powers: &BandPowers,
    sample_rate: f64,
    duration_s: f64,
    noise_std: f64,
    rng: &mut R,
) -> Result<Vec<f64>, SynthError> {
    let n = sample_count(sample_rate, duration_s)?;
    let noise = gaussian(noise_std)?;

    let mut signal: Vec<f64> = time_axis(sample_rate, n)
        .into_iter()
        .map(|t| {
            EegBand::ALL
                .iter()
                .map(|&band| powers.get(band) * (2.0 * PI * band.carrier_hz() * t).sin())
                .sum::<f64>()
                + noise.sample(rng)
        })
        .collect();

    normalize_peak(&mut signal);
    Ok(signal)
}

/// Divide by `max|x| + 1e-9` in place
pub fn normalize_peak(signal: &mut [f64]) {
    let peak = signal.iter().fold(0.0_f64, |m, &v| m.max(v.abs()));
    let scale = peak + PEAK_EPSILON;
    for v in signal.iter_mut() {
        *v /= scale;
    }
}

/// Generator owning its random source
pub struct SignalGenerator {
    rng: StdRng,
}

impl SignalGenerator {
    /// Reproducible generator
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// See [`alpha_wave`]
    pub fn alpha_wave(
        &mut self,
        state: CognitiveState,
        sample_rate: f64,
        duration_s: f64,
    ) -> Result<Vec<f64>, SynthError> {
        alpha_wave(state, sample_rate, duration_s, &mut self.rng)
    }

    /// See [`band_mixture`]
    pub fn band_mixture(
        &mut self,
        powers: &BandPowers,
        sample_rate: f64,
        duration_s: f64,
        noise_std: f64,
    ) -> Result<Vec<f64>, SynthError> {
        band_mixture(powers, sample_rate, duration_s, noise_std, &mut self.rng)
    }

    /// Random source, for callers that need extra draws (live wave noise)
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::{extract_windows, summarize, WindowingPlan, ALPHA_BAND};
    use proptest::prelude::*;

    #[test]
    fn test_sample_count() {
        assert_eq!(sample_count(128.0, 1.0).unwrap(), 128);
        assert_eq!(sample_count(256.0, 2.0).unwrap(), 512);
        assert!(sample_count(0.0, 1.0).is_err());
        assert!(sample_count(128.0, 0.0).is_err());
        assert!(sample_count(128.0, 0.001).is_err());
    }

    #[test]
    fn test_seeded_reproducible() {
        let a = SignalGenerator::seeded(7)
            .alpha_wave(CognitiveState::Study, 128.0, 2.0)
            .unwrap();
        let b = SignalGenerator::seeded(7)
            .alpha_wave(CognitiveState::Study, 128.0, 2.0)
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 256);
    }

    #[test]
    fn test_study_has_more_alpha_than_phone() {
        let mut generator = SignalGenerator::seeded(42);
        let fs = 128.0;
        let plan = WindowingPlan::non_overlapping(128);

        let study = generator.alpha_wave(CognitiveState::Study, fs, 10.0).unwrap();
        let phone = generator.alpha_wave(CognitiveState::Phone, fs, 10.0).unwrap();

        let study = summarize(&extract_windows(&study, fs, ALPHA_BAND, plan).unwrap()).unwrap();
        let phone = summarize(&extract_windows(&phone, fs, ALPHA_BAND, plan).unwrap()).unwrap();

        assert_eq!(study.windows, 10);
        assert!(study.relative_band_power > phone.relative_band_power);
        assert!(study.variance < phone.variance);
    }

    #[test]
    fn test_band_mixture_dominated_by_strongest_band() {
        let powers = BandPowers {
            alpha: 1.0,
            ..Default::default()
        };
        let mut generator = SignalGenerator::seeded(3);
        let wave = generator.band_mixture(&powers, 256.0, 2.0, 0.0).unwrap();
        assert_eq!(wave.len(), 512);

        let rel = feature_engine::relative_band_power(&wave, 256.0, ALPHA_BAND).unwrap();
        assert!(rel > 0.95);
    }

    #[test]
    fn test_invalid_noise() {
        let mut generator = SignalGenerator::seeded(0);
        assert_eq!(
            generator.band_mixture(&BandPowers::default(), 128.0, 1.0, -1.0),
            Err(SynthError::InvalidNoise(-1.0))
        );
    }

    #[test]
    fn test_normalize_zero_signal() {
        let mut signal = vec![0.0; 8];
        normalize_peak(&mut signal);
        assert!(signal.iter().all(|&v| v == 0.0));
    }

    proptest! {
        #[test]
        fn prop_band_mixture_peak_bounded(
            seed in any::<u64>(),
            delta in 0.0f64..1.0,
            theta in 0.0f64..1.0,
            alpha in 0.0f64..1.0,
            beta in 0.0f64..1.0,
            gamma in 0.0f64..1.0,
        ) {
            let powers = BandPowers { delta, theta, alpha, beta, gamma };
            let wave = SignalGenerator::seeded(seed)
                .band_mixture(&powers, 256.0, 1.0, MIXTURE_NOISE_STD)
                .unwrap();
            prop_assert!(wave.iter().all(|v| v.abs() <= 1.0));
        }
    }
}
