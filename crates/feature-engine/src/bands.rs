//! Frequency Band Definitions

use crate::FeatureError;
use serde::{Deserialize, Serialize};

/// Tolerance used when deciding whether a bin frequency sits on a band edge.
const FREQ_EPSILON: f64 = 1e-9;

/// Alpha band (8-13 Hz), the default analysis band
pub const ALPHA_BAND: Band = Band::new(8.0, 13.0);

/// Closed frequency interval `[low, high]` in Hz
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Lower edge (Hz, inclusive)
    pub low: f64,
    /// Upper edge (Hz, inclusive)
    pub high: f64,
}

impl Band {
    /// Create a band without validation
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Band covering every representable frequency, `[0, fs/2]`
    pub fn full(sample_rate: f64) -> Self {
        Self::new(0.0, sample_rate / 2.0)
    }

    /// Check `0 <= low <= high <= fs/2`
    pub fn validate(&self, sample_rate: f64) -> Result<(), FeatureError> {
        validate_sample_rate(sample_rate)?;
        let nyquist = sample_rate / 2.0;
        // Negated comparisons so NaN edges are rejected too.
        if !(self.low >= 0.0 && self.low <= self.high && self.high <= nyquist) {
            return Err(FeatureError::InvalidBand {
                low: self.low,
                high: self.high,
                nyquist,
            });
        }
        Ok(())
    }

    /// Whether `freq` (Hz) lies inside the band, edges included
    pub fn contains(&self, freq: f64) -> bool {
        freq + FREQ_EPSILON >= self.low && freq - FREQ_EPSILON <= self.high
    }
}

pub(crate) fn validate_sample_rate(sample_rate: f64) -> Result<(), FeatureError> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(())
    } else {
        Err(FeatureError::InvalidSampleRate(sample_rate))
    }
}

/// Canonical EEG rhythms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EegBand {
    Delta,
    Theta,
    Alpha,
    Beta,
    Gamma,
}

impl EegBand {
    /// All bands, slowest first
    pub const ALL: [EegBand; 5] = [
        EegBand::Delta,
        EegBand::Theta,
        EegBand::Alpha,
        EegBand::Beta,
        EegBand::Gamma,
    ];

    /// Lowercase name, matching the dataset column prefix
    pub fn name(&self) -> &'static str {
        match self {
            EegBand::Delta => "delta",
            EegBand::Theta => "theta",
            EegBand::Alpha => "alpha",
            EegBand::Beta => "beta",
            EegBand::Gamma => "gamma",
        }
    }

    /// Nominal frequency range
    pub fn range(&self) -> Band {
        match self {
            EegBand::Delta => Band::new(0.5, 4.0),
            EegBand::Theta => Band::new(4.0, 8.0),
            EegBand::Alpha => ALPHA_BAND,
            EegBand::Beta => Band::new(13.0, 30.0),
            EegBand::Gamma => Band::new(30.0, 45.0),
        }
    }

    /// Representative carrier frequency used when resynthesizing a waveform
    pub fn carrier_hz(&self) -> f64 {
        match self {
            EegBand::Delta => 2.0,
            EegBand::Theta => 6.0,
            EegBand::Alpha => 10.0,
            EegBand::Beta => 20.0,
            EegBand::Gamma => 40.0,
        }
    }
}

impl std::fmt::Display for EegBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for EegBand {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EegBand::ALL
            .iter()
            .copied()
            .find(|b| b.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FeatureError::UnknownBand(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bands() {
        assert!(ALPHA_BAND.validate(128.0).is_ok());
        assert!(Band::full(128.0).validate(128.0).is_ok());
        assert!(Band::new(10.0, 10.0).validate(128.0).is_ok());
    }

    #[test]
    fn test_invalid_bands() {
        assert!(matches!(
            Band::new(13.0, 8.0).validate(128.0),
            Err(FeatureError::InvalidBand { .. })
        ));
        assert!(Band::new(-1.0, 8.0).validate(128.0).is_err());
        assert!(Band::new(8.0, 65.0).validate(128.0).is_err());
        assert!(Band::new(f64::NAN, 8.0).validate(128.0).is_err());
    }

    #[test]
    fn test_invalid_sample_rate() {
        assert_eq!(
            ALPHA_BAND.validate(0.0),
            Err(FeatureError::InvalidSampleRate(0.0))
        );
        assert!(ALPHA_BAND.validate(-128.0).is_err());
        assert!(ALPHA_BAND.validate(f64::INFINITY).is_err());
    }

    #[test]
    fn test_contains_edges() {
        assert!(ALPHA_BAND.contains(8.0));
        assert!(ALPHA_BAND.contains(13.0));
        assert!(!ALPHA_BAND.contains(7.9));
        assert!(!ALPHA_BAND.contains(13.1));
    }

    #[test]
    fn test_eeg_band_lookup() {
        assert_eq!("Alpha".parse::<EegBand>().unwrap(), EegBand::Alpha);
        assert_eq!(
            "mu".parse::<EegBand>(),
            Err(FeatureError::UnknownBand("mu".to_string()))
        );
        for band in EegBand::ALL {
            assert!(band.range().contains(band.carrier_hz()));
        }
    }
}
