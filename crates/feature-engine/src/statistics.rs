//! Time-Domain Statistics

use crate::FeatureError;
use serde::{Deserialize, Serialize};

/// Time-domain summary of a signal window
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeDomainFeatures {
    /// Arithmetic mean
    pub mean: f64,
    /// Population variance (divides by N)
    pub variance: f64,
    /// Sum of squared samples
    pub energy: f64,
}

impl TimeDomainFeatures {
    /// Population standard deviation
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// Compute mean, population variance and energy of a window.
///
/// An empty window is rejected rather than producing `0/0`. Samples must be
/// finite and small enough that their squares fit in an `f64` (about 1e150).
pub fn time_domain_features(window: &[f64]) -> Result<TimeDomainFeatures, FeatureError> {
    if window.is_empty() {
        return Err(FeatureError::EmptyWindow);
    }

    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;

    let mut m2 = 0.0;
    let mut energy = 0.0;
    for &v in window {
        let d = v - mean;
        m2 += d * d;
        energy += v * v;
    }

    if !(energy.is_finite() && m2.is_finite()) {
        return Err(FeatureError::NonFiniteSignal);
    }

    Ok(TimeDomainFeatures {
        mean,
        variance: m2 / n,
        energy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternating_window() {
        let stats = time_domain_features(&[1.0, -1.0, 1.0, -1.0]).unwrap();
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.variance, 1.0);
        assert_eq!(stats.energy, 4.0);
    }

    #[test]
    fn test_std_dev_computation() {
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = time_domain_features(&values).unwrap();
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.std_dev() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_window() {
        for n in [1, 2, 17, 128] {
            let stats = time_domain_features(&vec![0.0; n]).unwrap();
            assert_eq!(stats, TimeDomainFeatures::default());
        }
    }

    #[test]
    fn test_single_sample() {
        let stats = time_domain_features(&[3.0]).unwrap();
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.energy, 9.0);
    }

    #[test]
    fn test_overflowing_amplitude_rejected() {
        assert_eq!(
            time_domain_features(&[1e160, -1e160, 1e160]),
            Err(FeatureError::NonFiniteSignal)
        );
        assert_eq!(
            time_domain_features(&[1.0, f64::NAN]),
            Err(FeatureError::NonFiniteSignal)
        );
    }

    #[test]
    fn test_empty_window() {
        assert_eq!(time_domain_features(&[]), Err(FeatureError::EmptyWindow));
    }
}
