//! Dataset Row

use feature_engine::EegBand;
use serde::{Deserialize, Serialize};

/// Model input columns, in canonical order
pub const FEATURE_COLUMNS: [&str; 16] = [
    "delta",
    "theta",
    "alpha",
    "beta",
    "gamma",
    "delta_rel",
    "theta_rel",
    "alpha_rel",
    "beta_rel",
    "gamma_rel",
    "alpha_beta_ratio",
    "theta_beta_ratio",
    "engagement_index",
    "fatigue",
    "workload",
    "calmness",
];

/// One labelled row of the feature CSV. Columns not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EegRecord {
    // Absolute band power
    pub delta: f64,
    pub theta: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,

    // Relative band power
    pub delta_rel: f64,
    pub theta_rel: f64,
    pub alpha_rel: f64,
    pub beta_rel: f64,
    pub gamma_rel: f64,

    // Derived indices
    pub alpha_beta_ratio: f64,
    pub theta_beta_ratio: f64,
    pub engagement_index: f64,
    pub fatigue: f64,
    pub workload: f64,
    pub calmness: f64,

    /// 1 = study, 0 = phone
    pub label: i64,
}

impl EegRecord {
    /// Feature values in [`FEATURE_COLUMNS`] order
    pub fn features(&self) -> [f64; 16] {
        [
            self.delta,
            self.theta,
            self.alpha,
            self.beta,
            self.gamma,
            self.delta_rel,
            self.theta_rel,
            self.alpha_rel,
            self.beta_rel,
            self.gamma_rel,
            self.alpha_beta_ratio,
            self.theta_beta_ratio,
            self.engagement_index,
            self.fatigue,
            self.workload,
            self.calmness,
        ]
    }

    /// Absolute power of a band
    pub fn absolute(&self, band: EegBand) -> f64 {
        match band {
            EegBand::Delta => self.delta,
            EegBand::Theta => self.theta,
            EegBand::Alpha => self.alpha,
            EegBand::Beta => self.beta,
            EegBand::Gamma => self.gamma,
        }
    }

    /// Relative power of a band
    pub fn relative(&self, band: EegBand) -> f64 {
        match band {
            EegBand::Delta => self.delta_rel,
            EegBand::Theta => self.theta_rel,
            EegBand::Alpha => self.alpha_rel,
            EegBand::Beta => self.beta_rel,
            EegBand::Gamma => self.gamma_rel,
        }
    }
}
