//! Layered Settings
//!
//! Defaults, then an optional TOML file, then `EEG_FOCUS__SECTION__KEY`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use feature_engine::{Band, WindowingPlan};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default settings file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "eeg-focus.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "EEG_FOCUS";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub analysis: AnalysisSettings,
    pub synth: SynthSettings,
    pub live: LiveSettings,
    pub audio: AudioSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Labelled band-power CSV
    pub data_csv: PathBuf,
    /// Directory holding rendered charts and audio
    pub outputs_dir: PathBuf,
    /// Study vs phone behavioural survey export
    pub survey_csv: PathBuf,
    /// Per-model evaluation metrics written by training
    pub model_comparison_csv: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            data_csv: PathBuf::from("data/realistic_combined_eeg_10000_enhanced.csv"),
            outputs_dir: PathBuf::from("outputs"),
            survey_csv: PathBuf::from("data/Study vs Phone Usage Behavioral Survey.csv"),
            model_comparison_csv: PathBuf::from("models/model_comparison.csv"),
        }
    }
}

/// Synthetic segment analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub sample_rate: f64,
    pub window_seconds: f64,
    /// Windows in the multi-window run
    pub windows: usize,
    pub band_low: f64,
    pub band_high: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            sample_rate: 128.0,
            window_seconds: 1.0,
            windows: 10,
            band_low: 8.0,
            band_high: 13.0,
        }
    }
}

impl AnalysisSettings {
    pub fn band(&self) -> Band {
        Band::new(self.band_low, self.band_high)
    }

    /// Samples per analysis window (at least 1)
    pub fn window_size(&self) -> usize {
        ((self.sample_rate * self.window_seconds).round() as usize).max(1)
    }

    /// Back-to-back windows of [`Self::window_size`]
    pub fn plan(&self) -> WindowingPlan {
        WindowingPlan::non_overlapping(self.window_size())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthSettings {
    /// Fixed seed for reproducible waves; entropy when unset
    pub seed: Option<u64>,
}

/// Live wave view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveSettings {
    pub sample_rate: f64,
    pub seconds: f64,
}

impl Default for LiveSettings {
    fn default() -> Self {
        Self {
            sample_rate: 256.0,
            seconds: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub preview_seconds: f64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            preview_seconds: audio_clip::DEFAULT_PREVIEW_SECS,
        }
    }
}

impl Settings {
    /// Load settings. An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (file, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        debug!("Loading settings from {} (required={})", file.display(), required);

        Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(file.as_path()).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read settings from {}", file.display()))?
            .try_deserialize()
            .context("invalid settings")
    }
}
