//! Application Context

use std::sync::OnceLock;

use anyhow::{Context, Result};
use eeg_dataset::EegDataset;
use signal_synth::SignalGenerator;
use tracing::info;

use crate::settings::Settings;

/// State shared by every command
pub struct AppContext {
    pub settings: Settings,
    /// Random source for synthetic waves
    pub generator: SignalGenerator,
    /// Dataset, loaded on first use
    dataset: OnceLock<EegDataset>,
}

impl AppContext {
    pub fn new(settings: Settings) -> Self {
        let generator = match settings.synth.seed {
            Some(seed) => SignalGenerator::seeded(seed),
            None => SignalGenerator::from_entropy(),
        };
        Self {
            settings,
            generator,
            dataset: OnceLock::new(),
        }
    }

    /// The dataset at `paths.data_csv`, parsed once per process
    pub fn dataset(&self) -> Result<&EegDataset> {
        if let Some(dataset) = self.dataset.get() {
            return Ok(dataset);
        }

        let path = &self.settings.paths.data_csv;
        let dataset = EegDataset::load(path)
            .with_context(|| format!("failed to load dataset {}", path.display()))?;
        info!("Loaded {} rows from {}", dataset.len(), path.display());

        Ok(self.dataset.get_or_init(|| dataset))
    }
}
