//! EEG Focus Command-Line Front End
//!
//! Synthetic segment analysis, dataset statistics, live waves, audio previews
//! and the artifact inventory behind the focus report.

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

pub mod commands;
mod context;
mod report;
mod settings;

pub use context::AppContext;
pub use report::{emit, Report};
pub use settings::{
    AnalysisSettings, AudioSettings, LiveSettings, PathSettings, Settings, SynthSettings,
    DEFAULT_CONFIG_FILE, ENV_PREFIX,
};

/// Initialize logging
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
