//! Audio Preview Clips
//!
//! Cuts long sonified recordings down to a fixed-length preview while keeping
//! the original WAV format (rate, channels, sample format).

mod truncate;

pub use truncate::{
    preview_targets, truncate_wav, wav_duration_secs, PreviewTarget, TruncationReport,
    DEFAULT_PREVIEW_SECS,
};

use std::path::PathBuf;
use thiserror::Error;

/// Audio clip errors
#[derive(Debug, Error)]
pub enum ClipError {
    #[error("Input file not found: {0}")]
    NotFound(PathBuf),
    #[error("Invalid preview duration: {0} s")]
    InvalidDuration(f64),
    #[error("Unsupported WAV format: {bits}-bit {format}")]
    UnsupportedFormat { bits: u16, format: &'static str },
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
