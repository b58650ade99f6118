//! WAV Truncation

use std::io::{BufWriter, Read, Seek, Write};
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavWriter};
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;

use crate::ClipError;

/// Preview length used for the report's audio players (seconds)
pub const DEFAULT_PREVIEW_SECS: f64 = 120.0;

/// Outcome of a truncation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TruncationReport {
    pub sample_rate: u32,
    pub channels: u16,
    /// Length of the input (seconds)
    pub original_secs: f64,
    /// Length of the output (seconds)
    pub written_secs: f64,
    /// False when the input already fit and was copied unchanged
    pub truncated: bool,
}

/// Copy at most `max_duration_s` seconds of `input` into `output`.
///
/// Frames are cut at `floor(rate * max_duration_s)`; all channels of a frame
/// are kept together. Inputs that already fit are copied whole.
///
/// The copy is written to a temporary file next to `output` and renamed over
/// it once complete, so `output` may be the same path as `input`.
pub fn truncate_wav(
    input: &Path,
    output: &Path,
    max_duration_s: f64,
) -> Result<TruncationReport, ClipError> {
    if !(max_duration_s.is_finite() && max_duration_s > 0.0) {
        return Err(ClipError::InvalidDuration(max_duration_s));
    }
    if !input.exists() {
        return Err(ClipError::NotFound(input.to_path_buf()));
    }

    info!("Reading {}", input.display());
    let mut reader = WavReader::open(input)?;
    let spec = reader.spec();

    let rate = spec.sample_rate as f64;
    let original_frames = reader.duration() as usize;
    let max_frames = (rate * max_duration_s).floor() as usize;
    let frames = original_frames.min(max_frames);
    let truncated = original_frames > max_frames;

    let original_secs = original_frames as f64 / rate;
    let written_secs = frames as f64 / rate;
    if truncated {
        info!("Truncating from {:.2}s to {:.2}s", original_secs, written_secs);
    } else {
        info!("File is already short enough ({:.2}s). Copying.", original_secs);
    }

    let limit = frames * spec.channels as usize;
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    {
        let mut writer = WavWriter::new(BufWriter::new(staged.as_file_mut()), spec)?;
        match (spec.sample_format, spec.bits_per_sample) {
            (SampleFormat::Float, 32) => copy_samples::<f32, _, _>(&mut reader, &mut writer, limit)?,
            (SampleFormat::Int, 8 | 16) => copy_samples::<i16, _, _>(&mut reader, &mut writer, limit)?,
            (SampleFormat::Int, 24 | 32) => copy_samples::<i32, _, _>(&mut reader, &mut writer, limit)?,
            (format, bits) => {
                return Err(ClipError::UnsupportedFormat {
                    bits,
                    format: match format {
                        SampleFormat::Float => "float",
                        SampleFormat::Int => "int",
                    },
                })
            }
        }
        writer.finalize()?;
    }
    drop(reader);
    staged.persist(output).map_err(|e| ClipError::Io(e.error))?;

    info!("Saved truncated file to: {}", output.display());
    Ok(TruncationReport {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        original_secs,
        written_secs,
        truncated,
    })
}

fn copy_samples<S, R, W>(
    reader: &mut WavReader<R>,
    writer: &mut WavWriter<W>,
    limit: usize,
) -> Result<(), ClipError>
where
    S: hound::Sample,
    R: Read,
    W: Write + Seek,
{
    for sample in reader.samples::<S>().take(limit) {
        writer.write_sample(sample?)?;
    }
    Ok(())
}

/// Duration of a WAV file in seconds
pub fn wav_duration_secs(path: &Path) -> Result<f64, ClipError> {
    if !path.exists() {
        return Err(ClipError::NotFound(path.to_path_buf()));
    }
    let reader = WavReader::open(path)?;
    Ok(reader.duration() as f64 / reader.spec().sample_rate as f64)
}

/// A long recording and the preview cut from it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewTarget {
    pub name: &'static str,
    pub input: PathBuf,
    pub output: PathBuf,
}

/// The study and phone songs in `outputs_dir` and their preview paths
pub fn preview_targets(outputs_dir: &Path) -> Vec<PreviewTarget> {
    ["study", "phone"]
        .into_iter()
        .map(|name| PreviewTarget {
            name,
            input: outputs_dir.join(format!("{name}_song_long.wav")),
            output: outputs_dir.join(format!("{name}_song_preview.wav")),
        })
        .collect()
}
