//! Animated live waves seeded from the dataset's band-power profiles

use anyhow::{anyhow, Result};
use feature_engine::CognitiveState;
use ring_buffer::{live_noise_std, RingBuffer, LIVE_STEP_SAMPLES};
use serde::Serialize;
use signal_synth::{BandPowers, MIXTURE_NOISE_STD};

use crate::context::AppContext;
use crate::report::{num, table, Report};

#[derive(Debug, Serialize)]
pub struct LiveWave {
    pub state: CognitiveState,
    pub samples_written: usize,
    pub latest: f64,
    /// Newest samples, oldest first
    pub tail: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct LiveReport {
    pub sample_rate: f64,
    pub capacity: usize,
    pub frames: usize,
    pub waves: Vec<LiveWave>,
}

/// Relative band powers of the first row of each class
fn seed_profiles(ctx: &AppContext) -> Result<Vec<(CognitiveState, BandPowers)>> {
    let dataset = ctx.dataset()?;
    CognitiveState::ALL
        .iter()
        .map(|&state| {
            let record = dataset
                .first_of(state)
                .ok_or_else(|| anyhow!("dataset has no {} rows", state.name()))?;
            Ok((state, BandPowers::from_fn(|band| record.relative(band))))
        })
        .collect()
}

/// Build one wave per class and advance it by `frames` animation frames
pub fn run(ctx: &mut AppContext, frames: usize, tail: usize) -> Result<LiveReport> {
    let profiles = seed_profiles(ctx)?;
    let live = ctx.settings.live.clone();

    let mut waves = Vec::with_capacity(profiles.len());
    let mut capacity = 0;
    for (state, powers) in profiles {
        let wave = ctx.generator.band_mixture(
            &powers,
            live.sample_rate,
            live.seconds,
            MIXTURE_NOISE_STD,
        )?;
        let mut buffer = RingBuffer::new(wave)?;
        capacity = buffer.capacity();

        for _ in 0..frames {
            buffer.advance(LIVE_STEP_SAMPLES, live_noise_std(state), ctx.generator.rng())?;
        }

        let mut last = buffer.read_last(tail);
        last.reverse();
        waves.push(LiveWave {
            state,
            samples_written: buffer.total_written(),
            latest: buffer.latest(),
            tail: last,
        });
    }

    Ok(LiveReport {
        sample_rate: live.sample_rate,
        capacity,
        frames,
        waves,
    })
}

impl Report for LiveReport {
    fn render(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .waves
            .iter()
            .map(|w| {
                vec![
                    w.state.to_string(),
                    w.samples_written.to_string(),
                    num(w.latest),
                    w.tail.iter().map(|v| format!("{v:.3}")).collect::<Vec<_>>().join(" "),
                ]
            })
            .collect();
        format!(
            "{} samples @ {} Hz, advanced {} frames\n\n{}",
            self.capacity,
            self.sample_rate,
            self.frames,
            table(&["wave", "new samples", "latest", "tail"], &rows)
        )
    }
}
