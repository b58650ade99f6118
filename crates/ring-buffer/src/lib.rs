//! Rolling Sample Buffer
//!
//! Fixed-capacity ring of samples backing the live wave view. Advancing the
//! buffer drops the oldest samples and extends the newest end with a random
//! walk, which is how a static recording is animated.

mod buffer;

pub use buffer::{live_noise_std, RingBuffer, LIVE_STEP_SAMPLES};

use thiserror::Error;

/// Ring buffer errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BufferError {
    #[error("Ring buffer capacity must be at least 1")]
    ZeroCapacity,
    #[error("Expected {expected} samples, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Invalid noise standard deviation: {0}")]
    InvalidNoise(f64),
}
