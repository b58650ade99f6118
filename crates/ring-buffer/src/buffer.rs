//! Ring Buffer Implementation

use feature_engine::CognitiveState;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::BufferError;

/// Samples appended per animation frame
pub const LIVE_STEP_SAMPLES: usize = 3;

/// Random-walk step size per state: distracted waves wander three times as far
pub fn live_noise_std(state: CognitiveState) -> f64 {
    match state {
        CognitiveState::Study => 0.01,
        CognitiveState::Phone => 0.03,
    }
}

/// Always-full ring of samples.
///
/// `head` indexes the oldest sample; the newest sits just before it.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    /// Pre-allocated storage
    storage: Box<[f64]>,
    /// Oldest sample position
    head: usize,
    /// Samples written since creation or last reset
    total_written: usize,
}

impl RingBuffer {
    /// Create a buffer holding `samples`; its capacity is their count
    pub fn new(samples: Vec<f64>) -> Result<Self, BufferError> {
        if samples.is_empty() {
            return Err(BufferError::ZeroCapacity);
        }
        Ok(Self {
            storage: samples.into_boxed_slice(),
            head: 0,
            total_written: 0,
        })
    }

    /// Number of samples held (always equal to capacity)
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Never true; a buffer is created full
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Buffer capacity
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Most recent sample
    pub fn latest(&self) -> f64 {
        let cap = self.capacity();
        self.storage[(self.head + cap - 1) % cap]
    }

    /// Append a sample, overwriting the oldest
    pub fn push(&mut self, sample: f64) {
        self.storage[self.head] = sample;
        self.head = (self.head + 1) % self.capacity();
        self.total_written += 1;
    }

    /// Advance by `steps` samples, each one the previous newest sample plus
    /// `N(0, noise_std)`.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        steps: usize,
        noise_std: f64,
        rng: &mut R,
    ) -> Result<(), BufferError> {
        if !noise_std.is_finite() {
            return Err(BufferError::InvalidNoise(noise_std));
        }
        let noise =
            Normal::new(0.0, noise_std).map_err(|_| BufferError::InvalidNoise(noise_std))?;

        for _ in 0..steps {
            let next = self.latest() + noise.sample(rng);
            self.push(next);
        }
        debug!("Advanced ring buffer by {} samples (sigma={})", steps, noise_std);
        Ok(())
    }

    /// Read the last N samples (most recent first)
    pub fn read_last(&self, count: usize) -> Vec<f64> {
        let cap = self.capacity();
        let count = count.min(cap);
        (1..=count)
            .map(|i| self.storage[(self.head + cap - i) % cap])
            .collect()
    }

    /// All samples, oldest first
    pub fn to_vec(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.capacity());
        out.extend_from_slice(&self.storage[self.head..]);
        out.extend_from_slice(&self.storage[..self.head]);
        out
    }

    /// Replace the contents; the length must match the capacity
    pub fn reset(&mut self, samples: &[f64]) -> Result<(), BufferError> {
        if samples.len() != self.capacity() {
            return Err(BufferError::LengthMismatch {
                expected: self.capacity(),
                actual: samples.len(),
            });
        }
        self.storage.copy_from_slice(samples);
        self.head = 0;
        self.total_written = 0;
        Ok(())
    }

    /// Get total samples written (for statistics)
    pub fn total_written(&self) -> usize {
        self.total_written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_push_and_read() {
        let mut buffer = RingBuffer::new(vec![0.0; 5]).unwrap();

        for i in 1..=3 {
            buffer.push(i as f64);
        }

        assert_eq!(buffer.len(), 5);
        assert_eq!(buffer.latest(), 3.0);
        assert_eq!(buffer.read_last(3), vec![3.0, 2.0, 1.0]);
        assert_eq!(buffer.to_vec(), vec![0.0, 0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_overwrite_oldest() {
        let mut buffer = RingBuffer::new(vec![0.0, 1.0, 2.0]).unwrap();

        for i in 3..10 {
            buffer.push(i as f64);
        }

        assert_eq!(buffer.to_vec(), vec![7.0, 8.0, 9.0]);
        assert_eq!(buffer.total_written(), 7);
    }

    #[test]
    fn test_zero_noise_advance_repeats_last() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut buffer = RingBuffer::new(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        buffer.advance(2, 0.0, &mut rng).unwrap();
        assert_eq!(buffer.to_vec(), vec![3.0, 4.0, 4.0, 4.0]);
    }

    #[test]
    fn test_reset() {
        let mut buffer = RingBuffer::new(vec![0.0; 3]).unwrap();
        buffer.push(5.0);
        buffer.reset(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(buffer.to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(buffer.total_written(), 0);
        assert_eq!(
            buffer.reset(&[1.0]),
            Err(BufferError::LengthMismatch { expected: 3, actual: 1 })
        );
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(RingBuffer::new(vec![]).unwrap_err(), BufferError::ZeroCapacity);

        let mut rng = StdRng::seed_from_u64(1);
        let mut buffer = RingBuffer::new(vec![0.0; 3]).unwrap();
        assert_eq!(
            buffer.advance(1, -0.5, &mut rng),
            Err(BufferError::InvalidNoise(-0.5))
        );
    }

    #[test]
    fn test_live_noise_levels() {
        assert!(live_noise_std(CognitiveState::Phone) > live_noise_std(CognitiveState::Study));
    }

    proptest! {
        #[test]
        fn prop_advance_shifts_left(
            samples in prop::collection::vec(-1.0f64..1.0, 4..64),
            steps in 0usize..4,
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut buffer = RingBuffer::new(samples.clone()).unwrap();
            buffer.advance(steps, 0.01, &mut rng).unwrap();

            let after = buffer.to_vec();
            prop_assert_eq!(after.len(), samples.len());
            prop_assert_eq!(&after[..samples.len() - steps], &samples[steps..]);
        }
    }
}
