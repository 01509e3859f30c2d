//! Injectable randomness for the simulation
//!
//! Every random draw (spawn position, speed, fire jitter, particle spray, pickup
//! rolls) goes through `RandomSource`, so a session is exactly reproducible from
//! its seed, and tests can script the draws outright.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A source of uniform draws in `[0, 1)`
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`
    fn next_unit(&mut self) -> f32;

    /// Uniform value in `[min, min + span)`
    fn next_in(&mut self, min: f32, span: f32) -> f32 {
        min + self.next_unit() * span
    }

    /// Uniform index in `0..len` (`len` must be non-zero)
    fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "next_index on empty range");
        ((self.next_unit() * len as f32) as usize).min(len - 1)
    }
}

impl RandomSource for Pcg32 {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Seeded PCG generator used by live sessions
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed script of draws, cycling when it runs out
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRng {
    /// Cycle through `values` (each clamped into `[0, 1)`)
    pub fn new(values: &[f32]) -> Self {
        let values = if values.is_empty() {
            vec![0.0]
        } else {
            values
                .iter()
                .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
                .collect()
        };
        Self { values, cursor: 0 }
    }

    /// Always return the same value
    pub fn constant(value: f32) -> Self {
        Self::new(&[value])
    }

    /// Number of draws taken so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRng {
    fn next_unit(&mut self) -> f32 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
