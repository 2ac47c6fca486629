//! Weighted selection
//!
//! A cumulative table plus a single uniform draw. Linear scan is plenty for a
//! wheel that never holds more than a handful of prizes.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::prizes::PrizeEntry;
use crate::error::{Result, WheelError};

/// Uniform sample source in [0, 1)
pub trait RandomSource {
    fn sample(&mut self) -> f64;
}

/// Reproducible PCG32 stream
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn sample(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed list of samples, wrapping around at the end
#[derive(Debug, Clone)]
pub struct ReplayRandom {
    samples: Vec<f64>,
    next: usize,
}

impl ReplayRandom {
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples, next: 0 }
    }
}

impl RandomSource for ReplayRandom {
    fn sample(&mut self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let s = self.samples[self.next % self.samples.len()];
        self.next += 1;
        s
    }
}

/// Running sum of probabilities, same order as `entries`
pub fn cumulative_table(entries: &[PrizeEntry]) -> Vec<f64> {
    entries
        .iter()
        .scan(0.0, |sum, entry| {
            *sum += entry.probability;
            Some(*sum)
        })
        .collect()
}

/// Smallest index whose threshold exceeds `sample`
///
/// A sample at or past the last threshold can only come from rounding, so it
/// lands on the last prize. Returns 0 for an empty table.
pub fn select_index(table: &[f64], sample: f64) -> usize {
    table
        .iter()
        .position(|&threshold| sample < threshold)
        .unwrap_or_else(|| table.len().saturating_sub(1))
}

/// Pin entry 0 to `fixed_first` and split the rest by powers of two
///
/// Entry `i` gets raw weight `2^i`, so the prize next to the jackpot is the
/// rarest of the rest and the farthest one the most common.
pub fn auto_balance_weights(entries: &[PrizeEntry], fixed_first: f64) -> Result<Vec<f64>> {
    if entries.len() < 2 {
        return Err(WheelError::Rebalance(format!(
            "need at least 2 prizes, have {}",
            entries.len()
        )));
    }
    if !(fixed_first > 0.0 && fixed_first < 1.0) {
        return Err(WheelError::Rebalance(format!(
            "fixed probability {fixed_first} outside (0, 1)"
        )));
    }

    let weights: Vec<f64> = (1..entries.len()).map(|i| 2f64.powi(i as i32)).collect();
    let total: f64 = weights.iter().sum();
    let remainder = 1.0 - fixed_first;

    let mut probabilities = Vec::with_capacity(entries.len());
    probabilities.push(fixed_first);
    probabilities.extend(weights.iter().map(|w| remainder * w / total));
    Ok(probabilities)
}
