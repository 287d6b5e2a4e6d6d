//! Online statistical accumulation
//!
//! Welford's method keeps mean and variance numerically stable over long
//! sessions with O(1) memory, unlike retaining every sample and recomputing.

use crate::report::EarSummary;
use serde::{Deserialize, Serialize};

/// Running mean/std/min/max accumulator
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one sample
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        if self.count == 1 {
            self.mean = value;
            self.m2 = 0.0;
            self.min = value;
            self.max = value;
            return;
        }

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;

        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Population standard deviation
    pub fn std_dev(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.m2 / self.count as f64).max(0.0).sqrt()
        }
    }

    pub fn min(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.min
        }
    }

    pub fn max(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.max
        }
    }

    /// Snapshot for the session report
    pub fn summary(&self) -> EarSummary {
        EarSummary {
            mean: self.mean(),
            std: self.std_dev(),
            min: self.min(),
            max: self.max(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Batch oracle matching the naive two-pass computation
    fn batch(values: &[f64]) -> (f64, f64, f64, f64) {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let min = values.iter().cloned().fold(f64::MAX, f64::min);
        let max = values.iter().cloned().fold(f64::MIN, f64::max);
        (mean, variance.sqrt(), min, max)
    }

    #[test]
    fn test_matches_batch_on_simple_sequence() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let mut stats = RunningStats::new();
        for &v in &values {
            stats.push(v);
        }
        let (mean, std, min, max) = batch(&values);
        assert!((stats.mean() - mean).abs() < 1e-12);
        assert!((stats.std_dev() - std).abs() < 1e-12);
        assert!((stats.min() - min).abs() < 1e-12);
        assert!((stats.max() - max).abs() < 1e-12);
        // Known dataset: std dev is exactly 2.0
        assert!((stats.std_dev() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_matches_batch_on_pseudo_random_stream() {
        // Deterministic LCG stream, EAR-like magnitudes
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        let mut values = Vec::with_capacity(5000);
        for _ in 0..5000 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let unit = (seed >> 11) as f64 / (1u64 << 53) as f64;
            values.push(0.05 + unit * 0.35);
        }

        let mut stats = RunningStats::new();
        for &v in &values {
            stats.push(v);
        }

        let (mean, std, min, max) = batch(&values);
        assert!((stats.mean() - mean).abs() < 1e-6);
        assert!((stats.std_dev() - std).abs() < 1e-6);
        assert!((stats.min() - min).abs() < 1e-12);
        assert!((stats.max() - max).abs() < 1e-12);
    }

    #[test]
    fn test_single_sample() {
        let mut stats = RunningStats::new();
        stats.push(0.3);
        assert_eq!(stats.count(), 1);
        assert!((stats.mean() - 0.3).abs() < 1e-12);
        assert!(stats.std_dev().abs() < 1e-12);
        assert!((stats.min() - 0.3).abs() < 1e-12);
        assert!((stats.max() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_empty_accumulator() {
        let stats = RunningStats::new();
        assert!(stats.is_empty());
        assert_eq!(stats.mean(), 0.0);
        assert_eq!(stats.std_dev(), 0.0);
    }

    #[test]
    fn test_constant_stream_has_zero_std() {
        let mut stats = RunningStats::new();
        for _ in 0..1000 {
            stats.push(0.27);
        }
        assert!(stats.std_dev() < 1e-12);
        assert!((stats.mean() - 0.27).abs() < 1e-12);
    }
}
