//! Order statistics and quartile bucketing for continuous columns.
//!
//! Quantiles use the Type 4 estimator: linear interpolation of the empirical
//! CDF with order statistics indexed by `p·n` and no continuity correction.
//! Thresholds are computed once from the reference data; bucketing takes them
//! as an argument so the current data is split at exactly the same points.

use serde::{Deserialize, Serialize};

/// Number of quartile buckets produced by [`bucket_counts`].
pub const BUCKET_COUNT: usize = 4;

/// Type 4 quantile of an ascending slice. `None` for an empty slice.
pub fn type4_quantile(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let h = p.clamp(0.0, 1.0) * n as f64;
    if h < 1.0 {
        return Some(sorted[0]);
    }
    if h >= n as f64 {
        return Some(sorted[n - 1]);
    }
    let k = h.floor() as usize;
    let frac = h - k as f64;
    let lower = sorted[k - 1];
    let upper = sorted[k];
    Some(lower + frac * (upper - lower))
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by `n`).
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let variance = values
        .iter()
        .map(|value| {
            let delta = value - mean;
            delta * delta
        })
        .sum::<f64>()
        / values.len() as f64;
    Some(variance.max(0.0).sqrt())
}

/// Q1, median and Q3 of a reference column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

impl Quartiles {
    pub fn from_sorted(sorted: &[f64]) -> Option<Self> {
        Some(Self {
            q1: type4_quantile(sorted, 0.25)?,
            median: type4_quantile(sorted, 0.50)?,
            q3: type4_quantile(sorted, 0.75)?,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Bucket index for `value`: `(-inf,Q1]`, `(Q1,median]`, `(median,Q3]`, `(Q3,+inf)`.
    pub fn bucket_of(&self, value: f64) -> usize {
        if value <= self.q1 {
            0
        } else if value <= self.median {
            1
        } else if value <= self.q3 {
            2
        } else {
            3
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketCounts {
    pub counts: [usize; BUCKET_COUNT],
    pub excluded_zeros: usize,
}

/// Counts `values` per quartile bucket. With `exclude_zero` set, exact zeros
/// land in no bucket and are tallied in `excluded_zeros` instead.
pub fn bucket_counts(values: &[f64], quartiles: &Quartiles, exclude_zero: bool) -> BucketCounts {
    let mut buckets = BucketCounts::default();
    for &value in values {
        if exclude_zero && value == 0.0 {
            buckets.excluded_zeros += 1;
            continue;
        }
        buckets.counts[quartiles.bucket_of(value)] += 1;
    }
    buckets
}
