// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Percentile bands over trial samples.

use serde::{Deserialize, Serialize};

/// Linear-interpolated percentile of sorted samples, `p` in [0, 100].
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = (rank.ceil() as usize).min(n - 1);
            let frac = rank - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * frac
        }
    }
}

/// Mean plus the 95 % and 68 % cones around the median.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PercentileBand {
    pub mean: f64,
    pub p2_5: f64,
    pub p16: f64,
    pub p50: f64,
    pub p84: f64,
    pub p97_5: f64,
}

impl PercentileBand {
    /// Sorts `samples` in place.
    pub fn from_samples(samples: &mut [f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        samples.sort_by(|a, b| a.total_cmp(b));
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        Self {
            mean,
            p2_5: percentile(samples, 2.5),
            p16: percentile(samples, 16.0),
            p50: percentile(samples, 50.0),
            p84: percentile(samples, 84.0),
            p97_5: percentile(samples, 97.5),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
