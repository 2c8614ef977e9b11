// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Market sentiment, read strictly off the crossover probability at the
//! horizon. Never derived from the slope of the mean trajectory.

use serde::{Deserialize, Serialize};

use super::stats::PercentileBand;
use super::ForecastResult;

pub const BULLISH_ABOVE: f64 = 0.6;
pub const BEARISH_BELOW: f64 = 0.4;

const MIN_MEDIAN: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentLabel {
    Bullish,
    Neutral,
    Bearish,
}

impl SentimentLabel {
    pub fn from_probability(p: f64) -> Self {
        if p > BULLISH_ABOVE {
            Self::Bullish
        } else if p < BEARISH_BELOW {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentSnapshot {
    /// `2p − 1`, in [−1, 1].
    pub orbit_sentiment: f64,
    pub sentiment_label: SentimentLabel,
    /// Relative width of the terminal 68 % cone, in [0, 1].
    pub volatility_level: f64,
}

impl SentimentSnapshot {
    pub fn new(probability_orbit_cheaper: f64, terminal_orbit_cost: &PercentileBand) -> Self {
        let p = if probability_orbit_cheaper.is_finite() {
            probability_orbit_cheaper.clamp(0.0, 1.0)
        } else {
            0.5
        };
        let spread = terminal_orbit_cost.p84 - terminal_orbit_cost.p16;
        let volatility_level = (spread / (2.0 * terminal_orbit_cost.p50.max(MIN_MEDIAN))).clamp(0.0, 1.0);
        Self {
            orbit_sentiment: 2.0 * p - 1.0,
            sentiment_label: SentimentLabel::from_probability(p),
            volatility_level,
        }
    }

    pub fn from_forecast(result: &ForecastResult) -> Self {
        let terminal = result.points.last().map(|pt| pt.orbit_cost).unwrap_or_default();
        Self::new(result.probability_orbit_cheaper_by_horizon, &terminal)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
