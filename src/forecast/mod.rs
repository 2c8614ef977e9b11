// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Monte Carlo forecast -- probability-weighted cost cones for orbit vs ground.
//!
//! `n_sims` independent trials each roll a cloned [`WorldState`] forward
//! `horizon_years` steps under a [`Policy`]. Trial `i` draws from stream `i`
//! of the master seed, trials run in parallel on native targets, and the
//! per-year aggregation starts only once every trial has finished. Output is
//! identical for any thread count.

pub mod policy;
pub mod rng;
pub mod sentiment;
pub mod stats;
pub mod world;

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{check_year_range, ConfigError, MAX_HORIZON_YEARS};

pub use policy::{CostSeeking, Policy, PolicyKind, Proportional};
pub use rng::{gaussian, ChaChaStreams, RngStreams};
pub use sentiment::{SentimentLabel, SentimentSnapshot};
pub use stats::{percentile, PercentileBand};
pub use world::{step_world, DeploymentAction, ForecastParams, WorldState};

/// Largest trial count accepted by `validate()`.
pub const MAX_SIMS: usize = 200_000;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub n_sims: usize,
    pub horizon_years: u32,
    pub seed: u64,
    pub initial_state: WorldState,
    pub params: ForecastParams,
    pub policy: PolicyKind,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            n_sims: 1_000,
            horizon_years: 25,
            seed: 42,
            initial_state: WorldState::default(),
            params: ForecastParams::default(),
            policy: PolicyKind::default(),
        }
    }
}

impl ForecastConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_sims == 0 || self.n_sims > MAX_SIMS {
            return Err(ConfigError::InvalidForecast(format!(
                "n_sims must be between 1 and {}, got {}",
                MAX_SIMS, self.n_sims
            )));
        }
        if self.horizon_years == 0 || self.horizon_years > MAX_HORIZON_YEARS {
            return Err(ConfigError::InvalidHorizon {
                got: self.horizon_years,
                max: MAX_HORIZON_YEARS,
            });
        }
        check_year_range(self.initial_state.year, self.horizon_years)?;
        self.initial_state.validate()?;
        self.params.validate()
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// All-in cost cones for one year, USD per PFLOP-hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub year: i32,
    pub orbit_cost: PercentileBand,
    pub ground_cost: PercentileBand,
    /// Share of trials with orbit cheaper than ground in this year.
    pub probability_orbit_cheaper: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// The initial year followed by one point per simulated year.
    pub points: Vec<ForecastPoint>,
    pub probability_orbit_cheaper_by_horizon: f64,
    pub n_sims: usize,
    pub seed: u64,
}

impl ForecastResult {
    pub fn sentiment(&self) -> SentimentSnapshot {
        SentimentSnapshot::from_forecast(self)
    }

    pub fn point_for_year(&self, year: i32) -> Option<&ForecastPoint> {
        self.points.iter().find(|p| p.year == year)
    }
}

/// Forecast plus the sentiment derived from it, as handed to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub forecast: ForecastResult,
    pub sentiment: SentimentSnapshot,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// One trial's all-in (orbit, ground) cost per year, initial year included.
type Trajectory = Vec<(f64, f64)>;

pub struct MonteCarloEngine<'a, P: Policy, S: RngStreams> {
    config: &'a ForecastConfig,
    policy: &'a P,
    streams: S,
}

impl<'a, P: Policy, S: RngStreams> MonteCarloEngine<'a, P, S> {
    pub fn new(config: &'a ForecastConfig, policy: &'a P, streams: S) -> Self {
        Self { config, policy, streams }
    }

    fn run_trial(&self, trial: usize) -> Trajectory {
        let params = &self.config.params;
        let mut rng = self.streams.stream(trial as u64);
        let mut state = self.config.initial_state.clone();
        let mut path = Vec::with_capacity(self.config.horizon_years as usize + 1);
        path.push((state.all_in_orbit_cost(params), state.all_in_ground_cost(params)));
        for _ in 0..self.config.horizon_years {
            let action = self.policy.decide(&state);
            step_world(&mut state, &action, params, &mut rng);
            path.push((state.all_in_orbit_cost(params), state.all_in_ground_cost(params)));
        }
        path
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn run_trials(&self) -> Vec<Trajectory> {
        (0..self.config.n_sims)
            .into_par_iter()
            .map(|i| self.run_trial(i))
            .collect()
    }

    #[cfg(target_arch = "wasm32")]
    fn run_trials(&self) -> Vec<Trajectory> {
        (0..self.config.n_sims).map(|i| self.run_trial(i)).collect()
    }

    pub fn run(&self) -> ForecastResult {
        let cfg = self.config;
        debug!(n_sims = cfg.n_sims, horizon = cfg.horizon_years, seed = cfg.seed, "running forecast");

        let trials = self.run_trials();
        let steps = cfg.horizon_years as usize + 1;
        let n = trials.len();

        let mut points = Vec::with_capacity(steps);
        let mut orbit = Vec::with_capacity(n);
        let mut ground = Vec::with_capacity(n);
        for step in 0..steps {
            orbit.clear();
            ground.clear();
            let mut cheaper = 0usize;
            for path in &trials {
                let (o, g) = path[step];
                if o < g {
                    cheaper += 1;
                }
                orbit.push(o);
                ground.push(g);
            }
            points.push(ForecastPoint {
                year: cfg.initial_state.year + step as i32,
                orbit_cost: PercentileBand::from_samples(&mut orbit),
                ground_cost: PercentileBand::from_samples(&mut ground),
                probability_orbit_cheaper: cheaper as f64 / n.max(1) as f64,
            });
        }

        let probability_orbit_cheaper_by_horizon =
            points.last().map(|p| p.probability_orbit_cheaper).unwrap_or(0.0);
        info!(
            n_sims = n,
            seed = cfg.seed,
            probability = probability_orbit_cheaper_by_horizon,
            "forecast complete"
        );

        ForecastResult {
            points,
            probability_orbit_cheaper_by_horizon,
            n_sims: n,
            seed: cfg.seed,
        }
    }
}

/// Validate `config` and run it with its own policy and seed.
pub fn run_forecast(config: &ForecastConfig) -> Result<ForecastResult, ConfigError> {
    config.validate()?;
    let engine = MonteCarloEngine::new(config, &config.policy, ChaChaStreams::new(config.seed));
    Ok(engine.run())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> ForecastConfig {
        ForecastConfig { n_sims: 200, horizon_years: 10, ..ForecastConfig::default() }
    }

    #[test]
    fn points_include_initial_year() {
        let result = run_forecast(&small()).expect("test: valid forecast");
        assert_eq!(result.points.len(), 11);
        assert_eq!(result.points[0].year, 2025);
        assert_eq!(result.points[10].year, 2035);
        // Every trial starts from the same state.
        let first = &result.points[0];
        assert_eq!(first.orbit_cost.p2_5, first.orbit_cost.p97_5);
        assert_eq!(first.probability_orbit_cheaper, 0.0);
    }

    #[test]
    fn horizon_probability_is_last_point() {
        let result = run_forecast(&small()).expect("test: valid forecast");
        let last = result.points.last().expect("test: has points");
        assert_eq!(result.probability_orbit_cheaper_by_horizon, last.probability_orbit_cheaper);
        assert!((0.0..=1.0).contains(&result.probability_orbit_cheaper_by_horizon));
    }

    #[test]
    fn custom_policy_and_streams() {
        let config = small();
        let hold = |_: &WorldState| DeploymentAction::default();
        let engine = MonteCarloEngine::new(&config, &hold, ChaChaStreams::new(1));
        let result = engine.run();
        assert_eq!(result.n_sims, 200);
        assert_eq!(result.points.len(), 11);
    }

    #[test]
    fn rejects_zero_sims() {
        let config = ForecastConfig { n_sims: 0, ..ForecastConfig::default() };
        assert!(matches!(run_forecast(&config), Err(ConfigError::InvalidForecast(_))));
    }

    #[test]
    fn rejects_initial_year_that_overflows() {
        let config = ForecastConfig {
            initial_state: WorldState { year: i32::MAX - 3, ..WorldState::default() },
            ..small()
        };
        assert!(matches!(
            run_forecast(&config),
            Err(ConfigError::InvalidStartYear { horizon: 10, .. })
        ));

        let edge = ForecastConfig {
            initial_state: WorldState { year: i32::MAX - 10, ..WorldState::default() },
            ..small()
        };
        let result = run_forecast(&edge).expect("test: last representable horizon year");
        assert_eq!(result.points.last().map(|p| p.year), Some(i32::MAX));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config = ForecastConfig::from_json(r#"{ "n_sims": 64, "seed": 9, "policy": { "kind": "COST_SEEKING" } }"#)
            .expect("test: parses");
        assert_eq!(config.n_sims, 64);
        assert_eq!(config.horizon_years, 25);
        assert!(matches!(config.policy, PolicyKind::CostSeeking(_)));
    }
}
