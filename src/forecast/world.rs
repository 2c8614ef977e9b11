// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! World-cost model for the forecast -- one macro snapshot per trial.
//!
//! Each step adds capacity, applies learning per capacity doubling, then
//! draws five shocks in a fixed order:
//!
//! ```text
//! launch  → orbit cost (pass-through share)
//! energy  → ground cost (pass-through share)
//! carbon  → carbon price random walk, floored at 0
//! orbit   → orbit unit cost, mean-preserving log-normal
//! ground  → ground unit cost, mean-preserving log-normal
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rng::{gaussian, lognormal_shock};
use crate::config::ConfigError;
use crate::types::ScenarioMode;

const MIN_CAPACITY: f64 = 1e-9;

// ---------------------------------------------------------------------------
// WorldState
// ---------------------------------------------------------------------------

/// Costs in USD per PFLOP-hour, capacities in PFLOPs, carbon price in USD/tCO2,
/// energy price in USD/kWh, launch cost in USD/kg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldState {
    pub year: i32,
    pub orbit_unit_cost: f64,
    pub ground_unit_cost: f64,
    pub orbit_capacity: f64,
    pub ground_capacity: f64,
    pub carbon_price: f64,
    pub energy_price: f64,
    pub launch_cost: f64,
}

impl Default for WorldState {
    fn default() -> Self {
        Self {
            year: 2025,
            orbit_unit_cost: 6.0,
            ground_unit_cost: 2.0,
            orbit_capacity: 50.0,
            ground_capacity: 20_000.0,
            carbon_price: 90.0,
            energy_price: 0.08,
            launch_cost: 1_500.0,
        }
    }
}

impl WorldState {
    /// Orbital unit cost including the carbon price.
    pub fn all_in_orbit_cost(&self, params: &ForecastParams) -> f64 {
        self.orbit_unit_cost + self.carbon_price * params.orbit_carbon_intensity
    }

    pub fn all_in_ground_cost(&self, params: &ForecastParams) -> f64 {
        self.ground_unit_cost + self.carbon_price * params.ground_carbon_intensity
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (value, name) in [
            (self.orbit_unit_cost, "orbit_unit_cost"),
            (self.ground_unit_cost, "ground_unit_cost"),
            (self.orbit_capacity, "orbit_capacity"),
            (self.ground_capacity, "ground_capacity"),
            (self.energy_price, "energy_price"),
            (self.launch_cost, "launch_cost"),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidForecast(format!(
                    "initial {} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !(self.carbon_price.is_finite() && self.carbon_price >= 0.0) {
            return Err(ConfigError::InvalidForecast(format!(
                "initial carbon_price must be non-negative, got {}",
                self.carbon_price
            )));
        }
        Ok(())
    }
}

/// Capacity a policy commits for the coming year, PFLOPs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DeploymentAction {
    pub orbit_capacity_added: f64,
    pub ground_capacity_added: f64,
}

// ---------------------------------------------------------------------------
// ForecastParams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastParams {
    /// Cost reduction per doubling of orbital capacity.
    pub orbit_learning_rate: f64,
    pub ground_learning_rate: f64,

    /// Expected annual launch cost decline.
    pub launch_cost_decline: f64,
    pub launch_volatility: f64,
    /// Share of a launch cost move that reaches orbital unit cost.
    pub launch_pass_through: f64,

    pub energy_volatility: f64,
    /// Share of an energy price move that reaches ground unit cost.
    pub energy_pass_through: f64,

    /// USD/tCO2 per year.
    pub carbon_drift: f64,
    pub carbon_volatility: f64,

    pub orbit_volatility: f64,
    pub ground_volatility: f64,

    /// tCO2 per PFLOP-hour.
    pub orbit_carbon_intensity: f64,
    pub ground_carbon_intensity: f64,
}

impl Default for ForecastParams {
    fn default() -> Self {
        Self {
            orbit_learning_rate: 0.15,
            ground_learning_rate: 0.04,
            launch_cost_decline: 0.05,
            launch_volatility: 0.10,
            launch_pass_through: 0.30,
            energy_volatility: 0.08,
            energy_pass_through: 0.35,
            carbon_drift: 5.0,
            carbon_volatility: 8.0,
            orbit_volatility: 0.12,
            ground_volatility: 0.05,
            orbit_carbon_intensity: 0.0002,
            ground_carbon_intensity: 0.0004,
        }
    }
}

impl ForecastParams {
    /// Defaults shifted to match a deterministic scenario's launch market and
    /// learning pace.
    pub fn for_scenario(scenario: ScenarioMode) -> Self {
        let base = Self::default();
        match scenario {
            ScenarioMode::Baseline => base,
            ScenarioMode::OrbitalBear => Self {
                orbit_learning_rate: 0.10,
                launch_cost_decline: 0.025,
                orbit_volatility: 0.15,
                ..base
            },
            ScenarioMode::OrbitalBull => Self {
                orbit_learning_rate: 0.20,
                launch_cost_decline: 0.08,
                ..base
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (value, name) in [
            (self.orbit_learning_rate, "orbit_learning_rate"),
            (self.ground_learning_rate, "ground_learning_rate"),
            (self.launch_cost_decline, "launch_cost_decline"),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(ConfigError::InvalidForecast(format!(
                    "{} must be within [0, 1), got {}",
                    name, value
                )));
            }
        }
        for (value, name) in [
            (self.launch_pass_through, "launch_pass_through"),
            (self.energy_pass_through, "energy_pass_through"),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidForecast(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        for (value, name) in [
            (self.launch_volatility, "launch_volatility"),
            (self.energy_volatility, "energy_volatility"),
            (self.carbon_volatility, "carbon_volatility"),
            (self.orbit_volatility, "orbit_volatility"),
            (self.ground_volatility, "ground_volatility"),
            (self.orbit_carbon_intensity, "orbit_carbon_intensity"),
            (self.ground_carbon_intensity, "ground_carbon_intensity"),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidForecast(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        if !self.carbon_drift.is_finite() {
            return Err(ConfigError::InvalidForecast("carbon_drift must be finite".to_string()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// step_world
// ---------------------------------------------------------------------------

/// Cost multiplier for growing capacity from `before` to `after` at `rate`
/// reduction per doubling.
pub fn learning_factor(before: f64, after: f64, rate: f64) -> f64 {
    let before = before.max(MIN_CAPACITY);
    let after = after.max(before);
    (after / before).powf((1.0 - rate).log2())
}

/// Advance `state` by one year under `action`.
pub fn step_world<R: Rng + ?Sized>(
    state: &mut WorldState,
    action: &DeploymentAction,
    params: &ForecastParams,
    rng: &mut R,
) {
    // Capacity and learning
    let orbit_before = state.orbit_capacity;
    let ground_before = state.ground_capacity;
    state.orbit_capacity += action.orbit_capacity_added.max(0.0);
    state.ground_capacity += action.ground_capacity_added.max(0.0);
    state.orbit_unit_cost *=
        learning_factor(orbit_before, state.orbit_capacity, params.orbit_learning_rate);
    state.ground_unit_cost *=
        learning_factor(ground_before, state.ground_capacity, params.ground_learning_rate);

    // Launch market
    let launch_move = (1.0 - params.launch_cost_decline)
        * lognormal_shock(params.launch_volatility, gaussian(rng));
    state.launch_cost *= launch_move;
    state.orbit_unit_cost *= 1.0 + params.launch_pass_through * (launch_move - 1.0);

    // Energy market
    let energy_move = lognormal_shock(params.energy_volatility, gaussian(rng));
    state.energy_price *= energy_move;
    state.ground_unit_cost *= 1.0 + params.energy_pass_through * (energy_move - 1.0);

    // Carbon price
    state.carbon_price =
        (state.carbon_price + params.carbon_drift + params.carbon_volatility * gaussian(rng)).max(0.0);

    // Idiosyncratic cost shocks
    state.orbit_unit_cost *= lognormal_shock(params.orbit_volatility, gaussian(rng));
    state.ground_unit_cost *= lognormal_shock(params.ground_volatility, gaussian(rng));

    state.year += 1;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::rng::{ChaChaStreams, RngStreams};

    fn calm() -> ForecastParams {
        ForecastParams {
            launch_volatility: 0.0,
            energy_volatility: 0.0,
            carbon_volatility: 0.0,
            orbit_volatility: 0.0,
            ground_volatility: 0.0,
            ..ForecastParams::default()
        }
    }

    #[test]
    fn doubling_capacity_applies_one_learning_step() {
        assert!((learning_factor(100.0, 200.0, 0.15) - 0.85).abs() < 1e-12);
        assert!((learning_factor(100.0, 400.0, 0.04) - 0.96 * 0.96).abs() < 1e-12);
        assert_eq!(learning_factor(100.0, 100.0, 0.15), 1.0);
        assert_eq!(learning_factor(100.0, 50.0, 0.15), 1.0);
    }

    #[test]
    fn calm_step_is_deterministic_learning_and_decline() {
        let params = ForecastParams { launch_pass_through: 0.0, ..calm() };
        let mut state = WorldState::default();
        let action = DeploymentAction { orbit_capacity_added: 50.0, ground_capacity_added: 0.0 };
        let mut rng = ChaChaStreams::new(0).stream(0);
        step_world(&mut state, &action, &params, &mut rng);

        assert_eq!(state.year, 2026);
        assert_eq!(state.orbit_capacity, 100.0);
        assert!((state.orbit_unit_cost - 6.0 * 0.85).abs() < 1e-9);
        assert!((state.ground_unit_cost - 2.0).abs() < 1e-12);
        assert!((state.launch_cost - 1_500.0 * 0.95).abs() < 1e-9);
        assert!((state.carbon_price - 95.0).abs() < 1e-12);
    }

    #[test]
    fn carbon_price_never_negative() {
        let params = ForecastParams { carbon_drift: -50.0, carbon_volatility: 30.0, ..ForecastParams::default() };
        let mut state = WorldState { carbon_price: 10.0, ..WorldState::default() };
        let mut rng = ChaChaStreams::new(3).stream(0);
        for _ in 0..50 {
            step_world(&mut state, &DeploymentAction::default(), &params, &mut rng);
            assert!(state.carbon_price >= 0.0);
            assert!(state.orbit_unit_cost > 0.0 && state.ground_unit_cost > 0.0);
        }
    }

    #[test]
    fn all_in_cost_adds_carbon() {
        let params = ForecastParams::default();
        let state = WorldState::default();
        assert!((state.all_in_orbit_cost(&params) - (6.0 + 90.0 * 0.0002)).abs() < 1e-12);
        assert!((state.all_in_ground_cost(&params) - (2.0 + 90.0 * 0.0004)).abs() < 1e-12);
    }

    #[test]
    fn scenario_params_are_valid_and_ordered() {
        let bear = ForecastParams::for_scenario(ScenarioMode::OrbitalBear);
        let base = ForecastParams::for_scenario(ScenarioMode::Baseline);
        let bull = ForecastParams::for_scenario(ScenarioMode::OrbitalBull);
        for p in [&bear, &base, &bull] {
            assert!(p.validate().is_ok());
        }
        assert!(bear.orbit_learning_rate < base.orbit_learning_rate);
        assert!(base.orbit_learning_rate < bull.orbit_learning_rate);
    }

    #[test]
    fn negative_volatility_rejected() {
        let params = ForecastParams { orbit_volatility: -0.1, ..ForecastParams::default() };
        assert!(matches!(params.validate(), Err(ConfigError::InvalidForecast(_))));
        assert!(ForecastParams::default().validate().is_ok());
    }
}
