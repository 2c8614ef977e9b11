// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Orbital Compute Simulation Suite - Run Configuration

//! Configuration for one deterministic simulation run.
//!
//! Every field has a default so a partial JSON object (or JS object from the
//! dashboard) is enough. `validate()` must pass before a run starts; the
//! simulator never patches up a bad configuration on its own.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::{ScenarioMode, StrategyMode};

/// Longest horizon accepted by `validate()`.
pub const MAX_HORIZON_YEARS: u32 = 100;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown pod type '{0}' (expected A, B or MIXED)")]
    UnknownPodType(String),

    #[error("horizon must be between 1 and {max} years, got {got}")]
    InvalidHorizon { got: u32, max: u32 },

    #[error("start year {start} plus a {horizon}-year horizon overflows the calendar")]
    InvalidStartYear { start: i32, horizon: u32 },

    #[error("invalid launch cadence: {0}")]
    InvalidLaunchCadence(String),

    #[error("invalid pod spec: {0}")]
    InvalidPodSpec(String),

    #[error("unrecoverable fraction must be within [0, 1], got {0}")]
    InvalidUnrecoverableFraction(f64),

    #[error("invalid ground baseline: {0}")]
    InvalidGroundBaseline(String),

    #[error("invalid forecast configuration: {0}")]
    InvalidForecast(String),

    #[error("malformed configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// PodType
// ---------------------------------------------------------------------------

/// Compute pod archetype. Determines the class mix of deployed satellites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum PodType {
    A,
    B,
    #[default]
    Mixed,
}

impl PodType {
    /// Fraction of deployed satellites that are class B.
    pub fn class_b_fraction(&self) -> f64 {
        match self {
            Self::A => 0.0,
            Self::B => 1.0,
            Self::Mixed => 0.5,
        }
    }
}

impl FromStr for PodType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "MIXED" => Ok(Self::Mixed),
            _ => Err(ConfigError::UnknownPodType(s.to_string())),
        }
    }
}

impl TryFrom<String> for PodType {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PodType> for String {
    fn from(p: PodType) -> Self {
        p.to_string()
    }
}

impl fmt::Display for PodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::A => "A",
            Self::B => "B",
            Self::Mixed => "MIXED",
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// LaunchCadence / PodSpec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchCadence {
    /// Heavy-lift launches available in the first year.
    pub launches_per_year: f64,
    /// Year-over-year growth in launch count.
    pub annual_growth: f64,
    pub max_payload_kg: f64,
    /// Cost of one launch in the first year, USD millions.
    pub cost_per_launch_usd_m: f64,
}

impl Default for LaunchCadence {
    fn default() -> Self {
        Self {
            launches_per_year: 20.0,
            annual_growth: 0.10,
            max_payload_kg: 100_000.0,
            cost_per_launch_usd_m: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PodSpec {
    pub pod_type: PodType,
    pub satellites_per_pod: u32,
    /// Pods the plan asks for in the first year. Zero disables orbital deployment.
    pub pods_per_year: f64,
    pub growth_rate: f64,
}

impl Default for PodSpec {
    fn default() -> Self {
        Self {
            pod_type: PodType::Mixed,
            satellites_per_pod: 1,
            pods_per_year: 150.0,
            growth_rate: 0.25,
        }
    }
}

// ---------------------------------------------------------------------------
// GroundBaselineParams
// ---------------------------------------------------------------------------

/// Ground data-centre reference trajectory the orbital fleet is compared against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundBaselineParams {
    /// Global compute demand in the first year, PFLOP-years.
    pub demand_pflops: f64,
    pub demand_growth: f64,
    /// USD millions per PFLOP-year.
    pub cost_per_pflop_usd_m: f64,
    pub cost_decline: f64,
    pub latency_ms: f64,
    /// kgCO2 per PFLOP-year.
    pub carbon_per_pflop_kg: f64,
    /// Annual grid decarbonization rate.
    pub decarbonization_rate: f64,
}

impl Default for GroundBaselineParams {
    fn default() -> Self {
        Self {
            demand_pflops: 10_000.0,
            demand_growth: 0.18,
            cost_per_pflop_usd_m: 0.50,
            cost_decline: 0.04,
            latency_ms: 35.0,
            carbon_per_pflop_kg: 400.0,
            decarbonization_rate: 0.04,
        }
    }
}

// ---------------------------------------------------------------------------
// SimulationConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub start_year: i32,
    /// Number of simulated years (one `YearStep` each).
    pub horizon_years: u32,
    pub strategy_mode: StrategyMode,
    pub scenario_mode: ScenarioMode,
    pub launch_cadence: LaunchCadence,
    pub pod_spec: PodSpec,
    /// Overrides the scenario's unrecoverable failure fraction.
    pub unrecoverable_fraction: Option<f64>,
    pub ground: GroundBaselineParams,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_year: 2025,
            horizon_years: 25,
            strategy_mode: StrategyMode::Balanced,
            scenario_mode: ScenarioMode::Baseline,
            launch_cadence: LaunchCadence::default(),
            pod_spec: PodSpec::default(),
            unrecoverable_fraction: None,
            ground: GroundBaselineParams::default(),
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon_years == 0 || self.horizon_years > MAX_HORIZON_YEARS {
            return Err(ConfigError::InvalidHorizon {
                got: self.horizon_years,
                max: MAX_HORIZON_YEARS,
            });
        }
        check_year_range(self.start_year, self.horizon_years)?;

        let lc = &self.launch_cadence;
        non_negative(lc.launches_per_year, "launches_per_year")
            .map_err(ConfigError::InvalidLaunchCadence)?;
        non_negative(lc.cost_per_launch_usd_m, "cost_per_launch_usd_m")
            .map_err(ConfigError::InvalidLaunchCadence)?;
        growth(lc.annual_growth, "annual_growth").map_err(ConfigError::InvalidLaunchCadence)?;
        if !(lc.max_payload_kg.is_finite() && lc.max_payload_kg > 0.0) {
            return Err(ConfigError::InvalidLaunchCadence(format!(
                "max_payload_kg must be positive, got {}",
                lc.max_payload_kg
            )));
        }

        let pod = &self.pod_spec;
        non_negative(pod.pods_per_year, "pods_per_year").map_err(ConfigError::InvalidPodSpec)?;
        growth(pod.growth_rate, "growth_rate").map_err(ConfigError::InvalidPodSpec)?;
        if pod.satellites_per_pod == 0 {
            return Err(ConfigError::InvalidPodSpec(
                "satellites_per_pod must be at least 1".to_string(),
            ));
        }

        if let Some(f) = self.unrecoverable_fraction {
            if !(0.0..=1.0).contains(&f) {
                return Err(ConfigError::InvalidUnrecoverableFraction(f));
            }
        }

        let g = &self.ground;
        for (value, name) in [
            (g.demand_pflops, "demand_pflops"),
            (g.cost_per_pflop_usd_m, "cost_per_pflop_usd_m"),
            (g.latency_ms, "latency_ms"),
            (g.carbon_per_pflop_kg, "carbon_per_pflop_kg"),
        ] {
            non_negative(value, name).map_err(ConfigError::InvalidGroundBaseline)?;
        }
        growth(g.demand_growth, "demand_growth").map_err(ConfigError::InvalidGroundBaseline)?;
        for (value, name) in [
            (g.cost_decline, "cost_decline"),
            (g.decarbonization_rate, "decarbonization_rate"),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(ConfigError::InvalidGroundBaseline(format!(
                    "{} must be within [0, 1), got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Unrecoverable failure fraction after applying the override.
    pub fn effective_unrecoverable_fraction(&self) -> f64 {
        self.unrecoverable_fraction
            .unwrap_or_else(|| self.scenario_mode.unrecoverable_fraction())
    }

    pub fn end_year(&self) -> i32 {
        self.start_year + self.horizon_years as i32 - 1
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Every year from `start` through `start + horizon` must fit in an `i32`.
pub(crate) fn check_year_range(start: i32, horizon: u32) -> Result<(), ConfigError> {
    i32::try_from(horizon)
        .ok()
        .and_then(|h| start.checked_add(h))
        .map(|_| ())
        .ok_or(ConfigError::InvalidStartYear { start, horizon })
}

fn non_negative(value: f64, name: &str) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{} must be a finite non-negative number, got {}", name, value))
    }
}

fn growth(value: f64, name: &str) -> Result<(), String> {
    if value.is_finite() && value > -1.0 {
        Ok(())
    } else {
        Err(format!("{} must be finite and greater than -1, got {}", name, value))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = SimulationConfig::from_json(
            r#"{ "horizon_years": 10, "strategy_mode": "CARBON", "scenario_mode": "ORBITAL_BULL" }"#,
        )
        .expect("test: partial config parses");
        assert_eq!(cfg.horizon_years, 10);
        assert_eq!(cfg.strategy_mode, StrategyMode::Carbon);
        assert_eq!(cfg.scenario_mode, ScenarioMode::OrbitalBull);
        assert_eq!(cfg.launch_cadence, LaunchCadence::default());
        assert_eq!(cfg.end_year(), 2034);
    }

    #[test]
    fn unknown_pod_type_fails_fast() {
        let err = SimulationConfig::from_json(r#"{ "pod_spec": { "pod_type": "QUANTUM" } }"#)
            .expect_err("test: unknown pod type must be rejected");
        assert!(err.to_string().contains("QUANTUM"), "got: {err}");

        let parsed: Result<PodType, _> = "quantum".parse();
        assert!(matches!(parsed, Err(ConfigError::UnknownPodType(_))));
    }

    #[test]
    fn pod_type_parsing_is_case_insensitive() {
        assert_eq!("mixed".parse::<PodType>().ok(), Some(PodType::Mixed));
        assert_eq!(" b ".parse::<PodType>().ok(), Some(PodType::B));
        assert_eq!(PodType::A.to_string(), "A");
    }

    #[test]
    fn rejects_zero_horizon() {
        let cfg = SimulationConfig { horizon_years: 0, ..SimulationConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidHorizon { got: 0, .. })));
    }

    #[test]
    fn rejects_start_year_that_overflows() {
        let cfg = SimulationConfig { start_year: i32::MAX - 3, ..SimulationConfig::default() };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidStartYear { start, horizon: 25 }) if start == i32::MAX - 3
        ));

        let last_valid = SimulationConfig { start_year: i32::MAX - 25, ..SimulationConfig::default() };
        assert!(last_valid.validate().is_ok());
        assert_eq!(last_valid.end_year(), i32::MAX - 1);
    }

    #[test]
    fn rejects_negative_launches() {
        let mut cfg = SimulationConfig::default();
        cfg.launch_cadence.launches_per_year = -1.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidLaunchCadence(_))));
    }

    #[test]
    fn rejects_zero_payload() {
        let mut cfg = SimulationConfig::default();
        cfg.launch_cadence.max_payload_kg = 0.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidLaunchCadence(_))));
    }

    #[test]
    fn rejects_out_of_range_unrecoverable_fraction() {
        let cfg = SimulationConfig {
            unrecoverable_fraction: Some(1.5),
            ..SimulationConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidUnrecoverableFraction(_))
        ));
    }

    #[test]
    fn unrecoverable_override_wins_over_scenario() {
        let mut cfg = SimulationConfig::default();
        assert_eq!(cfg.effective_unrecoverable_fraction(), 0.15);
        cfg.unrecoverable_fraction = Some(1.0);
        assert_eq!(cfg.effective_unrecoverable_fraction(), 1.0);
    }

    #[test]
    fn zero_pods_is_valid() {
        let mut cfg = SimulationConfig::default();
        cfg.pod_spec.pods_per_year = 0.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = SimulationConfig::from_json("{ not json").expect_err("test: bad json");
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
