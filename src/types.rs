// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Orbital Compute Simulation Suite - Type Definitions

use serde::{Deserialize, Serialize};

// ─── Satellite Class ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SatelliteClass {
    A = 0,
    B = 1,
}

impl SatelliteClass {
    pub const ALL: [SatelliteClass; 2] = [SatelliteClass::A, SatelliteClass::B];

    pub fn index(&self) -> usize {
        *self as usize
    }
}

// ─── Strategy Mode ───────────────────────────────────────────────────────────

/// Deployment strategy. Every strategy-dependent table is an exhaustive match
/// on this enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyMode {
    Cost,
    Latency,
    Carbon,
    #[default]
    Balanced,
}

impl StrategyMode {
    pub const ALL: [StrategyMode; 4] = [
        StrategyMode::Cost,
        StrategyMode::Latency,
        StrategyMode::Carbon,
        StrategyMode::Balanced,
    ];

    /// Multiplier on per-satellite mass (shielding, structure, radiator panels).
    pub fn mass_multiplier(&self) -> f64 {
        match self {
            Self::Cost => 0.85,
            Self::Latency => 1.0,
            Self::Carbon => 1.10,
            Self::Balanced => 1.0,
        }
    }

    /// Multiplier on radiator area. COST trims radiators, CARBON oversizes them.
    pub fn radiator_multiplier(&self) -> f64 {
        match self {
            Self::Cost => 0.80,
            Self::Latency => 1.0,
            Self::Carbon => 1.25,
            Self::Balanced => 1.0,
        }
    }

    pub fn unit_cost_multiplier(&self) -> f64 {
        match self {
            Self::Cost => 0.85,
            Self::Latency => 1.05,
            Self::Carbon => 1.10,
            Self::Balanced => 1.0,
        }
    }

    pub fn launch_cost_multiplier(&self) -> f64 {
        match self {
            Self::Cost => 0.90,
            Self::Latency => 1.10,
            Self::Carbon => 1.0,
            Self::Balanced => 1.0,
        }
    }

    /// Annual autonomy R&D growth rate.
    pub fn rd_rate(&self) -> f64 {
        match self {
            Self::Cost => 0.05,
            Self::Latency => 0.07,
            Self::Carbon => 0.06,
            Self::Balanced => 0.08,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cost => "COST",
            Self::Latency => "LATENCY",
            Self::Carbon => "CARBON",
            Self::Balanced => "BALANCED",
        }
    }
}

// ─── Scenario Mode ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScenarioMode {
    #[default]
    Baseline,
    OrbitalBear,
    OrbitalBull,
}

impl ScenarioMode {
    pub const ALL: [ScenarioMode; 3] = [
        ScenarioMode::Baseline,
        ScenarioMode::OrbitalBear,
        ScenarioMode::OrbitalBull,
    ];

    pub fn launch_cadence_multiplier(&self) -> f64 {
        match self {
            Self::Baseline => 1.0,
            Self::OrbitalBear => 0.7,
            Self::OrbitalBull => 1.3,
        }
    }

    /// Annual decline in cost per launch.
    pub fn launch_cost_decline(&self) -> f64 {
        match self {
            Self::Baseline => 0.06,
            Self::OrbitalBear => 0.03,
            Self::OrbitalBull => 0.09,
        }
    }

    /// Share of failures that no repair capacity can recover.
    pub fn unrecoverable_fraction(&self) -> f64 {
        match self {
            Self::Baseline => 0.15,
            Self::OrbitalBear => 0.35,
            Self::OrbitalBull => 0.05,
        }
    }

    /// Added to the strategy R&D rate.
    pub fn rd_bonus(&self) -> f64 {
        match self {
            Self::Baseline => 0.0,
            Self::OrbitalBear => -0.02,
            Self::OrbitalBull => 0.02,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Baseline => "BASELINE",
            Self::OrbitalBear => "ORBITAL_BEAR",
            Self::OrbitalBull => "ORBITAL_BULL",
        }
    }
}

// ─── Constraint Kind ─────────────────────────────────────────────────────────

/// Declaration order is the tie-break priority for dominant-constraint selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintKind {
    Launch = 0,
    Heat = 1,
    Backhaul = 2,
    Autonomy = 3,
    Spectrum = 4,
}

impl ConstraintKind {
    pub const PRIORITY: [ConstraintKind; 5] = [
        ConstraintKind::Launch,
        ConstraintKind::Heat,
        ConstraintKind::Backhaul,
        ConstraintKind::Autonomy,
        ConstraintKind::Spectrum,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// HEAT, BACKHAUL and SPECTRUM scale compute down rather than capping the
    /// satellite count.
    pub fn is_derating(&self) -> bool {
        matches!(self, Self::Heat | Self::Backhaul | Self::Spectrum)
    }
}

// ─── FleetState ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FleetState {
    pub class_a_alive: u32,
    pub class_b_alive: u32,
    /// Alive satellites per shell, in catalog order.
    pub shell_alive: Vec<u32>,
    pub cumulative_launched: u64,
    pub cumulative_failures: u64,
    pub cumulative_repairs: u64,
    pub cumulative_losses: u64,
    pub total_power_kw: f64,
    pub raw_compute_pflops: f64,
    pub effective_compute_pflops: f64,
}

impl FleetState {
    pub fn alive_count(&self) -> u32 {
        self.class_a_alive + self.class_b_alive
    }

    pub fn alive_by_class(&self) -> [u32; 2] {
        [self.class_a_alive, self.class_b_alive]
    }
}

// ─── Constraint Report ───────────────────────────────────────────────────────

/// One constraint's ceiling for a year, in operating-satellite equivalents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstraintCeiling {
    pub kind: ConstraintKind,
    pub satellite_equivalent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintReport {
    /// Ceilings in priority order.
    pub ceilings: Vec<ConstraintCeiling>,
    pub dominant: ConstraintKind,
    /// True when the dominant ceiling sits below the planned fleet.
    pub binding: bool,
    pub planned_fleet: f64,

    pub launches: u32,
    pub mass_budget_kg: f64,
    pub cost_budget_usd_m: f64,
    pub mass_ceiling: u32,
    pub cost_ceiling: u32,
    /// Informational: the cost budget would have stopped deployment below the mass ceiling.
    pub cost_limited: bool,

    pub autonomy_level: f64,
    pub managed_fleet: f64,

    pub thermal_derating: f64,
    pub spectrum_derating: f64,
    pub backhaul_derating: f64,
    pub survival_fraction: f64,
}

// ─── YearStep ────────────────────────────────────────────────────────────────

/// Immutable per-year record. Once appended to a timeline it is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearStep {
    pub year: i32,
    pub orbital_share: f64,
    pub ground_share: f64,

    pub cost_per_compute_ground: f64,
    pub cost_per_compute_orbit: f64,
    pub cost_per_compute_mix: f64,

    pub latency_ground_ms: f64,
    pub latency_orbit_ms: f64,
    pub latency_mix_ms: f64,

    pub opex_ground: f64,
    pub opex_mix: f64,

    pub carbon_ground: f64,
    pub carbon_orbit: f64,
    pub carbon_mix: f64,

    pub demand_pflops: f64,

    /// Tightest ceiling this year. HEAT, BACKHAUL and SPECTRUM only qualify
    /// while their factor is below 1; a slack year names the count ceiling
    /// (LAUNCH or AUTONOMY) with the least headroom.
    pub dominant_constraint: ConstraintKind,
    pub constraint_binding: bool,
    pub survival_fraction: f64,
    pub heat_utilization_pct: f64,
    pub backhaul_utilization_pct: f64,
    pub spectrum_utilization_pct: f64,

    pub satellites_requested: u32,
    pub satellites_added: u32,
    pub satellites_rejected: u32,
    pub failures: u32,
    pub repairs: u32,
    pub permanent_losses: u32,

    pub fleet: FleetState,
    pub constraints: ConstraintReport,
}
