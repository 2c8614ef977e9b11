// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Constraint engine -- the five physical ceilings on orbital deployment.
//!
//! A year is evaluated in two phases:
//!
//! 1. [`ConstraintEngine::addition_limits`] runs before any satellite is added.
//!    Launch mass and autonomy are count-type limits and clamp how many
//!    satellites may join the fleet.
//! 2. [`ConstraintEngine::operating_conditions`] runs on the operating fleet.
//!    Heat, spectrum and backhaul are derating-type limits: they throttle
//!    compute and never remove satellites, so no limit is charged twice.
//!
//! [`ConstraintEngine::report`] expresses all five as operating-satellite
//! equivalents against the planned fleet and picks the dominant one.

pub mod launch;
pub mod link;
pub mod maintenance;
pub mod thermal;

use tracing::warn;

use crate::config::{LaunchCadence, SimulationConfig};
use crate::fleet::DesignSet;
use crate::types::{ConstraintCeiling, ConstraintKind, ConstraintReport, ScenarioMode, StrategyMode};

pub use launch::LaunchCeiling;
pub use link::{BackhaulReport, SpectrumReport};
pub use maintenance::MaintenanceOutcome;
pub use thermal::{FleetThermal, RadiatorEnvelope, ThermalReport};

/// Relative tolerance under which two ceilings count as tied.
const TIE_TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Phase outputs
// ---------------------------------------------------------------------------

/// Count-type limits evaluated before additions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdditionLimits {
    pub launch: LaunchCeiling,
    pub autonomy_level: f64,
    pub managed_fleet: f64,
    /// Satellites the autonomy ceiling still admits on top of the alive fleet.
    pub autonomy_headroom: u32,
}

impl AdditionLimits {
    /// Most satellites that may be added this year, before shell congestion.
    pub fn max_additions(&self) -> u32 {
        self.launch.mass_ceiling.min(self.autonomy_headroom)
    }
}

/// Derating-type limits and maintenance on the operating fleet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingConditions {
    pub thermal: FleetThermal,
    pub spectrum: SpectrumReport,
    pub backhaul: BackhaulReport,
    pub maintenance: MaintenanceOutcome,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ConstraintEngine {
    strategy: StrategyMode,
    scenario: ScenarioMode,
    cadence: LaunchCadence,
    unrecoverable_fraction: f64,
}

impl ConstraintEngine {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            strategy: config.strategy_mode,
            scenario: config.scenario_mode,
            cadence: config.launch_cadence.clone(),
            unrecoverable_fraction: config.effective_unrecoverable_fraction(),
        }
    }

    pub fn addition_limits(&self, designs: &DesignSet, years_elapsed: u32, alive: u32) -> AdditionLimits {
        let launch =
            launch::launch_ceiling(&self.cadence, self.strategy, self.scenario, designs, years_elapsed);
        let autonomy_level = maintenance::autonomy_level(self.strategy, self.scenario, years_elapsed);
        let managed_fleet = maintenance::managed_fleet(autonomy_level);
        let headroom = (managed_fleet.floor() - alive as f64).max(0.0);
        AdditionLimits {
            launch,
            autonomy_level,
            managed_fleet,
            autonomy_headroom: headroom.min(u32::MAX as f64) as u32,
        }
    }

    pub fn operating_conditions(
        &self,
        designs: &DesignSet,
        years_elapsed: u32,
        alive_by_class: [u32; 2],
        raw_compute_pflops: f64,
        autonomy_level: f64,
    ) -> OperatingConditions {
        let thermal = thermal::fleet_thermal(designs, alive_by_class);
        let spectrum = link::spectrum(designs, alive_by_class);
        let backhaul =
            link::backhaul(raw_compute_pflops, thermal.derating, spectrum.derating, years_elapsed);
        let fleet = alive_by_class[0].saturating_add(alive_by_class[1]);
        let maintenance = maintenance::maintain(fleet, autonomy_level, self.unrecoverable_fraction);
        OperatingConditions { thermal, spectrum, backhaul, maintenance }
    }

    /// Assemble the year's report. `alive` is the fleet before additions and
    /// `requested` what the deployment plan asked for.
    pub fn report(
        &self,
        limits: &AdditionLimits,
        conditions: &OperatingConditions,
        alive: u32,
        requested: u32,
    ) -> ConstraintReport {
        let plan = alive as f64 + requested as f64;
        let thermal_derating = unit_factor("thermal derating", conditions.thermal.derating);
        let spectrum_derating = unit_factor("spectrum derating", conditions.spectrum.derating);
        let backhaul_derating = unit_factor("backhaul derating", conditions.backhaul.derating);
        let survival_fraction = unit_factor("survival", conditions.maintenance.survival_fraction);

        let ceilings: Vec<ConstraintCeiling> = ConstraintKind::PRIORITY
            .iter()
            .map(|&kind| {
                let satellite_equivalent = match kind {
                    ConstraintKind::Launch => alive as f64 + limits.launch.mass_ceiling as f64,
                    ConstraintKind::Heat => plan * thermal_derating,
                    ConstraintKind::Backhaul => plan * backhaul_derating,
                    ConstraintKind::Autonomy => limits.managed_fleet,
                    ConstraintKind::Spectrum => plan * spectrum_derating,
                };
                ConstraintCeiling { kind, satellite_equivalent }
            })
            .collect();
        let (dominant, binding) = select_dominant(&ceilings, plan);

        ConstraintReport {
            ceilings,
            dominant,
            binding,
            planned_fleet: plan,
            launches: limits.launch.launches,
            mass_budget_kg: limits.launch.mass_budget_kg,
            cost_budget_usd_m: limits.launch.cost_budget_usd_m,
            mass_ceiling: limits.launch.mass_ceiling,
            cost_ceiling: limits.launch.cost_ceiling,
            cost_limited: limits.launch.cost_limited,
            autonomy_level: limits.autonomy_level,
            managed_fleet: limits.managed_fleet,
            thermal_derating,
            spectrum_derating,
            backhaul_derating,
            survival_fraction,
        }
    }
}

/// Lowest ceiling wins; near-ties resolve in [`ConstraintKind::PRIORITY`] order.
/// A derating ceiling whose factor is 1 sits exactly at the plan and limits
/// nothing, so it only competes once it falls below the plan. In a slack year
/// the tag is therefore the count ceiling with the least headroom.
/// An empty plan binds nothing and is tagged LAUNCH.
pub fn select_dominant(ceilings: &[ConstraintCeiling], planned_fleet: f64) -> (ConstraintKind, bool) {
    if planned_fleet <= 0.0 || ceilings.is_empty() {
        return (ConstraintKind::Launch, false);
    }
    let slack_floor = planned_fleet - TIE_TOLERANCE * planned_fleet.max(1.0);
    let competing: Vec<&ConstraintCeiling> = ceilings
        .iter()
        .filter(|c| !c.kind.is_derating() || c.satellite_equivalent < slack_floor)
        .collect();
    let candidates: Vec<&ConstraintCeiling> = if competing.is_empty() {
        ceilings.iter().collect()
    } else {
        competing
    };

    let min = candidates
        .iter()
        .map(|c| c.satellite_equivalent)
        .fold(f64::INFINITY, f64::min);
    let tolerance = TIE_TOLERANCE * min.abs().max(1.0);

    let dominant = ConstraintKind::PRIORITY
        .iter()
        .copied()
        .find(|&kind| {
            candidates
                .iter()
                .any(|c| c.kind == kind && c.satellite_equivalent <= min + tolerance)
        })
        .unwrap_or(ConstraintKind::Launch);

    (dominant, min < planned_fleet)
}

/// Clamp a multiplicative factor into [0, 1], flagging anything that escaped.
pub(crate) fn unit_factor(name: &str, value: f64) -> f64 {
    let ok = (0.0..=1.0).contains(&value);
    debug_assert!(ok, "{name} outside [0, 1]: {value}");
    if !ok {
        warn!(factor = name, value, "factor outside [0, 1], clamping");
        if value.is_nan() {
            return 0.0;
        }
    }
    value.clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
