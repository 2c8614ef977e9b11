// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Launch ceiling -- how many satellites the year's launch manifest can lift.
//!
//! ```text
//! mass_budget = launches × max_payload
//! cost_budget = launches × cost_per_launch(year) × strategy_multiplier
//! ceiling     = floor(mass_budget / avg_unit_mass)
//! ```
//!
//! Mass is the binding check. The cost ceiling is reported alongside it but
//! never stops deployment: orbital costs are allowed to exceed ground costs
//! early in the trajectory without halting growth.

use serde::{Deserialize, Serialize};

use crate::config::LaunchCadence;
use crate::fleet::DesignSet;
use crate::types::{ScenarioMode, StrategyMode};

/// Cost per launch never falls below this share of the first-year cost.
const LAUNCH_COST_FLOOR: f64 = 0.10;

/// Smallest unit mass used as a divisor, kg.
const MIN_UNIT_MASS_KG: f64 = 1.0;
const MIN_UNIT_COST_USD_M: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchCeiling {
    pub launches: u32,
    pub mass_budget_kg: f64,
    pub cost_per_launch_usd_m: f64,
    pub cost_budget_usd_m: f64,
    pub avg_unit_mass_kg: f64,
    pub avg_unit_cost_usd_m: f64,
    pub mass_ceiling: u32,
    pub cost_ceiling: u32,
    /// The cost budget alone would have allowed fewer satellites than the mass budget.
    pub cost_limited: bool,
}

impl LaunchCeiling {
    /// Launch cost per kilogram of payload this year, USD millions.
    pub fn cost_per_kg_usd_m(&self, max_payload_kg: f64) -> f64 {
        self.cost_per_launch_usd_m / max_payload_kg.max(MIN_UNIT_MASS_KG)
    }
}

/// Launches available `years_elapsed` into the run.
pub fn launches_per_year(cadence: &LaunchCadence, scenario: ScenarioMode, years_elapsed: u32) -> u32 {
    let n = cadence.launches_per_year
        * scenario.launch_cadence_multiplier()
        * (1.0 + cadence.annual_growth).powi(years_elapsed as i32);
    if n.is_finite() && n > 0.0 {
        n.floor() as u32
    } else {
        0
    }
}

pub fn cost_per_launch(cadence: &LaunchCadence, scenario: ScenarioMode, years_elapsed: u32) -> f64 {
    let declined = (1.0 - scenario.launch_cost_decline()).powi(years_elapsed as i32);
    cadence.cost_per_launch_usd_m * declined.max(LAUNCH_COST_FLOOR)
}

pub fn launch_ceiling(
    cadence: &LaunchCadence,
    strategy: StrategyMode,
    scenario: ScenarioMode,
    designs: &DesignSet,
    years_elapsed: u32,
) -> LaunchCeiling {
    let launches = launches_per_year(cadence, scenario, years_elapsed);
    let mass_budget_kg = launches as f64 * cadence.max_payload_kg;
    let cost_per_launch_usd_m = cost_per_launch(cadence, scenario, years_elapsed);
    let cost_budget_usd_m =
        launches as f64 * cost_per_launch_usd_m * strategy.launch_cost_multiplier();

    let avg_unit_mass_kg = designs.mix_average(|d| d.mass_kg).max(MIN_UNIT_MASS_KG);
    let avg_unit_cost_usd_m = designs.mix_average(|d| d.unit_cost_usd_m).max(MIN_UNIT_COST_USD_M);

    let mass_ceiling = floor_count(mass_budget_kg / avg_unit_mass_kg);
    let cost_ceiling = floor_count(cost_budget_usd_m / avg_unit_cost_usd_m);

    LaunchCeiling {
        launches,
        mass_budget_kg,
        cost_per_launch_usd_m,
        cost_budget_usd_m,
        avg_unit_mass_kg,
        avg_unit_cost_usd_m,
        mass_ceiling,
        cost_ceiling,
        cost_limited: cost_ceiling < mass_ceiling,
    }
}

fn floor_count(x: f64) -> u32 {
    if x.is_finite() && x > 0.0 {
        x.floor().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
