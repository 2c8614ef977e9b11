// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Maintenance and autonomy -- failures, repairs and permanent loss.
//!
//! Autonomy compounds with R&D spend and divides the base failure rate. A
//! fixed share of failures is unrecoverable; the rest compete for a repair
//! capacity that grows with the square root of autonomy.

use serde::{Deserialize, Serialize};

use crate::types::{ScenarioMode, StrategyMode};

pub const BASE_FAILURE_RATE: f64 = 0.03;
/// Hard cap on the share of the fleet repaired per year.
pub const MAX_REPAIR_RATE: f64 = 0.20;
pub const BASE_REPAIR_RATE: f64 = 0.10;
/// Survival never falls below this; a crippled fleet keeps partial operation.
pub const SURVIVAL_FLOOR: f64 = 0.10;
/// Satellites one unit of autonomy can operate without ground intervention.
pub const BASE_MANAGED_FLEET: f64 = 4_000.0;

const MIN_AUTONOMY: f64 = 1e-6;

/// Autonomy level `years_elapsed` into the run, 1.0 in the first year.
pub fn autonomy_level(strategy: StrategyMode, scenario: ScenarioMode, years_elapsed: u32) -> f64 {
    let rate = (strategy.rd_rate() + scenario.rd_bonus()).max(0.0);
    (1.0 + rate).powi(years_elapsed as i32)
}

/// Operating-satellite ceiling imposed by autonomy.
pub fn managed_fleet(autonomy: f64) -> f64 {
    BASE_MANAGED_FLEET * autonomy.max(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MaintenanceOutcome {
    pub failure_rate: f64,
    pub failures: u32,
    pub unrecoverable: u32,
    pub recoverable: u32,
    pub repair_capacity: f64,
    pub repaired: u32,
    pub permanent_losses: u32,
    pub survival_fraction: f64,
}

/// One year of failures and repairs on a fleet of `fleet` operating satellites.
pub fn maintain(fleet: u32, autonomy: f64, unrecoverable_fraction: f64) -> MaintenanceOutcome {
    let autonomy = autonomy.max(MIN_AUTONOMY);
    let failure_rate = (BASE_FAILURE_RATE / autonomy).clamp(0.0, 1.0);
    if fleet == 0 {
        return MaintenanceOutcome {
            failure_rate,
            survival_fraction: 1.0,
            ..MaintenanceOutcome::default()
        };
    }

    let n = fleet as f64;
    let failures = ((n * failure_rate).round() as u32).min(fleet);
    let frac = unrecoverable_fraction.clamp(0.0, 1.0);
    let unrecoverable = ((failures as f64 * frac).round() as u32).min(failures);
    let recoverable = failures - unrecoverable;

    let repair_capacity = (MAX_REPAIR_RATE * n).min(BASE_REPAIR_RATE * autonomy.sqrt() * n);
    let repaired = recoverable.min(repair_capacity.floor() as u32);

    let max_loss = (n * (1.0 - SURVIVAL_FLOOR)).floor() as u32;
    let permanent_losses = (unrecoverable + recoverable - repaired).min(max_loss);
    let survival_fraction = (1.0 - permanent_losses as f64 / n).clamp(SURVIVAL_FLOOR, 1.0);

    MaintenanceOutcome {
        failure_rate,
        failures,
        unrecoverable,
        recoverable,
        repair_capacity,
        repaired,
        permanent_losses,
        survival_fraction,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
