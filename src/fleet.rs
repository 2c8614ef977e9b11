// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Orbital Compute Simulation Suite - Fleet & Shell Model

use serde::{Deserialize, Serialize};

use crate::types::{SatelliteClass, StrategyMode};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Annual growth of installed power per satellite.
const POWER_GROWTH: f64 = 0.04;
/// Annual growth of deployable radiator area.
const RADIATOR_GROWTH: f64 = 0.03;
/// Annual growth of per-satellite downlink.
const DOWNLINK_GROWTH: f64 = 0.08;
/// Linear yearly reduction in mass and unit cost.
const TECH_IMPROVEMENT_PER_YEAR: f64 = 0.03;
const TECH_FLOOR: f64 = 0.4;

const PFLOPS_PER_KW_BASE: f64 = 0.05;
const PFLOPS_PER_KW_GROWTH: f64 = 0.06;

// ─── Class Archetypes ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassArchetype {
    pub mass_kg: f64,
    pub power_kw: f64,
    pub unit_cost_usd_m: f64,
    pub radiator_m2: f64,
    pub downlink_gbps: f64,
}

impl SatelliteClass {
    pub fn archetype(&self) -> ClassArchetype {
        match self {
            SatelliteClass::A => ClassArchetype {
                mass_kg: 1_500.0,
                power_kw: 20.0,
                unit_cost_usd_m: 6.0,
                radiator_m2: 40.0,
                downlink_gbps: 12.0,
            },
            SatelliteClass::B => ClassArchetype {
                mass_kg: 4_000.0,
                power_kw: 80.0,
                unit_cost_usd_m: 18.0,
                radiator_m2: 120.0,
                downlink_gbps: 24.0,
            },
        }
    }
}

/// Linear tech-improvement factor applied to mass and unit cost.
pub fn tech_factor(years_elapsed: u32) -> f64 {
    (1.0 - TECH_IMPROVEMENT_PER_YEAR * years_elapsed as f64).max(TECH_FLOOR)
}

/// Compute density of flight hardware in `years_elapsed`.
pub fn pflops_per_kw(years_elapsed: u32) -> f64 {
    PFLOPS_PER_KW_BASE * (1.0 + PFLOPS_PER_KW_GROWTH).powi(years_elapsed as i32)
}

// ─── Class Design (per year, per strategy) ───────────────────────────────────

/// A satellite class as built in a given year under a given strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassDesign {
    pub class: SatelliteClass,
    pub mass_kg: f64,
    pub power_kw: f64,
    pub unit_cost_usd_m: f64,
    /// Requested radiator area before the feasibility envelope is applied.
    pub radiator_m2: f64,
    pub downlink_gbps: f64,
    pub pflops: f64,
}

impl ClassDesign {
    pub fn new(class: SatelliteClass, strategy: StrategyMode, years_elapsed: u32) -> Self {
        let base = class.archetype();
        let t = years_elapsed as i32;
        let tech = tech_factor(years_elapsed);
        let power_kw = base.power_kw * (1.0 + POWER_GROWTH).powi(t);
        Self {
            class,
            mass_kg: base.mass_kg * strategy.mass_multiplier() * tech,
            power_kw,
            unit_cost_usd_m: base.unit_cost_usd_m * strategy.unit_cost_multiplier() * tech,
            radiator_m2: base.radiator_m2
                * strategy.radiator_multiplier()
                * (1.0 + RADIATOR_GROWTH).powi(t),
            downlink_gbps: base.downlink_gbps * (1.0 + DOWNLINK_GROWTH).powi(t),
            pflops: power_kw * pflops_per_kw(years_elapsed),
        }
    }
}

/// Both class designs for a year plus the deployed class mix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignSet {
    pub designs: [ClassDesign; 2],
    /// Fraction of new satellites that are class B.
    pub class_b_fraction: f64,
}

impl DesignSet {
    pub fn new(strategy: StrategyMode, years_elapsed: u32, class_b_fraction: f64) -> Self {
        Self {
            designs: [
                ClassDesign::new(SatelliteClass::A, strategy, years_elapsed),
                ClassDesign::new(SatelliteClass::B, strategy, years_elapsed),
            ],
            class_b_fraction: class_b_fraction.clamp(0.0, 1.0),
        }
    }

    pub fn get(&self, class: SatelliteClass) -> &ClassDesign {
        &self.designs[class.index()]
    }

    /// Class-mix weighted average of a design property.
    pub fn mix_average(&self, f: impl Fn(&ClassDesign) -> f64) -> f64 {
        let b = self.class_b_fraction;
        (1.0 - b) * f(&self.designs[0]) + b * f(&self.designs[1])
    }

    /// Split `n` new satellites into (class A, class B) by the mix.
    pub fn split(&self, n: u32) -> [u32; 2] {
        let b = ((n as f64) * self.class_b_fraction).round() as u32;
        let b = b.min(n);
        [n - b, b]
    }
}

// ─── Orbit Shells ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShellId {
    Vleo = 0,
    Leo = 1,
    Uleo = 2,
    Meo = 3,
}

impl ShellId {
    pub fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitShell {
    pub id: ShellId,
    pub name: &'static str,
    /// Inclusive lower bound.
    pub min_altitude_km: f64,
    /// Exclusive upper bound.
    pub max_altitude_km: f64,
    pub congestion_capacity: u32,
    pub latency_ms: f64,
    pub solar_efficiency: f64,
    pub carbon_amortization_factor: f64,
}

/// Contiguous, non-overlapping altitude bands in ascending order.
pub const SHELLS: [OrbitShell; 4] = [
    OrbitShell {
        id: ShellId::Vleo,
        name: "Very Low Earth Orbit",
        min_altitude_km: 300.0,
        max_altitude_km: 500.0,
        congestion_capacity: 6_000,
        latency_ms: 4.0,
        solar_efficiency: 0.85,
        carbon_amortization_factor: 1.15,
    },
    OrbitShell {
        id: ShellId::Leo,
        name: "Low Earth Orbit",
        min_altitude_km: 500.0,
        max_altitude_km: 800.0,
        congestion_capacity: 20_000,
        latency_ms: 8.0,
        solar_efficiency: 0.92,
        carbon_amortization_factor: 1.0,
    },
    OrbitShell {
        id: ShellId::Uleo,
        name: "Upper Low Earth Orbit",
        min_altitude_km: 800.0,
        max_altitude_km: 1_200.0,
        congestion_capacity: 15_000,
        latency_ms: 14.0,
        solar_efficiency: 0.97,
        carbon_amortization_factor: 0.90,
    },
    OrbitShell {
        id: ShellId::Meo,
        name: "Medium Earth Orbit",
        min_altitude_km: 1_200.0,
        max_altitude_km: 36_000.0,
        congestion_capacity: 30_000,
        latency_ms: 60.0,
        solar_efficiency: 0.99,
        carbon_amortization_factor: 0.80,
    },
];

pub fn shell(id: ShellId) -> &'static OrbitShell {
    &SHELLS[id.index()]
}

/// The unique shell containing `altitude_km`, if any.
pub fn shell_for_altitude(altitude_km: f64) -> Option<&'static OrbitShell> {
    SHELLS
        .iter()
        .find(|s| altitude_km >= s.min_altitude_km && altitude_km < s.max_altitude_km)
}

/// Shell fill order for new satellites.
pub fn shell_preference(strategy: StrategyMode) -> [ShellId; 4] {
    match strategy {
        StrategyMode::Cost => [ShellId::Leo, ShellId::Vleo, ShellId::Uleo, ShellId::Meo],
        StrategyMode::Latency => [ShellId::Vleo, ShellId::Leo, ShellId::Uleo, ShellId::Meo],
        StrategyMode::Carbon => [ShellId::Uleo, ShellId::Leo, ShellId::Meo, ShellId::Vleo],
        StrategyMode::Balanced => [ShellId::Leo, ShellId::Uleo, ShellId::Vleo, ShellId::Meo],
    }
}

// ─── Shell Occupancy ─────────────────────────────────────────────────────────

/// Place up to `n` satellites in preference order. Returns how many were placed;
/// the remainder found no shell with spare congestion capacity.
pub fn place_in_shells(occupancy: &mut [u32], n: u32, strategy: StrategyMode) -> u32 {
    let mut remaining = n;
    for id in shell_preference(strategy) {
        if remaining == 0 {
            break;
        }
        let idx = id.index();
        let room = SHELLS[idx].congestion_capacity.saturating_sub(occupancy[idx]);
        let placed = room.min(remaining);
        occupancy[idx] += placed;
        remaining -= placed;
    }
    n - remaining
}

/// Occupancy-weighted mean of a shell property. Falls back to the strategy's
/// first-choice shell for an empty fleet.
pub fn occupancy_weighted(
    occupancy: &[u32],
    strategy: StrategyMode,
    f: impl Fn(&OrbitShell) -> f64,
) -> f64 {
    let total: u64 = occupancy.iter().map(|&c| c as u64).sum();
    if total == 0 {
        return f(shell(shell_preference(strategy)[0]));
    }
    SHELLS
        .iter()
        .zip(occupancy)
        .map(|(s, &c)| f(s) * c as f64)
        .sum::<f64>()
        / total as f64
}

/// Remove `n` units from `counts` proportionally to their size, using the
/// largest-remainder method so the total removed is exactly `min(n, sum)`.
pub fn remove_proportionally(counts: &mut [u32], n: u32) {
    let total: u64 = counts.iter().map(|&c| c as u64).sum();
    if total == 0 || n == 0 {
        return;
    }
    let n = (n as u64).min(total);

    let mut removed = vec![0u64; counts.len()];
    let mut remainders: Vec<(usize, f64)> = Vec::with_capacity(counts.len());
    let mut assigned = 0u64;
    for (i, &c) in counts.iter().enumerate() {
        let exact = n as f64 * c as f64 / total as f64;
        let floor = (exact.floor() as u64).min(c as u64);
        removed[i] = floor;
        assigned += floor;
        remainders.push((i, exact - floor as f64));
    }
    // Stable order keeps the result deterministic on equal remainders.
    remainders.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    let mut left = n - assigned;
    while left > 0 {
        let mut progressed = false;
        for &(i, _) in &remainders {
            if left == 0 {
                break;
            }
            if removed[i] < counts[i] as u64 {
                removed[i] += 1;
                left -= 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }
    for (c, r) in counts.iter_mut().zip(removed) {
        *c -= r as u32;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
