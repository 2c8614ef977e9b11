// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Orbital Compute Simulation Suite - Economic Calculator

//! Per-year economics of an orbital/ground compute mix.
//!
//! [`calculate`] is pure: a fleet snapshot and the ground baseline for the
//! same year go in, shares and cost/latency/carbon/OPEX comparisons come out.
//! With no orbital compute every mix metric equals the ground metric exactly.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::GroundBaselineParams;
use crate::fleet::DesignSet;

/// Orbital share never exceeds this; some workloads stay on the ground.
pub const MAX_ORBITAL_SHARE: f64 = 0.9;
pub const SATELLITE_LIFETIME_YEARS: f64 = 5.0;
/// Operations overhead on the annualized fleet cost.
pub const OPS_OVERHEAD: f64 = 1.10;
/// Cost multiplier per doubling of cumulative satellites launched.
pub const LEARNING_RATE: f64 = 0.85;
pub const LEARNING_REFERENCE_SATELLITES: f64 = 100.0;
/// Fixed ground-segment hop added to the round trip, ms.
pub const GROUND_SEGMENT_LATENCY_MS: f64 = 6.0;

// Orbital lifecycle carbon, kgCO2 per PFLOP-year.
const ORBIT_CARBON_BASE: f64 = 1_100.0;
const ORBIT_CARBON_DECLINE: f64 = 0.03;
const ORBIT_CARBON_SCALE_REFERENCE: f64 = 500.0;
const ORBIT_CARBON_SCALE_EXPONENT: f64 = -0.6;
const ORBIT_CARBON_OPERATIONS: f64 = 20.0;

const MIN_COMPUTE_PFLOPS: f64 = 1e-9;

// ─── Ground Baseline ─────────────────────────────────────────────────────────

/// Ground data-centre figures for one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundBaseline {
    pub demand_pflops: f64,
    /// USD millions per PFLOP-year.
    pub cost_per_pflop_usd_m: f64,
    pub latency_ms: f64,
    /// kgCO2 per PFLOP-year. Non-increasing over time.
    pub carbon_per_pflop_kg: f64,
}

impl GroundBaseline {
    pub fn for_year(params: &GroundBaselineParams, years_elapsed: u32) -> Self {
        let t = years_elapsed as i32;
        Self {
            demand_pflops: params.demand_pflops * (1.0 + params.demand_growth).powi(t),
            cost_per_pflop_usd_m: params.cost_per_pflop_usd_m * (1.0 - params.cost_decline).powi(t),
            latency_ms: params.latency_ms,
            carbon_per_pflop_kg: params.carbon_per_pflop_kg
                * (1.0 - params.decarbonization_rate).powi(t),
        }
    }
}

// ─── Fleet Snapshot ──────────────────────────────────────────────────────────

/// What the economics need to know about the orbital fleet in one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub years_elapsed: u32,
    pub effective_compute_pflops: f64,
    pub alive_by_class: [u32; 2],
    pub designs: DesignSet,
    pub launch_cost_per_kg_usd_m: f64,
    pub cumulative_launched: u64,
    /// Occupancy-weighted one-way shell latency, ms.
    pub shell_latency_ms: f64,
    /// Occupancy-weighted carbon amortization factor.
    pub carbon_amortization: f64,
}

// ─── Metrics ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EconomicMetrics {
    pub demand_pflops: f64,
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
}

/// Cost multiplier after `cumulative_launched` satellites. Never above 1.0.
pub fn learning_multiplier(cumulative_launched: u64) -> f64 {
    let doublings = (cumulative_launched as f64 / LEARNING_REFERENCE_SATELLITES).max(1.0);
    doublings.powf(LEARNING_RATE.log2())
}

/// Lifecycle carbon of orbital compute. Falls with both time and cumulative
/// scale, so the curve is monotone non-increasing along any run.
pub fn orbital_carbon(years_elapsed: u32, amortization: f64, cumulative_launched: u64) -> f64 {
    let scale = 1.0 + cumulative_launched as f64 / ORBIT_CARBON_SCALE_REFERENCE;
    ORBIT_CARBON_BASE
        * (1.0 - ORBIT_CARBON_DECLINE).powi(years_elapsed as i32)
        * amortization.max(0.0)
        * scale.powf(ORBIT_CARBON_SCALE_EXPONENT)
        + ORBIT_CARBON_OPERATIONS
}

fn annualized_cost(designs: &DesignSet, counts: [f64; 2], launch_cost_per_kg_usd_m: f64) -> f64 {
    designs
        .designs
        .iter()
        .zip(counts)
        .map(|(d, n)| n * (d.unit_cost_usd_m + launch_cost_per_kg_usd_m * d.mass_kg))
        .sum::<f64>()
        / SATELLITE_LIFETIME_YEARS
        * OPS_OVERHEAD
}

/// Orbital cost per PFLOP-year. Without effective compute a single reference
/// satellite of the deployment mix is priced instead.
fn orbital_cost(snapshot: &FleetSnapshot) -> f64 {
    let learning = learning_multiplier(snapshot.cumulative_launched);
    if snapshot.effective_compute_pflops > MIN_COMPUTE_PFLOPS {
        let counts = [snapshot.alive_by_class[0] as f64, snapshot.alive_by_class[1] as f64];
        return annualized_cost(&snapshot.designs, counts, snapshot.launch_cost_per_kg_usd_m)
            * learning
            / snapshot.effective_compute_pflops;
    }
    let b = snapshot.designs.class_b_fraction;
    let reference = annualized_cost(&snapshot.designs, [1.0 - b, b], snapshot.launch_cost_per_kg_usd_m);
    let reference_pflops = snapshot.designs.mix_average(|d| d.pflops).max(MIN_COMPUTE_PFLOPS);
    reference * learning / reference_pflops
}

pub fn calculate(snapshot: &FleetSnapshot, ground: &GroundBaseline) -> EconomicMetrics {
    let demand = ground.demand_pflops.max(MIN_COMPUTE_PFLOPS);
    let raw_share = if snapshot.effective_compute_pflops.is_finite() {
        snapshot.effective_compute_pflops.max(0.0) / demand
    } else {
        0.0
    };
    let orbital_share = raw_share.min(MAX_ORBITAL_SHARE);
    let ground_share = 1.0 - orbital_share;
    if !(0.0..=MAX_ORBITAL_SHARE).contains(&orbital_share) {
        debug_assert!(false, "orbital share out of range: {orbital_share}");
        warn!(orbital_share, "orbital share out of range");
    }

    let cost_ground = ground.cost_per_pflop_usd_m;
    let cost_orbit = orbital_cost(snapshot);
    let cost_mix = ground_share * cost_ground + orbital_share * cost_orbit;

    let latency_ground = ground.latency_ms;
    let latency_orbit = 2.0 * snapshot.shell_latency_ms + GROUND_SEGMENT_LATENCY_MS;
    let w = orbital_share * orbital_share;
    let latency_mix = (1.0 - w) * latency_ground + w * latency_orbit;

    let carbon_ground = ground.carbon_per_pflop_kg;
    let carbon_orbit = orbital_carbon(
        snapshot.years_elapsed,
        snapshot.carbon_amortization,
        snapshot.cumulative_launched,
    );
    let carbon_mix = ground_share * carbon_ground + orbital_share * carbon_orbit;

    EconomicMetrics {
        demand_pflops: ground.demand_pflops,
        orbital_share,
        ground_share,
        cost_per_compute_ground: cost_ground,
        cost_per_compute_orbit: cost_orbit,
        cost_per_compute_mix: cost_mix,
        latency_ground_ms: latency_ground,
        latency_orbit_ms: latency_orbit,
        latency_mix_ms: latency_mix,
        opex_ground: cost_ground * ground.demand_pflops,
        opex_mix: cost_mix * ground.demand_pflops,
        carbon_ground,
        carbon_orbit,
        carbon_mix,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StrategyMode;

    fn snapshot(effective: f64, alive: [u32; 2], cumulative: u64, years: u32) -> FleetSnapshot {
        FleetSnapshot {
            years_elapsed: years,
            effective_compute_pflops: effective,
            alive_by_class: alive,
            designs: DesignSet::new(StrategyMode::Balanced, years, 0.5),
            launch_cost_per_kg_usd_m: 0.001,
            cumulative_launched: cumulative,
            shell_latency_ms: 8.0,
            carbon_amortization: 1.0,
        }
    }

    #[test]
    fn ground_baseline_compounds() {
        let params = GroundBaselineParams::default();
        let g0 = GroundBaseline::for_year(&params, 0);
        let g10 = GroundBaseline::for_year(&params, 10);
        assert_eq!(g0.demand_pflops, 10_000.0);
        assert!((g10.demand_pflops - 10_000.0 * 1.18f64.powi(10)).abs() < 1e-6);
        assert!(g10.cost_per_pflop_usd_m < g0.cost_per_pflop_usd_m);
        assert!(g10.carbon_per_pflop_kg < g0.carbon_per_pflop_kg);
    }

    #[test]
    fn no_orbital_compute_means_mix_equals_ground() {
        let ground = GroundBaseline::for_year(&GroundBaselineParams::default(), 3);
        let m = calculate(&snapshot(0.0, [0, 0], 0, 3), &ground);
        assert_eq!(m.orbital_share, 0.0);
        assert_eq!(m.ground_share, 1.0);
        assert_eq!(m.cost_per_compute_mix, m.cost_per_compute_ground);
        assert_eq!(m.latency_mix_ms, m.latency_ground_ms);
        assert_eq!(m.carbon_mix, m.carbon_ground);
        assert_eq!(m.opex_mix, m.opex_ground);
        assert!(m.cost_per_compute_orbit.is_finite());
    }

    #[test]
    fn share_is_capped() {
        let ground = GroundBaseline::for_year(&GroundBaselineParams::default(), 0);
        let m = calculate(&snapshot(1e9, [1_000, 1_000], 2_000, 0), &ground);
        assert_eq!(m.orbital_share, MAX_ORBITAL_SHARE);
        assert!((m.orbital_share + m.ground_share - 1.0).abs() < 1e-12);
    }

    #[test]
    fn latency_mix_weights_by_share_squared() {
        let ground = GroundBaseline::for_year(&GroundBaselineParams::default(), 0);
        let m = calculate(&snapshot(5_000.0, [100, 100], 200, 0), &ground);
        assert_eq!(m.orbital_share, 0.5);
        assert_eq!(m.latency_orbit_ms, 22.0);
        assert!((m.latency_mix_ms - (0.75 * 35.0 + 0.25 * 22.0)).abs() < 1e-12);
    }

    #[test]
    fn learning_only_discounts() {
        assert_eq!(learning_multiplier(0), 1.0);
        assert_eq!(learning_multiplier(100), 1.0);
        assert!((learning_multiplier(200) - 0.85).abs() < 1e-12);
        assert!((learning_multiplier(400) - 0.85 * 0.85).abs() < 1e-12);
    }

    #[test]
    fn orbital_carbon_is_monotone_and_crosses_ground() {
        let params = GroundBaselineParams::default();
        let mut cumulative = 0u64;
        let mut prev = f64::INFINITY;
        let mut crossed = false;
        for t in 0..25u32 {
            cumulative += 150 * 1.25f64.powi(t as i32).round() as u64;
            let orbit = orbital_carbon(t, 1.0, cumulative);
            assert!(orbit <= prev, "orbital carbon rose in year {t}");
            prev = orbit;
            if orbit < GroundBaseline::for_year(&params, t).carbon_per_pflop_kg {
                crossed = true;
            }
        }
        assert!(crossed);
        assert!(orbital_carbon(0, 1.0, 0) > params.carbon_per_pflop_kg);
    }
}
