// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Orbital Compute Simulation Suite - Year-Stepped Deployment Simulator

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;

use crate::config::{ConfigError, SimulationConfig};
use crate::constraints::ConstraintEngine;
use crate::economics::{self, FleetSnapshot, GroundBaseline};
use crate::fleet::{self, DesignSet, SHELLS};
use crate::types::*;

// ─── DeploymentSimulator struct ──────────────────────────────────────────────

/// One deterministic run, advanced a year at a time. The timeline is
/// append-only; records are never revisited once pushed.
#[wasm_bindgen]
pub struct DeploymentSimulator {
    pub(crate) config: SimulationConfig,
    pub(crate) engine: ConstraintEngine,
    pub(crate) fleet: FleetState,
    pub(crate) timeline: Vec<YearStep>,
    pub(crate) years_elapsed: u32,
}

// ─── Internal Logic (Testable, pure Rust) ────────────────────────────────────

impl DeploymentSimulator {
    pub fn from_config(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let engine = ConstraintEngine::new(&config);
        let fleet = FleetState {
            shell_alive: vec![0; SHELLS.len()],
            ..FleetState::default()
        };
        Ok(Self {
            timeline: Vec::with_capacity(config.horizon_years as usize),
            config,
            engine,
            fleet,
            years_elapsed: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn is_finished(&self) -> bool {
        self.years_elapsed >= self.config.horizon_years
    }

    pub fn timeline(&self) -> &[YearStep] {
        &self.timeline
    }

    pub fn fleet(&self) -> &FleetState {
        &self.fleet
    }

    /// Simulate the next year. Returns `None` once the horizon is reached.
    pub fn step_core(&mut self) -> Option<&YearStep> {
        if self.is_finished() {
            return None;
        }
        let t = self.years_elapsed;
        let year = self.config.start_year + t as i32;
        let strategy = self.config.strategy_mode;
        let designs = DesignSet::new(strategy, t, self.config.pod_spec.pod_type.class_b_fraction());

        // 1. Plan
        let requested = self.requested_satellites(t);
        let alive_before = self.fleet.alive_count();

        // 2. Count-type ceilings clamp additions; shells absorb what fits
        let limits = self.engine.addition_limits(&designs, t, alive_before);
        let allowed = requested.min(limits.max_additions());
        let placed = fleet::place_in_shells(&mut self.fleet.shell_alive, allowed, strategy);
        let [add_a, add_b] = designs.split(placed);
        self.fleet.class_a_alive += add_a;
        self.fleet.class_b_alive += add_b;
        self.fleet.cumulative_launched += placed as u64;
        let rejected = requested - placed;

        // 3. Operating fleet: raw compute, derating limits, maintenance
        let operating = self.fleet.alive_by_class();
        let solar = fleet::occupancy_weighted(&self.fleet.shell_alive, strategy, |s| s.solar_efficiency);
        let raw_compute = raw_compute_pflops(&designs, operating, solar);
        let total_power_kw: f64 = designs
            .designs
            .iter()
            .zip(operating)
            .map(|(d, n)| d.power_kw * n as f64)
            .sum();

        let conditions =
            self.engine.operating_conditions(&designs, t, operating, raw_compute, limits.autonomy_level);
        let report = self.engine.report(&limits, &conditions, alive_before, requested);

        // 4. Effective compute
        let mut effective_compute = raw_compute
            * report.thermal_derating
            * report.spectrum_derating
            * report.backhaul_derating
            * report.survival_fraction;
        if effective_compute > raw_compute {
            debug_assert!(false, "effective compute {effective_compute} above raw {raw_compute}");
            warn!(year, effective_compute, raw_compute, "effective compute above raw, clamping");
            effective_compute = raw_compute;
        }

        // 5. Economics on the operating fleet
        let shell_latency_ms =
            fleet::occupancy_weighted(&self.fleet.shell_alive, strategy, |s| s.latency_ms);
        let carbon_amortization = fleet::occupancy_weighted(&self.fleet.shell_alive, strategy, |s| {
            s.carbon_amortization_factor
        });
        let snapshot = FleetSnapshot {
            years_elapsed: t,
            effective_compute_pflops: effective_compute,
            alive_by_class: operating,
            designs,
            launch_cost_per_kg_usd_m: limits
                .launch
                .cost_per_kg_usd_m(self.config.launch_cadence.max_payload_kg),
            cumulative_launched: self.fleet.cumulative_launched,
            shell_latency_ms,
            carbon_amortization,
        };
        let ground = GroundBaseline::for_year(&self.config.ground, t);
        let metrics = economics::calculate(&snapshot, &ground);

        // Permanent losses leave the fleet at year end
        let m = conditions.maintenance;
        let mut classes = [self.fleet.class_a_alive, self.fleet.class_b_alive];
        fleet::remove_proportionally(&mut classes, m.permanent_losses);
        fleet::remove_proportionally(&mut self.fleet.shell_alive, m.permanent_losses);
        self.fleet.class_a_alive = classes[0];
        self.fleet.class_b_alive = classes[1];
        self.fleet.cumulative_failures += m.failures as u64;
        self.fleet.cumulative_repairs += m.repaired as u64;
        self.fleet.cumulative_losses += m.permanent_losses as u64;
        self.fleet.total_power_kw = total_power_kw;
        self.fleet.raw_compute_pflops = raw_compute;
        self.fleet.effective_compute_pflops = effective_compute;

        debug!(
            year,
            requested,
            added = placed,
            rejected,
            dominant = ?report.dominant,
            binding = report.binding,
            orbital_share = metrics.orbital_share,
            "simulated year"
        );

        // 6. Record
        self.timeline.push(YearStep {
            year,
            orbital_share: metrics.orbital_share,
            ground_share: metrics.ground_share,
            cost_per_compute_ground: metrics.cost_per_compute_ground,
            cost_per_compute_orbit: metrics.cost_per_compute_orbit,
            cost_per_compute_mix: metrics.cost_per_compute_mix,
            latency_ground_ms: metrics.latency_ground_ms,
            latency_orbit_ms: metrics.latency_orbit_ms,
            latency_mix_ms: metrics.latency_mix_ms,
            opex_ground: metrics.opex_ground,
            opex_mix: metrics.opex_mix,
            carbon_ground: metrics.carbon_ground,
            carbon_orbit: metrics.carbon_orbit,
            carbon_mix: metrics.carbon_mix,
            demand_pflops: metrics.demand_pflops,
            dominant_constraint: report.dominant,
            constraint_binding: report.binding,
            survival_fraction: report.survival_fraction,
            heat_utilization_pct: conditions.thermal.utilization * 100.0,
            backhaul_utilization_pct: conditions.backhaul.utilization * 100.0,
            spectrum_utilization_pct: conditions.spectrum.utilization * 100.0,
            satellites_requested: requested,
            satellites_added: placed,
            satellites_rejected: rejected,
            failures: m.failures,
            repairs: m.repaired,
            permanent_losses: m.permanent_losses,
            fleet: self.fleet.clone(),
            constraints: report,
        });
        self.years_elapsed += 1;
        self.timeline.last()
    }

    pub fn run_to_horizon(&mut self) -> &[YearStep] {
        while self.step_core().is_some() {}
        &self.timeline
    }

    pub fn into_result(self) -> SimulationResult {
        SimulationResult { config: self.config, timeline: self.timeline }
    }

    fn requested_satellites(&self, years_elapsed: u32) -> u32 {
        let pod = &self.config.pod_spec;
        let n = pod.pods_per_year
            * (1.0 + pod.growth_rate).powi(years_elapsed as i32)
            * pod.satellites_per_pod as f64;
        if n.is_finite() && n > 0.0 {
            n.round().min(u32::MAX as f64) as u32
        } else {
            0
        }
    }
}

/// Theoretical compute of the operating fleet before any derating.
pub(crate) fn raw_compute_pflops(designs: &DesignSet, alive_by_class: [u32; 2], solar_efficiency: f64) -> f64 {
    designs
        .designs
        .iter()
        .zip(alive_by_class)
        .map(|(d, n)| n as f64 * d.pflops)
        .sum::<f64>()
        * solar_efficiency.clamp(0.0, 1.0)
}

// ─── SimulationResult ────────────────────────────────────────────────────────

/// A finished run. Owned by the caller; nothing is cached between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub config: SimulationConfig,
    pub timeline: Vec<YearStep>,
}

impl SimulationResult {
    pub fn step_for_year(&self, year: i32) -> Option<&YearStep> {
        let idx = year.checked_sub(self.config.start_year)?;
        self.timeline.get(usize::try_from(idx).ok()?)
    }

    pub fn final_step(&self) -> Option<&YearStep> {
        self.timeline.last()
    }

    /// First year orbital compute is cheaper than ground compute.
    pub fn cost_crossover_year(&self) -> Option<i32> {
        self.timeline
            .iter()
            .find(|s| s.fleet.alive_count() > 0 && s.cost_per_compute_orbit < s.cost_per_compute_ground)
            .map(|s| s.year)
    }

    /// First year orbital compute emits less carbon than ground compute.
    pub fn carbon_crossover_year(&self) -> Option<i32> {
        self.timeline
            .iter()
            .find(|s| s.fleet.alive_count() > 0 && s.carbon_orbit < s.carbon_ground)
            .map(|s| s.year)
    }

    /// Years each constraint dominated, binding or not.
    pub fn dominant_constraint_counts(&self) -> BTreeMap<ConstraintKind, u32> {
        let mut counts = BTreeMap::new();
        for step in &self.timeline {
            *counts.entry(step.dominant_constraint).or_insert(0) += 1;
        }
        counts
    }
}

/// Run a configuration to its horizon.
pub fn simulate(config: &SimulationConfig) -> Result<SimulationResult, ConfigError> {
    let mut sim = DeploymentSimulator::from_config(config.clone())?;
    sim.run_to_horizon();
    let result = sim.into_result();
    if let Some(last) = result.final_step() {
        info!(
            strategy = config.strategy_mode.label(),
            scenario = config.scenario_mode.label(),
            years = result.timeline.len(),
            final_orbital_share = last.orbital_share,
            alive = last.fleet.alive_count(),
            "simulation complete"
        );
    }
    Ok(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
