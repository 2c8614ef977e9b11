// Per-Year JSONL Time Series Recorder
// Outputs one JSON line per simulated year for independent analysis

use orbital_compute_engine::{ConstraintKind, YearStep};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct YearSnapshot {
    pub year: i32,
    pub orbital_share: f64,
    pub cost_per_compute_ground: f64,
    pub cost_per_compute_orbit: f64,
    pub cost_per_compute_mix: f64,
    pub latency_mix_ms: f64,
    pub carbon_ground: f64,
    pub carbon_orbit: f64,
    pub carbon_mix: f64,
    pub dominant_constraint: ConstraintKind,
    pub constraint_binding: bool,
    pub survival_fraction: f64,
    pub heat_utilization_pct: f64,
    pub backhaul_utilization_pct: f64,
    pub spectrum_utilization_pct: f64,
    pub satellites_added: u32,
    pub satellites_rejected: u32,
    pub alive: u32,
    pub raw_compute_pflops: f64,
    pub effective_compute_pflops: f64,
}

impl YearSnapshot {
    pub fn from_step(step: &YearStep) -> Self {
        Self {
            year: step.year,
            orbital_share: step.orbital_share,
            cost_per_compute_ground: step.cost_per_compute_ground,
            cost_per_compute_orbit: step.cost_per_compute_orbit,
            cost_per_compute_mix: step.cost_per_compute_mix,
            latency_mix_ms: step.latency_mix_ms,
            carbon_ground: step.carbon_ground,
            carbon_orbit: step.carbon_orbit,
            carbon_mix: step.carbon_mix,
            dominant_constraint: step.dominant_constraint,
            constraint_binding: step.constraint_binding,
            survival_fraction: step.survival_fraction,
            heat_utilization_pct: step.heat_utilization_pct,
            backhaul_utilization_pct: step.backhaul_utilization_pct,
            spectrum_utilization_pct: step.spectrum_utilization_pct,
            satellites_added: step.satellites_added,
            satellites_rejected: step.satellites_rejected,
            alive: step.fleet.alive_count(),
            raw_compute_pflops: step.fleet.raw_compute_pflops,
            effective_compute_pflops: step.fleet.effective_compute_pflops,
        }
    }
}

/// Time series recorder that accumulates snapshots and writes JSONL
pub struct TimelineRecorder {
    snapshots: Vec<YearSnapshot>,
}

impl TimelineRecorder {
    pub fn from_timeline(timeline: &[YearStep]) -> Self {
        Self { snapshots: timeline.iter().map(YearSnapshot::from_step).collect() }
    }

    /// Write all snapshots to a JSONL file
    pub fn write_jsonl(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        for snapshot in &self.snapshots {
            let line = serde_json::to_string(snapshot)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }
}
