// Benchmark Report Types
// Structured output for independent analysis of simulator and forecast runs

use serde::Serialize;
use std::collections::BTreeMap;

// ─── Statistics (per-metric aggregation across seeds) ───────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let stderr = std_dev / (n as f64).sqrt();
        let z = 1.96; // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - z * stderr,
            ci_upper: mean + z * stderr,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }

    pub fn half_width(&self) -> f64 {
        (self.ci_upper - self.ci_lower) / 2.0
    }
}

// ─── Deterministic Scenario Result ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario: String,
    pub label: String,
    pub category: String,
    pub strategy: String,
    pub scenario_mode: String,
    pub pass: bool,
    pub failures: Vec<String>,
    pub years: usize,
    pub final_orbital_share: f64,
    pub max_orbital_share: f64,
    pub max_heat_utilization_pct: f64,
    pub final_alive: u32,
    pub cumulative_launched: u64,
    pub cumulative_losses: u64,
    pub satellites_rejected: u64,
    pub cost_crossover_year: Option<i32>,
    pub carbon_crossover_year: Option<i32>,
    pub dominant_constraints: BTreeMap<String, u32>,
    pub binding_years: u32,
    pub elapsed_ms: u128,
}

// ─── Forecast Result (per scenario mode, across seeds) ──────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ForecastSeries {
    pub scenario_mode: String,
    pub n_sims: usize,
    pub seeds: Vec<u64>,
    pub horizon_year: i32,
    pub probability_orbit_cheaper: Stats,
    pub terminal_orbit_cost_p50: Stats,
    pub terminal_ground_cost_p50: Stats,
    pub sentiment_labels: Vec<String>,
    pub elapsed_ms: Stats,
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub summary: Summary,
    pub scenarios: Vec<ScenarioResult>,
    pub forecasts: Vec<ForecastSeries>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_constant_samples() {
        let s = Stats::from_samples(&[0.5, 0.5, 0.5]);
        assert_eq!(s.mean, 0.5);
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.half_width(), 0.0);
        assert_eq!(s.n, 3);
    }

    #[test]
    fn stats_of_empty_samples() {
        let s = Stats::from_samples(&[]);
        assert_eq!(s.n, 0);
        assert_eq!(s.mean, 0.0);
    }
}
