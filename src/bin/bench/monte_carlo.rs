// Scenario and Forecast Runners
// Deterministic runs are checked against pass criteria; forecasts run K seeds
// per scenario mode and report mean ± 95% CI of the crossover probability

use orbital_compute_engine::config::{ConfigError, SimulationConfig};
use orbital_compute_engine::forecast::{self, ForecastConfig, ForecastParams};
use orbital_compute_engine::{simulate, ScenarioMode, SimulationResult};
use tracing::warn;

use crate::report::*;
use crate::scenarios::Scenario;
use crate::time_series::TimelineRecorder;

use std::path::Path;
use std::time::Instant;

/// Run one deterministic scenario and evaluate its pass criteria.
pub fn run_single(
    scenario: &Scenario,
    base: &SimulationConfig,
    time_series_dir: Option<&Path>,
) -> Result<ScenarioResult, ConfigError> {
    let start = Instant::now();
    let config = scenario.config(base);
    let result = simulate(&config)?;
    let elapsed_ms = start.elapsed().as_millis();

    if let Some(dir) = time_series_dir {
        let path = dir.join(format!("{}.jsonl", scenario.name.to_lowercase()));
        if let Err(e) = TimelineRecorder::from_timeline(&result.timeline).write_jsonl(&path) {
            warn!(path = %path.display(), error = %e, "failed to write time series");
        }
    }

    let failures = evaluate(scenario, &result);
    let timeline = &result.timeline;
    let last = result.final_step();

    Ok(ScenarioResult {
        scenario: scenario.name.clone(),
        label: scenario.label.clone(),
        category: scenario.category.to_string(),
        strategy: config.strategy_mode.label().to_string(),
        scenario_mode: config.scenario_mode.label().to_string(),
        pass: failures.is_empty(),
        failures,
        years: timeline.len(),
        final_orbital_share: last.map(|s| s.orbital_share).unwrap_or(0.0),
        max_orbital_share: timeline.iter().map(|s| s.orbital_share).fold(0.0, f64::max),
        max_heat_utilization_pct: timeline.iter().map(|s| s.heat_utilization_pct).fold(0.0, f64::max),
        final_alive: last.map(|s| s.fleet.alive_count()).unwrap_or(0),
        cumulative_launched: last.map(|s| s.fleet.cumulative_launched).unwrap_or(0),
        cumulative_losses: last.map(|s| s.fleet.cumulative_losses).unwrap_or(0),
        satellites_rejected: timeline.iter().map(|s| s.satellites_rejected as u64).sum(),
        cost_crossover_year: result.cost_crossover_year(),
        carbon_crossover_year: result.carbon_crossover_year(),
        dominant_constraints: result
            .dominant_constraint_counts()
            .into_iter()
            .map(|(k, v)| (format!("{:?}", k).to_uppercase(), v))
            .collect(),
        binding_years: timeline.iter().filter(|s| s.constraint_binding).count() as u32,
        elapsed_ms,
    })
}

fn evaluate(scenario: &Scenario, result: &SimulationResult) -> Vec<String> {
    let c = &scenario.criteria;
    let mut failures = Vec::new();

    for s in &result.timeline {
        if !(0.0..=c.max_orbital_share).contains(&s.orbital_share) {
            failures.push(format!("{}: orbital share {} out of range", s.year, s.orbital_share));
        }
        if (s.orbital_share + s.ground_share - 1.0).abs() > 1e-12 {
            failures.push(format!("{}: shares do not sum to 1", s.year));
        }
        if c.require_heat_clamp && s.heat_utilization_pct > 100.0 {
            failures.push(format!("{}: heat utilization {}%", s.year, s.heat_utilization_pct));
        }
        if c.require_effective_le_raw && s.fleet.effective_compute_pflops > s.fleet.raw_compute_pflops {
            failures.push(format!("{}: effective compute above raw", s.year));
        }
        if c.require_zero_additions && s.satellites_added > 0 {
            failures.push(format!("{}: {} satellites added", s.year, s.satellites_added));
        }
        if c.require_mix_equals_ground
            && (s.cost_per_compute_mix != s.cost_per_compute_ground
                || s.latency_mix_ms != s.latency_ground_ms
                || s.carbon_mix != s.carbon_ground
                || s.opex_mix != s.opex_ground)
        {
            failures.push(format!("{}: mix metrics differ from ground", s.year));
        }
        if c.require_zero_repairs && s.repairs > 0 {
            failures.push(format!("{}: {} repairs with no recoverable failures", s.year, s.repairs));
        }
    }

    if c.require_monotone_ground_carbon {
        for pair in result.timeline.windows(2) {
            if pair[1].carbon_ground > pair[0].carbon_ground {
                failures.push(format!("{}: ground carbon increased", pair[1].year));
            }
        }
    }
    if c.require_carbon_crossover && result.carbon_crossover_year().is_none() {
        failures.push("orbital carbon never crosses below ground".to_string());
    }

    failures
}

/// Run the forecast for one scenario mode under `seeds` consecutive seeds.
pub fn run_monte_carlo(
    scenario: ScenarioMode,
    n_sims: usize,
    horizon_years: u32,
    base_seed: u64,
    seeds: usize,
) -> Result<ForecastSeries, ConfigError> {
    let mut probabilities = Vec::with_capacity(seeds);
    let mut orbit_p50 = Vec::with_capacity(seeds);
    let mut ground_p50 = Vec::with_capacity(seeds);
    let mut elapsed = Vec::with_capacity(seeds);
    let mut labels = Vec::with_capacity(seeds);
    let mut used_seeds = Vec::with_capacity(seeds);
    let mut horizon_year = 0;

    for i in 0..seeds {
        let seed = base_seed + i as u64;
        let config = ForecastConfig {
            n_sims,
            horizon_years,
            seed,
            params: ForecastParams::for_scenario(scenario),
            ..ForecastConfig::default()
        };
        let start = Instant::now();
        let result = forecast::run_forecast(&config)?;
        elapsed.push(start.elapsed().as_secs_f64() * 1_000.0);

        let sentiment = result.sentiment();
        if let Some(last) = result.points.last() {
            horizon_year = last.year;
            orbit_p50.push(last.orbit_cost.p50);
            ground_p50.push(last.ground_cost.p50);
        }
        probabilities.push(result.probability_orbit_cheaper_by_horizon);
        labels.push(format!("{:?}", sentiment.sentiment_label).to_uppercase());
        used_seeds.push(seed);
    }

    Ok(ForecastSeries {
        scenario_mode: scenario.label().to_string(),
        n_sims,
        seeds: used_seeds,
        horizon_year,
        probability_orbit_cheaper: Stats::from_samples(&probabilities),
        terminal_orbit_cost_p50: Stats::from_samples(&orbit_p50),
        terminal_ground_cost_p50: Stats::from_samples(&ground_p50),
        sentiment_labels: labels,
        elapsed_ms: Stats::from_samples(&elapsed),
    })
}
