// Orbital Compute Benchmark Runner v0.1.0
// Strategy × scenario matrix through the deterministic simulator, plus the
// Monte Carlo forecast over K seeds per scenario mode
//
// Usage:
//   cargo run --release --bin bench                        # Full matrix, 1000 sims × 5 seeds
//   cargo run --release --bin bench -- --sims 200          # Quick forecast mode
//   cargo run --release --bin bench -- --seeds 10          # More seeds per scenario mode
//   cargo run --release --bin bench -- --seed 42           # Custom base seed
//   cargo run --release --bin bench -- --config base.json  # Base SimulationConfig
//   cargo run --release --bin bench -- --time-series       # Enable JSONL output
//   cargo run --release --bin bench -- CARBON              # Filter by name

mod report;
mod scenarios;
mod monte_carlo;
mod time_series;

use orbital_compute_engine::config::SimulationConfig;
use orbital_compute_engine::ScenarioMode;
use report::*;
use scenarios::*;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{error, info};

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    sims: usize,
    seed: u64,
    seeds: usize,
    config: Option<String>,
    time_series: bool,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        sims: 1_000,
        seed: 42,
        seeds: 5,
        config: None,
        time_series: false,
        filter: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--sims" => {
                i += 1;
                if i < args.len() {
                    cli.sims = args[i].parse().unwrap_or(1_000);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(42);
                }
            }
            "--seeds" => {
                i += 1;
                if i < args.len() {
                    cli.seeds = args[i].parse().unwrap_or(5);
                }
            }
            "--config" => {
                i += 1;
                if i < args.len() {
                    cli.config = Some(args[i].clone());
                }
            }
            "--time-series" => {
                cli.time_series = true;
            }
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

fn load_base_config(path: Option<&str>) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            let json = std::fs::read_to_string(p)?;
            Ok(SimulationConfig::from_json(&json)?)
        }
        None => Ok(SimulationConfig::default()),
    }
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "orbital_compute_engine=warn,bench=info".into()),
        )
        .init();

    let cli = parse_args();
    if let Err(e) = run(&cli) {
        error!("{}", e);
        std::process::exit(2);
    }
}

fn run(cli: &CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let base = load_base_config(cli.config.as_deref())?;
    let all_scenarios = scenarios();

    let to_run: Vec<&Scenario> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_scenarios.iter()
                .filter(|s| s.name.to_lowercase().contains(&f_lower)
                          || s.label.to_lowercase().contains(&f_lower)
                          || s.category.contains(&f_lower))
                .collect()
        }
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() {
        eprintln!("No scenarios match filter: {:?}", cli.filter);
        std::process::exit(1);
    }

    let ts_dir = if cli.time_series {
        Some(std::path::Path::new("benchmark-results/time-series").to_path_buf())
    } else {
        None
    };

    println!("\n  Orbital Compute Benchmark Runner v0.1.0");
    println!("  PRNG: ChaCha8Rng | Sims: {} | Seeds/mode: {} | Base seed: {}", cli.sims, cli.seeds, cli.seed);
    println!("  Horizon: {} → {} | Running {} scenario(s)...\n", base.start_year, base.end_year(), to_run.len());
    println!("  {:<28} {:>7} {:>7} {:>7} {:>8} {:>8} {:>7}",
        "Scenario", "Share", "Heat%", "Alive", "CostX", "CarbonX", "Time");
    println!("  {}", "-".repeat(84));

    let suite_start = Instant::now();
    let mut results = Vec::new();

    for scenario in &to_run {
        let r = monte_carlo::run_single(scenario, &base, ts_dir.as_deref())?;
        let year = |y: Option<i32>| y.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string());
        println!("  {:<28} {:>6.1}% {:>7.1} {:>7} {:>8} {:>8} {:>5}ms  {}",
            r.scenario,
            r.final_orbital_share * 100.0,
            r.max_heat_utilization_pct,
            r.final_alive,
            year(r.cost_crossover_year),
            year(r.carbon_crossover_year),
            r.elapsed_ms,
            if r.pass { "PASS" } else { "FAIL" },
        );
        for failure in r.failures.iter().take(3) {
            println!("      ↳ {}", failure);
        }
        results.push(r);
    }

    // ─── Forecast ───────────────────────────────────────────────────────

    let modes: Vec<ScenarioMode> = ScenarioMode::ALL
        .iter()
        .copied()
        .filter(|m| to_run.iter().any(|s| s.scenario == *m))
        .collect();

    println!("\n  {:<16} {:>14} {:>12} {:>12} {:>9}",
        "Forecast", "P(orbit<gnd)", "Orbit p50", "Ground p50", "Time");
    println!("  {}", "-".repeat(68));

    let mut forecasts = Vec::new();
    for mode in modes {
        let series = monte_carlo::run_monte_carlo(mode, cli.sims, base.horizon_years, cli.seed, cli.seeds)?;
        println!("  {:<16} {:>7.3}±{:<6.3} {:>12.3} {:>12.3} {:>7.0}ms",
            series.scenario_mode,
            series.probability_orbit_cheaper.mean,
            series.probability_orbit_cheaper.half_width(),
            series.terminal_orbit_cost_p50.mean,
            series.terminal_ground_cost_p50.mean,
            series.elapsed_ms.mean,
        );
        forecasts.push(series);
    }

    let suite_elapsed = suite_start.elapsed();

    // ─── Summary ────────────────────────────────────────────────────────

    let total = results.len();
    let passed = results.iter().filter(|r| r.pass).count();
    let failed = total - passed;

    println!("\n  {}", "-".repeat(84));
    println!("  Total: {}  Passed: {}  Failed: {}  Suite time: {:.1}s\n",
        total, passed, failed, suite_elapsed.as_secs_f64());

    // ─── Write JSON Report ──────────────────────────────────────────────

    let ts = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();
    let timestamp = format!("{}", ts);

    let report = BenchReport {
        timestamp: timestamp.clone(),
        version: "0.1.0",
        prng: "ChaCha8Rng",
        summary: Summary {
            total,
            passed,
            failed,
            pass_rate: passed as f64 / total as f64,
        },
        scenarios: results,
        forecasts,
    };

    let dir = std::path::Path::new("benchmark-results");
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("bench-{}.json", timestamp));
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&path, &json)?;
    info!(path = %path.display(), "results saved");
    println!("  Results saved to: {}\n", path.display());

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
