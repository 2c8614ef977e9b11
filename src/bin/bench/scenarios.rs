// Scenario Definitions — strategy × scenario matrix plus edge cases
// Every scenario is a SimulationConfig override; no engine changes per scenario

use orbital_compute_engine::config::SimulationConfig;
use orbital_compute_engine::{ScenarioMode, StrategyMode};

// ─── Scenario Configuration ─────────────────────────────────────────────────

pub struct Scenario {
    pub name: String,
    pub label: String,
    pub category: &'static str,
    pub strategy: StrategyMode,
    pub scenario: ScenarioMode,
    pub criteria: PassCriteria,
    /// Applied on top of the base configuration before the run.
    pub setup: Option<fn(&mut SimulationConfig)>,
}

impl Scenario {
    pub fn config(&self, base: &SimulationConfig) -> SimulationConfig {
        let mut config = base.clone();
        config.strategy_mode = self.strategy;
        config.scenario_mode = self.scenario;
        if let Some(setup) = self.setup {
            setup(&mut config);
        }
        config
    }
}

pub struct PassCriteria {
    pub max_orbital_share: f64,
    pub require_heat_clamp: bool,
    pub require_effective_le_raw: bool,
    pub require_monotone_ground_carbon: bool,
    pub require_carbon_crossover: bool,
    pub require_zero_additions: bool,
    pub require_mix_equals_ground: bool,
    pub require_zero_repairs: bool,
}

impl Default for PassCriteria {
    fn default() -> Self {
        Self {
            max_orbital_share: 0.9,
            require_heat_clamp: true,
            require_effective_le_raw: true,
            require_monotone_ground_carbon: true,
            require_carbon_crossover: false,
            require_zero_additions: false,
            require_mix_equals_ground: false,
            require_zero_repairs: false,
        }
    }
}

// ─── Setup Functions ────────────────────────────────────────────────────────

fn no_pods(config: &mut SimulationConfig) {
    config.pod_spec.pods_per_year = 0.0;
}

fn no_launches(config: &mut SimulationConfig) {
    config.launch_cadence.launches_per_year = 0.0;
}

fn worst_case_maintenance(config: &mut SimulationConfig) {
    config.unrecoverable_fraction = Some(1.0);
}

fn aggressive_plan(config: &mut SimulationConfig) {
    config.pod_spec.pods_per_year = 2_000.0;
    config.pod_spec.growth_rate = 0.40;
    config.horizon_years = 40;
}

// ─── Scenario Definitions ───────────────────────────────────────────────────

pub fn scenarios() -> Vec<Scenario> {
    let mut all = Vec::new();

    for scenario in ScenarioMode::ALL {
        for strategy in StrategyMode::ALL {
            all.push(Scenario {
                name: format!("{}_{}", strategy.label(), scenario.label()),
                label: format!("{} / {}", strategy.label(), scenario.label()),
                category: "matrix",
                strategy,
                scenario,
                criteria: PassCriteria {
                    require_carbon_crossover: true,
                    ..Default::default()
                },
                setup: None,
            });
        }
    }

    all.push(Scenario {
        name: "EDGE_ZERO_PODS".to_string(),
        label: "No orbital deployment".to_string(),
        category: "edge",
        strategy: StrategyMode::Balanced,
        scenario: ScenarioMode::Baseline,
        criteria: PassCriteria {
            require_zero_additions: true,
            require_mix_equals_ground: true,
            ..Default::default()
        },
        setup: Some(no_pods),
    });
    all.push(Scenario {
        name: "EDGE_ZERO_LAUNCHES".to_string(),
        label: "Launch market closed".to_string(),
        category: "edge",
        strategy: StrategyMode::Cost,
        scenario: ScenarioMode::OrbitalBull,
        criteria: PassCriteria {
            require_zero_additions: true,
            require_mix_equals_ground: true,
            ..Default::default()
        },
        setup: Some(no_launches),
    });
    all.push(Scenario {
        name: "EDGE_UNRECOVERABLE".to_string(),
        label: "Every failure unrecoverable".to_string(),
        category: "edge",
        strategy: StrategyMode::Balanced,
        scenario: ScenarioMode::OrbitalBear,
        criteria: PassCriteria { require_zero_repairs: true, ..Default::default() },
        setup: Some(worst_case_maintenance),
    });
    all.push(Scenario {
        name: "STRESS_AGGRESSIVE_PLAN".to_string(),
        label: "Plan far above every ceiling".to_string(),
        category: "stress",
        strategy: StrategyMode::Latency,
        scenario: ScenarioMode::OrbitalBull,
        criteria: PassCriteria::default(),
        setup: Some(aggressive_plan),
    });

    all
}
