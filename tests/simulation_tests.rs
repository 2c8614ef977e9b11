#[cfg(test)]
mod tests {
    use orbital_compute_engine::config::{ConfigError, SimulationConfig};
    use orbital_compute_engine::{
        simulate, ConstraintKind, DeploymentSimulator, ScenarioMode, SimulationResult, StrategyMode,
    };

    fn run(config: &SimulationConfig) -> SimulationResult {
        simulate(config).expect("test: config must be valid")
    }

    fn matrix() -> Vec<SimulationConfig> {
        let mut configs = Vec::new();
        for scenario in ScenarioMode::ALL {
            for strategy in StrategyMode::ALL {
                configs.push(SimulationConfig {
                    strategy_mode: strategy,
                    scenario_mode: scenario,
                    ..SimulationConfig::default()
                });
            }
        }
        configs
    }

    // ========== Shares ==========

    #[test]
    fn test_shares_bounded_and_complementary() {
        for config in matrix() {
            for step in run(&config).timeline {
                assert!(
                    (0.0..=0.9).contains(&step.orbital_share),
                    "{:?}/{:?} {}: share {}",
                    config.strategy_mode, config.scenario_mode, step.year, step.orbital_share
                );
                assert!((step.orbital_share + step.ground_share - 1.0).abs() < 1e-12);
            }
        }
    }

    // ========== Physical Limits ==========

    #[test]
    fn test_heat_utilization_never_exceeds_one() {
        let mut configs = matrix();
        let mut stressed = SimulationConfig::default();
        stressed.pod_spec.pods_per_year = 2_000.0;
        stressed.pod_spec.growth_rate = 0.40;
        stressed.horizon_years = 60;
        configs.push(stressed);

        for config in configs {
            for step in run(&config).timeline {
                assert!(step.heat_utilization_pct <= 100.0, "{}: {}", step.year, step.heat_utilization_pct);
                assert!(step.constraints.thermal_derating <= 1.0);
                assert!(step.backhaul_utilization_pct <= 100.0);
                assert!(step.spectrum_utilization_pct <= 100.0);
            }
        }
    }

    #[test]
    fn test_effective_compute_never_exceeds_raw() {
        for config in matrix() {
            for step in run(&config).timeline {
                assert!(
                    step.fleet.effective_compute_pflops <= step.fleet.raw_compute_pflops,
                    "{}: effective {} > raw {}",
                    step.year, step.fleet.effective_compute_pflops, step.fleet.raw_compute_pflops
                );
                assert!(step.fleet.effective_compute_pflops >= 0.0);
            }
        }
    }

    #[test]
    fn test_effective_compute_is_product_of_factors() {
        for config in matrix() {
            for step in run(&config).timeline {
                let c = &step.constraints;
                let expected = step.fleet.raw_compute_pflops
                    * c.thermal_derating
                    * c.spectrum_derating
                    * c.backhaul_derating
                    * c.survival_fraction;
                let effective = step.fleet.effective_compute_pflops;
                assert!(
                    (effective - expected).abs() <= 1e-9 * expected.abs(),
                    "{:?}/{:?} {}: effective {} vs product {}",
                    config.strategy_mode, config.scenario_mode, step.year, effective, expected
                );
                assert_eq!(step.survival_fraction, c.survival_fraction);
            }
        }
    }

    #[test]
    fn test_heat_derating_lowers_cost_strategy_compute() {
        let config = SimulationConfig { strategy_mode: StrategyMode::Cost, ..SimulationConfig::default() };
        let result = run(&config);
        let throttled: Vec<_> = result
            .timeline
            .iter()
            .filter(|s| s.constraints.thermal_derating < 1.0)
            .collect();
        assert!(!throttled.is_empty(), "trimmed radiators should overheat class B");
        for step in throttled {
            assert!(
                step.fleet.effective_compute_pflops < step.fleet.raw_compute_pflops,
                "{}: thermal derating {} left compute untouched",
                step.year, step.constraints.thermal_derating
            );
            assert!(step.heat_utilization_pct <= 100.0);
        }
    }

    #[test]
    fn test_survival_never_below_floor() {
        for config in matrix() {
            for step in run(&config).timeline {
                assert!(step.survival_fraction >= 0.1 && step.survival_fraction <= 1.0);
            }
        }
    }

    // ========== Carbon ==========

    #[test]
    fn test_ground_carbon_monotone_and_orbit_crosses_below() {
        let result = run(&SimulationConfig::default());
        for pair in result.timeline.windows(2) {
            assert!(pair[1].carbon_ground <= pair[0].carbon_ground, "ground carbon rose in {}", pair[1].year);
            assert!(pair[1].carbon_orbit <= pair[0].carbon_orbit, "orbital carbon rose in {}", pair[1].year);
        }
        let first = &result.timeline[0];
        assert!(first.carbon_orbit > first.carbon_ground, "orbit should start dirtier than ground");
        let crossover = result.carbon_crossover_year().expect("test: orbit must cross below ground");
        assert!(crossover > first.year);
    }

    #[test]
    fn test_carbon_crossover_in_every_combination() {
        for config in matrix() {
            let result = run(&config);
            assert!(
                result.carbon_crossover_year().is_some(),
                "{:?}/{:?} never crossed",
                config.strategy_mode, config.scenario_mode
            );
        }
    }

    // ========== Edge Scenarios ==========

    #[test]
    fn test_zero_pods_mix_equals_ground() {
        let mut config = SimulationConfig::default();
        config.pod_spec.pods_per_year = 0.0;
        for step in run(&config).timeline {
            assert_eq!(step.orbital_share, 0.0);
            assert_eq!(step.ground_share, 1.0);
            assert_eq!(step.cost_per_compute_mix, step.cost_per_compute_ground);
            assert_eq!(step.latency_mix_ms, step.latency_ground_ms);
            assert_eq!(step.carbon_mix, step.carbon_ground);
            assert_eq!(step.opex_mix, step.opex_ground);
            assert_eq!(step.satellites_requested, 0);
            assert!(!step.constraint_binding);
        }
    }

    #[test]
    fn test_zero_launches_add_nothing() {
        for strategy in StrategyMode::ALL {
            let mut config = SimulationConfig { strategy_mode: strategy, ..SimulationConfig::default() };
            config.launch_cadence.launches_per_year = 0.0;
            for step in run(&config).timeline {
                assert_eq!(step.constraints.mass_ceiling, 0);
                assert_eq!(step.satellites_added, 0, "{:?} added satellites in {}", strategy, step.year);
                assert_eq!(step.satellites_rejected, step.satellites_requested);
                assert_eq!(step.fleet.alive_count(), 0);
                assert_eq!(step.dominant_constraint, ConstraintKind::Launch);
            }
        }
    }

    #[test]
    fn test_fully_unrecoverable_failures_never_repaired() {
        let config = SimulationConfig { unrecoverable_fraction: Some(1.0), ..SimulationConfig::default() };
        let result = run(&config);
        let mut saw_failures = false;
        for step in &result.timeline {
            assert_eq!(step.repairs, 0, "{}: repaired with no recoverable failures", step.year);
            assert_eq!(step.permanent_losses, step.failures);
            saw_failures |= step.failures > 0;
        }
        assert!(saw_failures, "scenario should produce failures");
    }

    #[test]
    fn test_unit_derating_never_tagged_dominant() {
        for config in matrix() {
            for step in run(&config).timeline {
                let c = &step.constraints;
                let factor = match step.dominant_constraint {
                    ConstraintKind::Heat => c.thermal_derating,
                    ConstraintKind::Backhaul => c.backhaul_derating,
                    ConstraintKind::Spectrum => c.spectrum_derating,
                    ConstraintKind::Launch | ConstraintKind::Autonomy => continue,
                };
                assert!(
                    factor < 1.0,
                    "{}: {:?} tagged dominant with factor {}",
                    step.year, step.dominant_constraint, factor
                );
            }
        }
    }

    #[test]
    fn test_slack_first_year_tags_count_ceiling() {
        let config = SimulationConfig { strategy_mode: StrategyMode::Carbon, ..SimulationConfig::default() };
        let first = run(&config).timeline.remove(0);
        assert!(!first.constraint_binding);
        assert_eq!(first.constraints.thermal_derating, 1.0);
        assert!(matches!(first.dominant_constraint, ConstraintKind::Launch | ConstraintKind::Autonomy));
    }

    #[test]
    fn test_aggressive_plan_is_constrained_not_an_error() {
        let mut config = SimulationConfig::default();
        config.pod_spec.pods_per_year = 2_000.0;
        let result = run(&config);
        let first = &result.timeline[0];
        assert!(first.satellites_rejected > 0);
        assert_eq!(first.satellites_added, first.constraints.mass_ceiling);
        assert_eq!(first.dominant_constraint, ConstraintKind::Launch);
        assert!(first.constraint_binding);
    }

    // ========== Bookkeeping ==========

    #[test]
    fn test_fleet_accounting_balances() {
        for config in matrix() {
            for step in run(&config).timeline {
                let f = &step.fleet;
                assert_eq!(f.alive_count() as u64, f.cumulative_launched - f.cumulative_losses);
                assert_eq!(f.shell_alive.iter().sum::<u32>(), f.alive_count());
                assert_eq!(step.satellites_added + step.satellites_rejected, step.satellites_requested);
            }
        }
    }

    #[test]
    fn test_simulation_is_deterministic() {
        let config = SimulationConfig {
            strategy_mode: StrategyMode::Carbon,
            scenario_mode: ScenarioMode::OrbitalBear,
            ..SimulationConfig::default()
        };
        assert_eq!(run(&config), run(&config));
    }

    #[test]
    fn test_stepping_matches_simulate() {
        let config = SimulationConfig { horizon_years: 12, ..SimulationConfig::default() };
        let mut sim = DeploymentSimulator::from_config(config.clone()).expect("test: valid config");
        let mut stepped = Vec::new();
        while let Some(step) = sim.step_core() {
            stepped.push(step.clone());
        }
        assert_eq!(stepped, run(&config).timeline);
    }

    #[test]
    fn test_json_config_round_trip() {
        let json = r#"{
            "start_year": 2030,
            "horizon_years": 15,
            "strategy_mode": "LATENCY",
            "scenario_mode": "ORBITAL_BULL",
            "pod_spec": { "pod_type": "b", "pods_per_year": 80 },
            "launch_cadence": { "launches_per_year": 30 }
        }"#;
        let config = SimulationConfig::from_json(json).expect("test: json config parses");
        let result = run(&config);
        assert_eq!(result.timeline.len(), 15);
        assert_eq!(result.timeline[0].year, 2030);
        assert_eq!(result.final_step().map(|s| s.year), Some(2044));
        // Class B only
        assert!(result.timeline.iter().all(|s| s.fleet.class_a_alive == 0));

        let out = serde_json::to_string(&result.timeline[0]).expect("test: serializes");
        assert!(out.contains("\"dominant_constraint\":\""));
        assert!(out.contains("\"satellites_added\":"));
    }

    #[test]
    fn test_overflowing_start_year_rejected_before_run() {
        let config = SimulationConfig { start_year: i32::MAX - 3, ..SimulationConfig::default() };
        let err = simulate(&config).expect_err("test: calendar overflow must be rejected");
        assert!(matches!(err, ConfigError::InvalidStartYear { horizon: 25, .. }));
        assert!(DeploymentSimulator::from_config(config).is_err());

        let short = SimulationConfig { start_year: i32::MAX - 3, horizon_years: 3, ..SimulationConfig::default() };
        let result = run(&short);
        assert_eq!(result.final_step().map(|s| s.year), Some(i32::MAX - 1));
    }

    #[test]
    fn test_unknown_pod_type_rejected_before_run() {
        let err = SimulationConfig::from_json(r#"{ "pod_spec": { "pod_type": "C" } }"#)
            .expect_err("test: pod type C does not exist");
        assert!(err.to_string().contains("unknown pod type"));
    }
}
