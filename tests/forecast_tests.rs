#[cfg(test)]
mod tests {
    use orbital_compute_engine::forecast::{
        run_forecast, ChaChaStreams, ForecastConfig, ForecastParams, MonteCarloEngine, PolicyKind,
        Proportional, SentimentLabel, WorldState,
    };
    use orbital_compute_engine::{ForecastReport, ScenarioMode};

    fn quick(seed: u64) -> ForecastConfig {
        ForecastConfig { n_sims: 500, horizon_years: 15, seed, ..ForecastConfig::default() }
    }

    /// Orbit and ground identical in every respect except their independent shocks.
    fn symmetric(seed: u64) -> ForecastConfig {
        ForecastConfig {
            n_sims: 10_000,
            horizon_years: 10,
            seed,
            initial_state: WorldState {
                orbit_unit_cost: 2.0,
                ground_unit_cost: 2.0,
                orbit_capacity: 1_000.0,
                ground_capacity: 1_000.0,
                ..WorldState::default()
            },
            params: ForecastParams {
                orbit_learning_rate: 0.05,
                ground_learning_rate: 0.05,
                launch_pass_through: 0.0,
                energy_pass_through: 0.0,
                orbit_volatility: 0.10,
                ground_volatility: 0.10,
                orbit_carbon_intensity: 0.0003,
                ground_carbon_intensity: 0.0003,
                ..ForecastParams::default()
            },
            policy: PolicyKind::Proportional(Proportional { orbit_growth: 0.10, ground_growth: 0.10 }),
        }
    }

    // ========== Reproducibility ==========

    #[test]
    fn test_same_seed_same_result() {
        let a = run_forecast(&quick(7)).expect("test: valid forecast");
        let b = run_forecast(&quick(7)).expect("test: valid forecast");
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = run_forecast(&quick(7)).expect("test: valid forecast");
        let b = run_forecast(&quick(8)).expect("test: valid forecast");
        assert_ne!(a.points.last(), b.points.last());
    }

    #[test]
    fn test_result_independent_of_thread_count() {
        let config = quick(99);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .expect("test: single-thread pool");
        let single = pool.install(|| run_forecast(&config)).expect("test: valid forecast");
        let parallel = run_forecast(&config).expect("test: valid forecast");
        assert_eq!(single, parallel);
    }

    #[test]
    fn test_engine_with_explicit_policy_matches_config_policy() {
        let config = quick(3);
        let engine = MonteCarloEngine::new(&config, &config.policy, ChaChaStreams::new(config.seed));
        assert_eq!(engine.run(), run_forecast(&config).expect("test: valid forecast"));
    }

    // ========== Convergence ==========

    #[test]
    fn test_symmetric_world_converges_to_even_odds() {
        let probabilities: Vec<f64> = [1u64, 2, 3, 4]
            .iter()
            .map(|&seed| {
                run_forecast(&symmetric(seed))
                    .expect("test: valid forecast")
                    .probability_orbit_cheaper_by_horizon
            })
            .collect();
        println!("symmetric probabilities: {:?}", probabilities);

        let mean = probabilities.iter().sum::<f64>() / probabilities.len() as f64;
        assert!((mean - 0.5).abs() < 0.02, "mean probability {}", mean);
        for p in &probabilities {
            assert!((p - mean).abs() <= 0.02, "seed spread too wide: {:?}", probabilities);
        }
    }

    // ========== Percentile Cones ==========

    #[test]
    fn test_percentile_bands_ordered_every_year() {
        let result = run_forecast(&quick(11)).expect("test: valid forecast");
        for point in &result.points {
            for band in [point.orbit_cost, point.ground_cost] {
                assert!(band.p2_5 <= band.p16, "{}: {:?}", point.year, band);
                assert!(band.p16 <= band.p50);
                assert!(band.p50 <= band.p84);
                assert!(band.p84 <= band.p97_5);
                assert!(band.p2_5 > 0.0);
            }
            assert!((0.0..=1.0).contains(&point.probability_orbit_cheaper));
        }
    }

    #[test]
    fn test_cone_widens_with_horizon() {
        let result = run_forecast(&quick(5)).expect("test: valid forecast");
        let width = |i: usize| {
            let b = result.points[i].orbit_cost;
            (b.p84 - b.p16) / b.p50
        };
        assert_eq!(width(0), 0.0);
        assert!(width(result.points.len() - 1) > width(1));
    }

    // ========== Sentiment ==========

    #[test]
    fn test_cheap_orbit_reads_bullish() {
        let config = ForecastConfig {
            initial_state: WorldState { orbit_unit_cost: 0.5, ground_unit_cost: 3.0, ..WorldState::default() },
            ..quick(21)
        };
        let result = run_forecast(&config).expect("test: valid forecast");
        let sentiment = result.sentiment();
        assert!(result.probability_orbit_cheaper_by_horizon > 0.6);
        assert_eq!(sentiment.sentiment_label, SentimentLabel::Bullish);
        assert!(sentiment.orbit_sentiment > 0.2);
    }

    #[test]
    fn test_short_horizon_expensive_orbit_reads_bearish() {
        let config = ForecastConfig { horizon_years: 1, ..quick(21) };
        let sentiment = run_forecast(&config).expect("test: valid forecast").sentiment();
        assert_eq!(sentiment.sentiment_label, SentimentLabel::Bearish);
        assert!(sentiment.orbit_sentiment < -0.2);
        assert!((0.0..=1.0).contains(&sentiment.volatility_level));
    }

    #[test]
    fn test_bull_scenario_at_least_as_optimistic_as_bear() {
        let run = |mode| {
            let config = ForecastConfig { params: ForecastParams::for_scenario(mode), ..quick(13) };
            run_forecast(&config).expect("test: valid forecast").probability_orbit_cheaper_by_horizon
        };
        assert!(run(ScenarioMode::OrbitalBull) >= run(ScenarioMode::OrbitalBear));
    }

    // ========== Configuration ==========

    #[test]
    fn test_forecast_config_from_json() {
        let json = r#"{
            "n_sims": 300,
            "horizon_years": 8,
            "seed": 5,
            "policy": { "kind": "COST_SEEKING", "max_tilt": 1.5 }
        }"#;
        let config = ForecastConfig::from_json(json).expect("test: json forecast config parses");
        let result = run_forecast(&config).expect("test: valid forecast");
        assert_eq!(result.points.len(), 9);
        assert_eq!(result.n_sims, 300);

        let report = ForecastReport { sentiment: result.sentiment(), forecast: result };
        let out = serde_json::to_string(&report).expect("test: serializes");
        assert!(out.contains("\"sentiment_label\":"));
        assert!(out.contains("\"p97_5\":"));
    }

    #[test]
    fn test_invalid_forecast_configs_rejected() {
        assert!(run_forecast(&ForecastConfig { n_sims: 0, ..ForecastConfig::default() }).is_err());
        assert!(run_forecast(&ForecastConfig { horizon_years: 0, ..ForecastConfig::default() }).is_err());
        let bad_params = ForecastParams { orbit_learning_rate: 1.0, ..ForecastParams::default() };
        assert!(run_forecast(&ForecastConfig { params: bad_params, ..ForecastConfig::default() }).is_err());
    }
}
