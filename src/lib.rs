// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Orbital Compute Simulation Suite

pub mod types;
pub mod config;
pub mod fleet;
pub mod constraints;
pub mod economics;
pub mod simulation;
pub mod forecast;

pub use types::*;
pub use config::{ConfigError, SimulationConfig};
pub use simulation::{simulate, DeploymentSimulator, SimulationResult};
pub use forecast::{ForecastConfig, ForecastReport, ForecastResult, SentimentSnapshot};

use wasm_bindgen::prelude::*;

fn install_panic_hook() {
    #[cfg(target_arch = "wasm32")]
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ─── WASM Interface ──────────────────────────────────────────────────────────

#[wasm_bindgen]
impl DeploymentSimulator {
    /// Build a simulator from a (possibly partial) JS config object. `undefined`
    /// or `null` runs the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<DeploymentSimulator, JsValue> {
        install_panic_hook();
        let config: SimulationConfig = if config.is_undefined() || config.is_null() {
            SimulationConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(to_js_error)?
        };
        DeploymentSimulator::from_config(config).map_err(to_js_error)
    }

    /// Advance one year. Returns the new `YearStep`, or `null` past the horizon.
    pub fn step(&mut self) -> JsValue {
        match self.step_core() {
            Some(step) => serde_wasm_bindgen::to_value(step).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    /// Run the remaining years and return the full timeline.
    pub fn run(&mut self) -> JsValue {
        let timeline = self.run_to_horizon();
        serde_wasm_bindgen::to_value(timeline).unwrap_or(JsValue::NULL)
    }

    pub fn get_timeline(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.timeline()).unwrap_or(JsValue::NULL)
    }

    pub fn get_fleet(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.fleet()).unwrap_or(JsValue::NULL)
    }

    pub fn finished(&self) -> bool {
        self.is_finished()
    }

    /// Reset to year zero with the same configuration.
    pub fn reset(&mut self) -> Result<(), JsValue> {
        *self = DeploymentSimulator::from_config(self.config.clone()).map_err(to_js_error)?;
        Ok(())
    }
}

/// Run a Monte Carlo forecast from a (possibly partial) JS config object.
/// Resolves to `{ forecast, sentiment }`.
#[wasm_bindgen(js_name = runForecast)]
pub fn run_forecast_js(config: JsValue) -> Result<JsValue, JsValue> {
    install_panic_hook();
    let config: ForecastConfig = if config.is_undefined() || config.is_null() {
        ForecastConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config).map_err(to_js_error)?
    };
    let forecast = forecast::run_forecast(&config).map_err(to_js_error)?;
    let report = ForecastReport { sentiment: forecast.sentiment(), forecast };
    serde_wasm_bindgen::to_value(&report).map_err(to_js_error)
}
