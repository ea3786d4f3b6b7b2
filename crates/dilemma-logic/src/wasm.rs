//! WASM bindings for the browser front end

#![cfg(feature = "wasm")]

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{GameConfig, GameReport, Strategy};

/// Run a game from a JSON config document
///
/// Uses the config's seed when present, otherwise draws one from
/// `Math.random()`. The seed actually used is returned with the result.
///
/// # Returns
/// `{ seed, result, analysis }`, with `seed` as a decimal string so values
/// above `Number.MAX_SAFE_INTEGER` survive the trip into JavaScript
#[wasm_bindgen]
pub fn run_simulation(config_json: &str) -> Result<JsValue, JsError> {
    let config = GameConfig::from_json(config_json)
        .map_err(|e| JsError::new(&e.to_string()))?;

    let report = GameReport::run(&config, || (js_sys::Math::random() * u32::MAX as f64) as u64)
        .map_err(|e| JsError::new(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&report)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

#[derive(Serialize)]
struct StrategyInfo {
    id: &'static str,
    name: &'static str,
    description: &'static str,
}

/// Get all available strategies, in menu order
#[wasm_bindgen]
pub fn get_strategy_types() -> Result<JsValue, JsError> {
    let types: Vec<StrategyInfo> = Strategy::ALL
        .iter()
        .map(|s| StrategyInfo {
            id: s.id(),
            name: s.name(),
            description: s.describe(),
        })
        .collect();

    serde_wasm_bindgen::to_value(&types)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
