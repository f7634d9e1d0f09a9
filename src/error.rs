//! Crate error type
//!
//! The simulation is infallible; only browser setup and settings parsing fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// A required DOM element is absent
    #[error("missing element #{0}")]
    MissingElement(String),
    /// The canvas has no 2D context
    #[error("canvas 2d context unavailable")]
    Context,
    /// Settings JSON failed to parse
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
    /// Any other JS exception
    #[error("js error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for GameError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        GameError::Js(format!("{value:?}"))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GameError> for wasm_bindgen::JsValue {
    fn from(err: GameError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
