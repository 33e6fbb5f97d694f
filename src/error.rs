use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::scroll::RangeError;

/// Failures that stop the page runtime from booting. Anything past boot is
/// best effort and only ever logged.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("invalid page config: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("js error: {0}")]
    Js(String),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        PageError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<PageError> for JsValue {
    fn from(err: PageError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
