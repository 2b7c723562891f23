//! Error type for controller construction and DOM plumbing.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum PullError {
    /// `web_sys::window()` returned nothing (not running in a browser).
    #[error("no global `window` exists")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("document has no body")]
    NoBody,

    /// A DOM call rejected with a JS exception.
    #[error("dom error: {0}")]
    Dom(String),

    /// Options JSON could not be parsed.
    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),

    /// A gesture or event name outside the known set.
    #[error("unknown gesture name: {0}")]
    UnknownName(String),
}

impl From<JsValue> for PullError {
    fn from(value: JsValue) -> Self {
        PullError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
