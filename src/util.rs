// Small helpers shared by the controller and the demo app.
use wasm_bindgen::JsValue;
use web_sys::HtmlElement;

use crate::error::PullError;

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

/// CSS `transition` shorthand for a duration in milliseconds.
pub fn transition_value(duration_ms: u32) -> String {
    format!("all {}ms", duration_ms)
}

/// Set a transition duration (default 0ms) and one style property in a single step.
/// `property` is the CSS name, e.g. `transform` or `margin-top`.
pub fn apply_transition(
    el: &HtmlElement,
    property: &str,
    value: &str,
    duration_ms: Option<u32>,
) -> Result<(), PullError> {
    let style = el.style();
    let transition = transition_value(duration_ms.unwrap_or(0));
    style.set_property("-webkit-transition", &transition)?;
    style.set_property("transition", &transition)?;
    style.set_property(property, value)?;
    Ok(())
}
