//! Browser plumbing: page scroll geometry, listener attach/detach, target
//! lookup and cancellable timeouts.

use std::fmt::Debug;

use js_sys::Function;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Document, Element, EventTarget, Window};

use crate::error::PullError;
use crate::state::ScrollMetrics;

/// Register a native listener. `touchmove` is registered non-passive so
/// `preventDefault` keeps working in browsers that default touch listeners to passive.
pub fn listen(target: &EventTarget, event: &str, handler: &Function) -> Result<(), PullError> {
    if event == "touchmove" {
        let opts = AddEventListenerOptions::new();
        opts.set_passive(false);
        opts.set_capture(false);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event, handler, &opts,
        )?;
    } else {
        target.add_event_listener_with_callback(event, handler)?;
    }
    Ok(())
}

pub fn unlisten(target: &EventTarget, event: &str, handler: &Function) {
    let _ = target.remove_event_listener_with_callback(event, handler);
}

/// Where touch listeners are attached.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Target {
    #[default]
    Body,
    Selector(String),
    Element(Element),
}

impl From<Option<String>> for Target {
    fn from(el: Option<String>) -> Self {
        el.map(Target::Selector).unwrap_or_default()
    }
}

// Outcome of a selector lookup; misses and invalid selectors are logged.
fn selected<T, E: Debug>(sel: &str, lookup: Result<Option<T>, E>) -> Option<T> {
    match lookup {
        Ok(Some(found)) => Some(found),
        Ok(None) => {
            debug!(selector = %sel, "selector matched nothing; falling back to <body>");
            None
        }
        Err(err) => {
            warn!(selector = %sel, ?err, "invalid selector; falling back to <body>");
            None
        }
    }
}

/// Resolve a target, falling back to `<body>` when a selector matches nothing
/// or does not parse.
pub fn resolve_target(document: &Document, target: &Target) -> Result<Element, PullError> {
    let found = match target {
        Target::Body => None,
        Target::Selector(sel) => selected(sel, document.query_selector(sel)),
        Target::Element(el) => Some(el.clone()),
    };
    match found {
        Some(el) => Ok(el),
        None => document
            .body()
            .map(Element::from)
            .ok_or(PullError::NoBody),
    }
}

/// Scroll geometry of the page root, resolved against the document's compat mode.
#[derive(Clone, Debug)]
pub struct DocumentScroll {
    document: Document,
}

impl DocumentScroll {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn standards_mode(&self) -> bool {
        self.document.compat_mode() == "CSS1Compat"
    }

    /// Reads `read` from the root in standards mode (body if the root reports 0)
    /// and from the body in quirks mode.
    fn read(&self, read: impl Fn(&Element) -> i32) -> f64 {
        let root = self.document.document_element().map(|e| read(&e)).unwrap_or(0);
        let body = self
            .document
            .body()
            .map(|b| read(&Element::from(b)))
            .unwrap_or(0);
        let value = if !self.standards_mode() {
            body
        } else if root != 0 {
            root
        } else {
            body
        };
        value as f64
    }

    pub fn scroll_top(&self) -> f64 {
        self.read(Element::scroll_top)
    }

    /// Writes to both root and body; whichever is not the scroller ignores it.
    pub fn set_scroll_top(&self, value: f64) {
        let value = value.round() as i32;
        if let Some(root) = self.document.document_element() {
            root.set_scroll_top(value);
        }
        if let Some(body) = self.document.body() {
            body.set_scroll_top(value);
        }
    }

    pub fn scroll_height(&self) -> f64 {
        self.read(Element::scroll_height)
    }

    pub fn client_height(&self) -> f64 {
        self.read(Element::client_height)
    }

    pub fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: self.scroll_top(),
            scroll_height: self.scroll_height(),
            client_height: self.client_height(),
        }
    }
}

/// A scheduled `setTimeout`. Dropping the handle clears the timer.
pub struct Timeout {
    window: Window,
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn schedule(
        window: &Window,
        millis: i32,
        f: impl FnMut() + 'static,
    ) -> Result<Self, PullError> {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        let id = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            millis,
        )?;
        Ok(Self {
            window: window.clone(),
            id,
            _callback: callback,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        // Harmless if the timer already fired.
        self.window.clear_timeout_with_handle(self.id);
    }
}
