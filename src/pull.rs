//! The DOM-bound controller.
//!
//! A [`Pull`] attaches touch listeners to its container (and a scroll listener
//! to the window when auto-load is on), feeds them through a [`Hub`],
//! applies the resulting scroll corrections and emits [`GestureEvent`]s to the
//! registered listeners. Handles are cheap to clone; the native listeners are
//! detached when the last handle is dropped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Function;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, Event, HtmlElement, TouchEvent, TouchList, Window};

use crate::env::{DocumentScroll, Target, Timeout, listen, resolve_target, unlisten};
use crate::error::PullError;
use crate::hub::{self, Hub};
use crate::model::{AUTO_LOAD_DEBOUNCE_MS, EventKind, GestureEvent, GestureFamily, PullOptions};
use crate::registry;
use crate::util;

/// Listener signature: the emitting controller plus the event.
/// Capturing a `Pull` inside a listener creates a cycle; use the context argument instead.
pub type Listener = registry::Listener<Pull>;

/// Optional per-event callbacks supplied at construction.
pub type Callbacks = registry::Callbacks<Pull>;

type TouchClosure = Closure<dyn FnMut(TouchEvent)>;

struct TouchHandlers {
    start: TouchClosure,
    moved: TouchClosure,
    end: TouchClosure,
    cancel: TouchClosure,
}

impl TouchHandlers {
    fn bindings(&self) -> [(&'static str, &Function); 4] {
        [
            ("touchstart", self.start.as_ref().unchecked_ref()),
            ("touchmove", self.moved.as_ref().unchecked_ref()),
            ("touchend", self.end.as_ref().unchecked_ref()),
            ("touchcancel", self.cancel.as_ref().unchecked_ref()),
        ]
    }
}

struct Inner {
    window: Window,
    target: Element,
    scroll: DocumentScroll,
    hub: RefCell<Hub<Pull, Timeout>>,
    touch: RefCell<Option<TouchHandlers>>,
    on_scroll: RefCell<Option<Closure<dyn FnMut(Event)>>>,
}

impl Inner {
    fn unlisten_scroll(&self) {
        if let Some(cb) = self.on_scroll.borrow().as_ref() {
            unlisten(self.window.as_ref(), "scroll", cb.as_ref().unchecked_ref());
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(handlers) = self.touch.get_mut() {
            for (event, f) in handlers.bindings() {
                unlisten(self.target.as_ref(), event, f);
            }
        }
        if self.hub.get_mut().detach_auto_load() {
            self.unlisten_scroll();
        }
    }
}

#[derive(Clone)]
pub struct Pull {
    inner: Rc<Inner>,
}

impl PartialEq for Pull {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

fn first_point(touches: &TouchList) -> Option<(f64, f64)> {
    touches
        .item(0)
        .map(|t| (t.page_x() as f64, t.page_y() as f64))
}

fn touch_closure(weak: &Weak<Inner>, handler: fn(&Pull, &TouchEvent)) -> TouchClosure {
    let weak = weak.clone();
    Closure::wrap(Box::new(move |e: TouchEvent| {
        if let Some(inner) = weak.upgrade() {
            handler(&Pull { inner }, &e);
        }
    }) as Box<dyn FnMut(_)>)
}

impl Pull {
    /// Build on the element matched by `options.el`, or `<body>`.
    pub fn new(options: PullOptions, callbacks: Callbacks) -> Result<Self, PullError> {
        let target = Target::from(options.el.clone());
        Self::with_target(target, options, callbacks)
    }

    pub fn with_target(
        target: Target,
        options: PullOptions,
        callbacks: Callbacks,
    ) -> Result<Self, PullError> {
        let window = web_sys::window().ok_or(PullError::NoWindow)?;
        let document = window.document().ok_or(PullError::NoDocument)?;
        let target = resolve_target(&document, &target)?;
        let hub = Hub::new(options, &callbacks);
        let use_auto_load = hub.tracker().options().use_auto_load;

        let pull = Pull {
            inner: Rc::new(Inner {
                window,
                target,
                scroll: DocumentScroll::new(document),
                hub: RefCell::new(hub),
                touch: RefCell::new(None),
                on_scroll: RefCell::new(None),
            }),
        };
        pull.attach_touch()?;
        if use_auto_load {
            pull.attach_auto_load()?;
        }
        debug!(options = ?pull.options(), "pull controller attached");
        Ok(pull)
    }

    fn attach_touch(&self) -> Result<(), PullError> {
        let weak = Rc::downgrade(&self.inner);
        let handlers = TouchHandlers {
            start: touch_closure(&weak, Pull::on_touch_start),
            moved: touch_closure(&weak, Pull::on_touch_move),
            end: touch_closure(&weak, Pull::on_touch_end),
            cancel: touch_closure(&weak, Pull::on_touch_cancel),
        };
        let attached = handlers
            .bindings()
            .into_iter()
            .try_for_each(|(event, f)| listen(self.inner.target.as_ref(), event, f));
        // Stored even on failure so Drop detaches whatever did attach.
        *self.inner.touch.borrow_mut() = Some(handlers);
        attached
    }

    /// Attach the window scroll listener. Called at construction when auto-load is
    /// on; call again to resume after `destroy(GestureFamily::AutoLoad)`.
    pub fn attach_auto_load(&self) -> Result<(), PullError> {
        if self.inner.hub.borrow().auto_load_attached() {
            return Ok(());
        }
        let mut on_scroll = self.inner.on_scroll.borrow_mut();
        let cb = on_scroll.get_or_insert_with(|| {
            let weak = Rc::downgrade(&self.inner);
            Closure::wrap(Box::new(move |_e: Event| {
                if let Some(inner) = weak.upgrade() {
                    Pull { inner }.on_scroll();
                }
            }) as Box<dyn FnMut(_)>)
        });
        listen(self.inner.window.as_ref(), "scroll", cb.as_ref().unchecked_ref())?;
        self.inner.hub.borrow_mut().mark_auto_load_attached();
        Ok(())
    }

    pub fn is_auto_load_attached(&self) -> bool {
        self.inner.hub.borrow().auto_load_attached()
    }

    fn on_touch_start(&self, e: &TouchEvent) {
        let first = first_point(&e.touches());
        let metrics = self.inner.scroll.metrics();
        self.inner
            .hub
            .borrow_mut()
            .tracker_mut()
            .touch_start(first, metrics);
    }

    fn on_touch_move(&self, e: &TouchEvent) {
        let out = self
            .inner
            .hub
            .borrow_mut()
            .tracker_mut()
            .touch_move(first_point(&e.touches()));
        if out.prevent_default {
            e.prevent_default();
        }
        if let Some(top) = out.scroll_to {
            self.inner.scroll.set_scroll_top(top);
        }
        if let Some(event) = out.event {
            self.emit(event);
        }
    }

    fn on_touch_end(&self, e: &TouchEvent) {
        let changed = e.changed_touches().length() > 0;
        let outcome = self.inner.hub.borrow_mut().tracker_mut().touch_end(changed);
        if let Some(event) = outcome {
            self.emit(event);
        }
    }

    fn on_touch_cancel(&self, e: &TouchEvent) {
        let changed = e.changed_touches().length() > 0;
        let outcome = self
            .inner
            .hub
            .borrow_mut()
            .tracker_mut()
            .touch_cancel(changed);
        if let Some(event) = outcome {
            self.emit(event);
        }
    }

    fn on_scroll(&self) {
        let weak = Rc::downgrade(&self.inner);
        let scheduled = Timeout::schedule(&self.inner.window, AUTO_LOAD_DEBOUNCE_MS, move || {
            if let Some(inner) = weak.upgrade() {
                Pull { inner }.settle_scroll();
            }
        });
        match scheduled {
            Ok(timeout) => {
                self.inner.hub.borrow_mut().scrolled(timeout);
            }
            Err(err) => warn!(%err, "could not schedule auto-load check"),
        }
    }

    fn settle_scroll(&self) {
        let metrics = self.inner.scroll.metrics();
        let outcome = self.inner.hub.borrow().settle(metrics);
        if let Some(event) = outcome {
            self.emit(event);
        }
    }

    /// Invoke every listener for the event's kind, in registration order.
    /// Listeners run without any controller borrow held, so they may lock,
    /// register or destroy.
    pub fn emit(&self, event: GestureEvent) {
        hub::emit(&self.inner.hub, self, &event);
    }

    pub fn register(&self, kind: EventKind, listener: Listener) {
        self.inner.hub.borrow_mut().registry_mut().register(kind, listener);
    }

    /// Register a closure and return its handle for a later `unregister`.
    pub fn on(&self, kind: EventKind, f: impl Fn(&Pull, &GestureEvent) + 'static) -> Listener {
        let listener: Listener = Rc::new(f);
        self.register(kind, listener.clone());
        listener
    }

    /// Remove one listener, or all listeners of `kind` when `None`.
    pub fn unregister(&self, kind: EventKind, listener: Option<&Listener>) -> usize {
        self.inner
            .hub
            .borrow_mut()
            .registry_mut()
            .unregister(kind, listener)
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.inner.hub.borrow().registry().len(kind)
    }

    /// Drop every listener of a gesture family. For auto-load this also detaches
    /// the window scroll listener and cancels a pending check.
    pub fn destroy(&self, family: GestureFamily) {
        let detach = self.inner.hub.borrow_mut().destroy(family);
        if detach {
            self.inner.unlisten_scroll();
        }
    }

    pub fn locked(&self) -> bool {
        self.inner.hub.borrow().tracker().locked()
    }

    /// While locked, touch moves only suppress the browser default.
    pub fn set_locked(&self, locked: bool) {
        self.inner.hub.borrow_mut().tracker_mut().set_locked(locked);
    }

    pub fn options(&self) -> PullOptions {
        self.inner.hub.borrow().tracker().options().clone()
    }

    pub fn target(&self) -> Element {
        self.inner.target.clone()
    }

    pub fn apply_transition(
        &self,
        el: &HtmlElement,
        property: &str,
        value: &str,
        duration_ms: Option<u32>,
    ) -> Result<(), PullError> {
        util::apply_transition(el, property, value, duration_ms)
    }
}
