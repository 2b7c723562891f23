//! Controller state that does not touch the DOM.
//!
//! [`Hub`] owns the tracker, the listener table, the auto-load debounce and
//! whether auto-load is live. [`Pull`](crate::Pull) keeps one in a `RefCell`
//! and forwards native events to it; everything it decides is testable
//! without a browser.

use std::cell::RefCell;

use tracing::{debug, trace};

use crate::model::{EventKind, GestureEvent, GestureFamily, PullOptions};
use crate::registry::{Callbacks, Registry};
use crate::state::{Debounce, PullTracker, ScrollMetrics};

/// `C` is the context handed to listeners, `H` the pending-timer handle.
pub struct Hub<C, H> {
    tracker: PullTracker,
    registry: Registry<C>,
    debounce: Debounce<H>,
    auto_load_attached: bool,
}

impl<C, H> Hub<C, H> {
    /// Seed the registry from `callbacks`. The auto-load callback is skipped
    /// unless the options enable auto-load.
    pub fn new(options: PullOptions, callbacks: &Callbacks<C>) -> Self {
        let tracker = PullTracker::new(options);
        let use_auto_load = tracker.options().use_auto_load;
        let mut registry = Registry::new();
        for kind in EventKind::ALL {
            if kind == EventKind::AutoLoad && !use_auto_load {
                continue;
            }
            if let Some(listener) = callbacks.get(kind) {
                registry.register(kind, listener.clone());
            }
        }
        Self {
            tracker,
            registry,
            debounce: Debounce::new(),
            auto_load_attached: false,
        }
    }

    pub fn tracker(&self) -> &PullTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut PullTracker {
        &mut self.tracker
    }

    pub fn registry(&self) -> &Registry<C> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry<C> {
        &mut self.registry
    }

    pub fn auto_load_attached(&self) -> bool {
        self.auto_load_attached
    }

    /// Record that the native scroll listener is now attached.
    pub fn mark_auto_load_attached(&mut self) {
        self.auto_load_attached = true;
    }

    pub fn is_check_pending(&self) -> bool {
        self.debounce.is_armed()
    }

    /// A scroll happened and `handle` is the freshly scheduled check.
    /// Ignored (and dropped) once auto-load is detached.
    pub fn scrolled(&mut self, handle: H) -> bool {
        if !self.auto_load_attached {
            return false;
        }
        self.debounce.arm(handle);
        true
    }

    /// The debounced check fired. Emits only at the exact bottom.
    pub fn settle(&self, metrics: ScrollMetrics) -> Option<GestureEvent> {
        trace!(?metrics, attached = self.auto_load_attached, "scroll settled");
        (self.auto_load_attached && metrics.at_bottom()).then_some(GestureEvent::AutoLoad)
    }

    /// Stop auto-load and drop any pending check. Returns true when the native
    /// scroll listener was attached and must now be removed.
    pub fn detach_auto_load(&mut self) -> bool {
        self.debounce.cancel();
        std::mem::replace(&mut self.auto_load_attached, false)
    }

    /// Clear every listener of `family`; see [`Hub::detach_auto_load`] for the
    /// return value.
    pub fn destroy(&mut self, family: GestureFamily) -> bool {
        for kind in family.kinds() {
            self.registry.unregister(*kind, None);
        }
        debug!(?family, "gesture family destroyed");
        family == GestureFamily::AutoLoad && self.detach_auto_load()
    }
}

/// Invoke the listeners for `event` in registration order. The hub is not
/// borrowed while they run, so they may lock, register or destroy. Returns how
/// many ran.
pub fn emit<C, H>(hub: &RefCell<Hub<C, H>>, ctx: &C, event: &GestureEvent) -> usize {
    let listeners = hub.borrow().registry.snapshot(event.kind());
    trace!(?event, listeners = listeners.len(), "emit");
    for listener in &listeners {
        listener(ctx, event);
    }
    listeners.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Stand-in for the scheduled timeout: records its drop.
    struct Timer {
        cancelled: Rc<Cell<u32>>,
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            self.cancelled.set(self.cancelled.get() + 1);
        }
    }

    /// Stand-in for the controller: listeners reach the hub through it.
    struct Ctl {
        hub: RefCell<Hub<Ctl, Timer>>,
    }

    impl Ctl {
        fn new(options: PullOptions, callbacks: Callbacks<Ctl>) -> Self {
            let mut hub = Hub::new(options, &callbacks);
            if hub.tracker().options().use_auto_load {
                hub.mark_auto_load_attached();
            }
            Self {
                hub: RefCell::new(hub),
            }
        }

        fn emit(&self, event: GestureEvent) -> usize {
            emit(&self.hub, self, &event)
        }
    }

    fn bottom() -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: 500.0,
            scroll_height: 1000.0,
            client_height: 500.0,
        }
    }

    fn counter(hits: &Rc<Cell<u32>>) -> impl Fn(&Ctl, &GestureEvent) + 'static {
        let hits = hits.clone();
        move |_: &Ctl, _: &GestureEvent| hits.set(hits.get() + 1)
    }

    #[test]
    fn auto_load_callback_skipped_when_option_off() {
        let hits = Rc::new(Cell::new(0));
        let cbs = Callbacks::new()
            .on(EventKind::AutoLoad, counter(&hits))
            .on(EventKind::PullDown, counter(&hits));
        let off: Hub<Ctl, Timer> = Hub::new(PullOptions::default().pull_down(50.0), &cbs);
        assert!(off.registry().is_empty(EventKind::AutoLoad));
        assert_eq!(off.registry().len(EventKind::PullDown), 1);

        let on: Hub<Ctl, Timer> = Hub::new(PullOptions::default().auto_load(), &cbs);
        assert_eq!(on.registry().len(EventKind::AutoLoad), 1);
    }

    #[test]
    fn settle_emits_only_at_exact_bottom() {
        let ctl = Ctl::new(PullOptions::default().auto_load(), Callbacks::new());
        let hub = ctl.hub.borrow();
        assert_eq!(hub.settle(bottom()), Some(GestureEvent::AutoLoad));
        let near = ScrollMetrics {
            scroll_top: 499.0,
            ..bottom()
        };
        assert_eq!(hub.settle(near), None);
        let top = ScrollMetrics {
            scroll_top: 0.0,
            ..bottom()
        };
        assert_eq!(hub.settle(top), None);
    }

    #[test]
    fn scroll_is_ignored_until_attached() {
        let cancelled = Rc::new(Cell::new(0));
        let mut hub: Hub<Ctl, Timer> = Hub::new(PullOptions::default(), &Callbacks::new());
        assert!(!hub.scrolled(Timer {
            cancelled: cancelled.clone()
        }));
        assert!(!hub.is_check_pending());
        assert_eq!(cancelled.get(), 1);
        assert_eq!(hub.settle(bottom()), None);
    }

    #[test]
    fn destroy_auto_load_cancels_pending_check_and_detaches() {
        let hits = Rc::new(Cell::new(0));
        let cancelled = Rc::new(Cell::new(0));
        let ctl = Ctl::new(
            PullOptions::default().auto_load(),
            Callbacks::new().on(EventKind::AutoLoad, counter(&hits)),
        );
        {
            let mut hub = ctl.hub.borrow_mut();
            assert!(hub.scrolled(Timer {
                cancelled: cancelled.clone()
            }));
            assert!(hub.is_check_pending());
            assert!(hub.destroy(GestureFamily::AutoLoad));
            assert!(!hub.is_check_pending());
            assert!(!hub.auto_load_attached());
            assert!(hub.registry().is_empty(EventKind::AutoLoad));
            // Already detached: nothing further to remove.
            assert!(!hub.destroy(GestureFamily::AutoLoad));
        }
        assert_eq!(cancelled.get(), 1);
        assert_eq!(ctl.hub.borrow().settle(bottom()), None);
        assert_eq!(ctl.emit(GestureEvent::AutoLoad), 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn destroy_other_family_keeps_auto_load() {
        let ctl = Ctl::new(
            PullOptions::default().pull_up(50.0).auto_load(),
            Callbacks::new().on(EventKind::PullUp, |_, _| {}),
        );
        let mut hub = ctl.hub.borrow_mut();
        assert!(!hub.destroy(GestureFamily::PullUp));
        assert!(hub.auto_load_attached());
        assert!(hub.registry().is_empty(EventKind::PullUp));
    }

    #[test]
    fn listener_may_lock_during_emit() {
        let ctl = Ctl::new(
            PullOptions::default().pull_down(50.0),
            Callbacks::new().on(EventKind::PullDown, |ctl: &Ctl, _| {
                ctl.hub.borrow_mut().tracker_mut().set_locked(true);
            }),
        );
        assert_eq!(ctl.emit(GestureEvent::PullDown { threshold: 50.0 }), 1);
        assert!(ctl.hub.borrow().tracker().locked());
    }

    #[test]
    fn listener_may_destroy_its_own_family_during_emit() {
        let hits = Rc::new(Cell::new(0));
        let ctl = Ctl::new(
            PullOptions::default().auto_load(),
            Callbacks::new().on(EventKind::AutoLoad, |ctl: &Ctl, _| {
                ctl.hub.borrow_mut().destroy(GestureFamily::AutoLoad);
            }),
        );
        ctl.hub
            .borrow_mut()
            .registry_mut()
            .register(EventKind::AutoLoad, Rc::new(counter(&hits)));

        // The snapshot taken before the first listener ran still reaches the second.
        assert_eq!(ctl.emit(GestureEvent::AutoLoad), 2);
        assert_eq!(hits.get(), 1);
        assert!(!ctl.hub.borrow().auto_load_attached());
        assert_eq!(ctl.emit(GestureEvent::AutoLoad), 0);
        assert_eq!(hits.get(), 1);
    }
}
