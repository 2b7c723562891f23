//! Ordered listener table keyed by [`EventKind`].

use std::rc::Rc;

use crate::model::{EventKind, GestureEvent};

/// A listener receives the emitting context (the controller) and the event.
pub type Listener<C> = Rc<dyn Fn(&C, &GestureEvent)>;

pub struct Registry<C> {
    slots: [Vec<Listener<C>>; EventKind::COUNT],
}

impl<C> Default for Registry<C> {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| Vec::new()),
        }
    }
}

impl<C> Registry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append; duplicates are kept and fire once per registration.
    pub fn register(&mut self, kind: EventKind, listener: Listener<C>) {
        self.slots[kind.index()].push(listener);
    }

    /// Remove the first registration of `listener`, or every listener when `None`.
    /// Returns how many entries were removed.
    pub fn unregister(&mut self, kind: EventKind, listener: Option<&Listener<C>>) -> usize {
        let slot = &mut self.slots[kind.index()];
        match listener {
            None => {
                let n = slot.len();
                slot.clear();
                n
            }
            Some(target) => match slot.iter().position(|l| Rc::ptr_eq(l, target)) {
                Some(i) => {
                    slot.remove(i);
                    1
                }
                None => 0,
            },
        }
    }

    pub fn len(&self, kind: EventKind) -> usize {
        self.slots[kind.index()].len()
    }

    pub fn is_empty(&self, kind: EventKind) -> bool {
        self.slots[kind.index()].is_empty()
    }

    /// Cloned listener list, so callers can invoke without holding a borrow.
    pub fn snapshot(&self, kind: EventKind) -> Vec<Listener<C>> {
        self.slots[kind.index()].clone()
    }
}

/// Optional per-event callbacks supplied at construction, one slot per kind.
pub struct Callbacks<C> {
    slots: [Option<Listener<C>>; EventKind::COUNT],
}

impl<C> Default for Callbacks<C> {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }
}

impl<C> Clone for Callbacks<C> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<C> Callbacks<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, kind: EventKind, f: impl Fn(&C, &GestureEvent) + 'static) -> Self {
        self.slots[kind.index()] = Some(Rc::new(f));
        self
    }

    pub fn get(&self, kind: EventKind) -> Option<&Listener<C>> {
        self.slots[kind.index()].as_ref()
    }
}
