// Trailing-edge debounce over an owned, cancel-on-drop timer handle.

/// Holds at most one pending handle. Dropping a handle must cancel its timer,
/// so arming a new one cancels the previous wait.
#[derive(Debug)]
pub struct Debounce<H> {
    pending: Option<H>,
}

impl<H> Default for Debounce<H> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<H> Debounce<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pending handle; the old one is dropped (cancelled).
    pub fn arm(&mut self, handle: H) {
        self.pending = Some(handle);
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}
