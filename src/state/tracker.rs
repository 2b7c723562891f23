// Touch sequence recognizer: owns the live session and the embedder lock.
use tracing::{debug, trace};

use super::session::{GestureSession, MoveOutcome, ScrollMetrics};
use crate::model::{GestureEvent, PullOptions};

#[derive(Debug, Clone, Default)]
pub struct PullTracker {
    options: PullOptions,
    session: Option<GestureSession>,
    locked: bool,
}

impl PullTracker {
    pub fn new(options: PullOptions) -> Self {
        Self {
            options: options.normalized(),
            session: None,
            locked: false,
        }
    }

    pub fn options(&self) -> &PullOptions {
        &self.options
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// `first` is the page position of the first active touch, if any.
    pub fn touch_start(&mut self, first: Option<(f64, f64)>, metrics: ScrollMetrics) {
        let Some((x, y)) = first else {
            return;
        };
        let session = GestureSession::begin(x, y, metrics);
        debug!(
            scroll_top = session.scroll_top,
            max_offset = session.max_offset,
            pull_down_zone = session.has_pull_down_zone,
            pull_up_zone = session.has_pull_up_zone,
            "gesture session started"
        );
        self.session = Some(session);
    }

    pub fn touch_move(&mut self, first: Option<(f64, f64)>) -> MoveOutcome {
        let Some((x, y)) = first else {
            return MoveOutcome::default();
        };
        if self.locked {
            return MoveOutcome {
                prevent_default: true,
                ..Default::default()
            };
        }
        let Some(session) = self.session.as_mut() else {
            return MoveOutcome::default();
        };
        let out = session.track(x, y, &self.options);
        trace!(
            delta_x = session.delta_x,
            delta_y = session.delta_y,
            axis = ?session.fixed_axis,
            "gesture move"
        );
        out
    }

    /// `changed` is false when the end event carried no changed touches.
    pub fn touch_end(&mut self, changed: bool) -> Option<GestureEvent> {
        if !changed {
            return None;
        }
        let session = self.session.take()?;
        let outcome = session.finish(&self.options);
        debug!(delta_y = session.delta_y, ?outcome, "gesture session ended");
        outcome
    }

    /// Close the session without committing. Same `changed` guard as `touch_end`.
    pub fn touch_cancel(&mut self, changed: bool) -> Option<GestureEvent> {
        if !changed {
            return None;
        }
        let session = self.session.take()?;
        let outcome = session.abort();
        debug!(delta_y = session.delta_y, ?outcome, "gesture session cancelled");
        outcome
    }
}
