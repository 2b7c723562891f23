// Per-touch gesture session: start snapshot, deltas, zones, axis lock and armed flags.
use crate::model::{Axis, GestureEvent, GestureFamily, PULL_RESISTANCE, PullOptions};

/// Scroll geometry of the page root, read at touch start and on scroll settle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Largest reachable scroll offset.
    pub fn max_offset(&self) -> f64 {
        self.scroll_height - self.client_height
    }

    pub fn at_top(&self) -> bool {
        self.scroll_top == 0.0
    }

    pub fn at_bottom(&self) -> bool {
        self.scroll_top == self.max_offset()
    }
}

/// What the controller should do with a touch-move sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveOutcome {
    /// Call `preventDefault` on the native event.
    pub prevent_default: bool,
    /// Write this value to the page scroll offset.
    pub scroll_to: Option<f64>,
    pub event: Option<GestureEvent>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureSession {
    pub start_x: f64,
    pub start_y: f64,
    pub delta_x: f64,
    pub delta_y: f64,
    pub scroll_top: f64,
    pub max_offset: f64,
    pub has_pull_down_zone: bool,
    pub has_pull_up_zone: bool,
    pub fixed_axis: Option<Axis>,
    /// Pull direction the session entered first; the other one is closed to it.
    pub branch: Option<GestureFamily>,
    pub pull_down_armed: bool,
    pub pull_up_armed: bool,
}

impl GestureSession {
    pub fn begin(x: f64, y: f64, metrics: ScrollMetrics) -> Self {
        Self {
            start_x: x,
            start_y: y,
            scroll_top: metrics.scroll_top,
            max_offset: metrics.max_offset(),
            has_pull_down_zone: metrics.at_top(),
            has_pull_up_zone: metrics.at_bottom(),
            ..Default::default()
        }
    }

    fn in_any_zone(&self) -> bool {
        self.has_pull_down_zone || self.has_pull_up_zone
    }

    fn open_to(&self, family: GestureFamily) -> bool {
        self.branch.is_none_or(|b| b == family)
    }

    fn down_zone(&self) -> bool {
        self.has_pull_down_zone && self.open_to(GestureFamily::PullDown)
    }

    fn up_zone(&self) -> bool {
        self.has_pull_up_zone && self.open_to(GestureFamily::PullUp)
    }

    /// Feed one move sample (page coordinates of the first touch).
    pub fn track(&mut self, x: f64, y: f64, opts: &PullOptions) -> MoveOutcome {
        let mut out = MoveOutcome::default();
        self.delta_x = x - self.start_x;
        self.delta_y = y - self.start_y;

        if (opts.use_pull_down && self.has_pull_down_zone && self.delta_y > 0.0)
            || (opts.use_pull_up && self.has_pull_up_zone && self.delta_y < 0.0)
        {
            out.prevent_default = true;
        }

        // Decided from raw deltas; never revisited within the session.
        if self.fixed_axis.is_none() {
            self.fixed_axis = Some(if self.delta_y.abs() >= self.delta_x.abs() {
                Axis::Vertical
            } else {
                Axis::Horizontal
            });
        }

        if self.in_any_zone() {
            self.delta_y /= PULL_RESISTANCE;
        }

        if self.fixed_axis == Some(Axis::Vertical) {
            self.evaluate_pull(opts, &mut out);
        }
        out
    }

    fn evaluate_pull(&mut self, opts: &PullOptions, out: &mut MoveOutcome) {
        if opts.use_pull_down && self.down_zone() && self.delta_y > 0.0 {
            self.branch = Some(GestureFamily::PullDown);
            out.scroll_to = Some(0.0);
            self.pull_down_armed = self.delta_y >= opts.pull_down_offset;
            out.event = Some(GestureEvent::PullDownMove {
                distance: self.delta_y,
                threshold: opts.pull_down_offset,
            });
            return;
        }

        if opts.use_pull_up && self.up_zone() && self.delta_y < 0.0 {
            self.branch = Some(GestureFamily::PullUp);
            // Overscroll past the natural maximum; browsers that clamp make this a no-op.
            out.scroll_to = Some(self.max_offset - self.delta_y);
            self.pull_up_armed = self.delta_y <= -opts.pull_up_offset;
            out.event = Some(GestureEvent::PullUpMove {
                distance: self.delta_y.abs(),
                threshold: opts.pull_up_offset,
            });
        }
    }

    /// Resolve the release of a vertical gesture. First match wins, within the
    /// branch the session entered.
    pub fn finish(&self, opts: &PullOptions) -> Option<GestureEvent> {
        if self.fixed_axis != Some(Axis::Vertical) {
            return None;
        }
        if self.down_zone() && self.delta_y < opts.pull_down_offset {
            return Some(GestureEvent::PullDownCancel);
        }
        if self.pull_down_armed {
            return Some(GestureEvent::PullDown {
                threshold: opts.pull_down_offset,
            });
        }
        if self.up_zone() && self.delta_y > -opts.pull_up_offset {
            return Some(GestureEvent::PullUpCancel);
        }
        if self.pull_up_armed {
            return Some(GestureEvent::PullUp {
                threshold: opts.pull_up_offset,
            });
        }
        None
    }

    /// Resolve an interrupted gesture (`touchcancel`). Never commits; a vertical
    /// gesture inside a zone reports the matching cancel.
    pub fn abort(&self) -> Option<GestureEvent> {
        if self.fixed_axis != Some(Axis::Vertical) {
            return None;
        }
        if self.down_zone() {
            return Some(GestureEvent::PullDownCancel);
        }
        if self.up_zone() {
            return Some(GestureEvent::PullUpCancel);
        }
        None
    }
}
