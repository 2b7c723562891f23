//! Core data models for the pull gesture controller.
//! Options, event kinds and the typed events handed to listeners.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PullError;

/// Threshold used when an offset is missing or not a positive number.
pub const DEFAULT_OFFSET: f64 = 50.0;
/// Quiet period after the last window scroll before the bottom check runs.
pub const AUTO_LOAD_DEBOUNCE_MS: i32 = 100;
/// Vertical travel is divided by this while a pull zone is active.
pub const PULL_RESISTANCE: f64 = 3.0;

/// The seven events a controller can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    AutoLoad,
    PullDown,
    PullDownMove,
    PullDownCancel,
    PullUp,
    PullUpMove,
    PullUpCancel,
}

impl EventKind {
    pub const COUNT: usize = 7;
    pub const ALL: [EventKind; Self::COUNT] = [
        EventKind::AutoLoad,
        EventKind::PullDown,
        EventKind::PullDownMove,
        EventKind::PullDownCancel,
        EventKind::PullUp,
        EventKind::PullUpMove,
        EventKind::PullUpCancel,
    ];

    /// Slot in the registry table.
    pub fn index(self) -> usize {
        match self {
            EventKind::AutoLoad => 0,
            EventKind::PullDown => 1,
            EventKind::PullDownMove => 2,
            EventKind::PullDownCancel => 3,
            EventKind::PullUp => 4,
            EventKind::PullUpMove => 5,
            EventKind::PullUpCancel => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::AutoLoad => "autoLoad",
            EventKind::PullDown => "pullDown",
            EventKind::PullDownMove => "pullDownMove",
            EventKind::PullDownCancel => "pullDownCancel",
            EventKind::PullUp => "pullUp",
            EventKind::PullUpMove => "pullUpMove",
            EventKind::PullUpCancel => "pullUpCancel",
        }
    }

    pub fn family(self) -> GestureFamily {
        match self {
            EventKind::AutoLoad => GestureFamily::AutoLoad,
            EventKind::PullDown | EventKind::PullDownMove | EventKind::PullDownCancel => {
                GestureFamily::PullDown
            }
            EventKind::PullUp | EventKind::PullUpMove | EventKind::PullUpCancel => {
                GestureFamily::PullUp
            }
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = PullError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| PullError::UnknownName(s.to_string()))
    }
}

/// Groups of events torn down together by `Pull::destroy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GestureFamily {
    PullDown,
    PullUp,
    AutoLoad,
}

impl GestureFamily {
    pub fn kinds(self) -> &'static [EventKind] {
        match self {
            GestureFamily::PullDown => &[
                EventKind::PullDownMove,
                EventKind::PullDownCancel,
                EventKind::PullDown,
            ],
            GestureFamily::PullUp => &[
                EventKind::PullUpMove,
                EventKind::PullUpCancel,
                EventKind::PullUp,
            ],
            GestureFamily::AutoLoad => &[EventKind::AutoLoad],
        }
    }
}

impl FromStr for GestureFamily {
    type Err = PullError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pullDown" => Ok(GestureFamily::PullDown),
            "pullUp" => Ok(GestureFamily::PullUp),
            "autoLoad" => Ok(GestureFamily::AutoLoad),
            other => Err(PullError::UnknownName(other.to_string())),
        }
    }
}

/// An emitted gesture event with its positional arguments.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GestureEvent {
    AutoLoad,
    PullDown { threshold: f64 },
    PullDownMove { distance: f64, threshold: f64 },
    PullDownCancel,
    PullUp { threshold: f64 },
    PullUpMove { distance: f64, threshold: f64 },
    PullUpCancel,
}

impl GestureEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GestureEvent::AutoLoad => EventKind::AutoLoad,
            GestureEvent::PullDown { .. } => EventKind::PullDown,
            GestureEvent::PullDownMove { .. } => EventKind::PullDownMove,
            GestureEvent::PullDownCancel => EventKind::PullDownCancel,
            GestureEvent::PullUp { .. } => EventKind::PullUp,
            GestureEvent::PullUpMove { .. } => EventKind::PullUpMove,
            GestureEvent::PullUpCancel => EventKind::PullUpCancel,
        }
    }

    /// Pull distance for the two move events.
    pub fn distance(&self) -> Option<f64> {
        match self {
            GestureEvent::PullDownMove { distance, .. } | GestureEvent::PullUpMove { distance, .. } => {
                Some(*distance)
            }
            _ => None,
        }
    }
}

/// Axis a gesture is locked to after its first move sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// Controller options. Callbacks are passed separately as `Callbacks`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullOptions {
    /// CSS selector of the container; falls back to `<body>`.
    #[serde(default)]
    pub el: Option<String>,
    #[serde(default)]
    pub use_pull_down: bool,
    #[serde(default)]
    pub use_pull_up: bool,
    #[serde(default)]
    pub use_auto_load: bool,
    #[serde(default = "default_offset")]
    pub pull_down_offset: f64,
    #[serde(default = "default_offset")]
    pub pull_up_offset: f64,
}

fn default_offset() -> f64 {
    DEFAULT_OFFSET
}

impl Default for PullOptions {
    fn default() -> Self {
        Self {
            el: None,
            use_pull_down: false,
            use_pull_up: false,
            use_auto_load: false,
            pull_down_offset: default_offset(),
            pull_up_offset: default_offset(),
        }
    }
}

impl PullOptions {
    pub fn from_json(raw: &str) -> Result<Self, PullError> {
        let opts: PullOptions = serde_json::from_str(raw)?;
        Ok(opts.normalized())
    }

    /// Replaces unusable offsets (zero, negative, NaN, infinite) with the default.
    pub fn normalized(mut self) -> Self {
        self.pull_down_offset = sanitize_offset(self.pull_down_offset);
        self.pull_up_offset = sanitize_offset(self.pull_up_offset);
        self
    }

    pub fn pull_down(mut self, offset: f64) -> Self {
        self.use_pull_down = true;
        self.pull_down_offset = offset;
        self
    }

    pub fn pull_up(mut self, offset: f64) -> Self {
        self.use_pull_up = true;
        self.pull_up_offset = offset;
        self
    }

    pub fn auto_load(mut self) -> Self {
        self.use_auto_load = true;
        self
    }

    pub fn selector(mut self, el: impl Into<String>) -> Self {
        self.el = Some(el.into());
        self
    }
}

fn sanitize_offset(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { DEFAULT_OFFSET }
}
