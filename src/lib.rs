//! Pull-down-to-refresh, pull-up-to-load-more and scroll auto-load for wasm32
//! pages.
//!
//! ```no_run
//! use yew_pull_gesture::{Callbacks, EventKind, GestureEvent, Pull, PullOptions};
//!
//! let options = PullOptions::default().selector("#feed").pull_down(60.0).auto_load();
//! let callbacks = Callbacks::new()
//!     .on(EventKind::PullDown, |pull, _| pull.set_locked(true))
//!     .on(EventKind::PullDownMove, |_, ev| {
//!         if let GestureEvent::PullDownMove { distance, .. } = ev {
//!             let _ = distance;
//!         }
//!     });
//! let pull = Pull::new(options, callbacks).expect("controller");
//! ```
//!
//! The gesture math lives in [`state`] and the controller bookkeeping in
//! [`hub`]; neither touches the DOM. [`Pull`] wires them to real touch and
//! scroll events.

pub mod env;
pub mod error;
pub mod hub;
pub mod model;
pub mod pull;
pub mod registry;
pub mod state;
pub mod util;

pub use error::PullError;
pub use hub::Hub;
pub use model::{Axis, EventKind, GestureEvent, GestureFamily, PullOptions};
pub use pull::{Callbacks, Listener, Pull};
pub use state::{GestureSession, MoveOutcome, PullTracker, ScrollMetrics};
