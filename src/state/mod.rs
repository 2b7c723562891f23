pub mod debounce;
pub mod session;
pub mod tracker;

pub use debounce::Debounce;
pub use session::{GestureSession, MoveOutcome, ScrollMetrics};
pub use tracker::PullTracker;
