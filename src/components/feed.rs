//! Feed state for the demo page, driven by gesture callbacks.

use std::rc::Rc;
use yew::Reducible;

/// Items added per refresh or page load.
pub const PAGE_SIZE: u32 = 8;

#[derive(Clone, Debug, PartialEq)]
pub enum Status {
    Idle,
    Pulling { distance: f64, ready: bool },
    Refreshing,
    Loading,
    /// No more pages; auto-load has been torn down.
    Exhausted,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeedState {
    pub items: Vec<String>,
    pub next_id: u32,
    pub refreshes: u32,
    pub status: Status,
}

pub enum FeedAction {
    Pulling { distance: f64, threshold: f64 },
    Settle,
    Refreshing,
    Refreshed,
    Loading,
    Loaded,
    Exhausted,
}

impl FeedState {
    pub fn initial() -> Self {
        let mut s = Self {
            items: Vec::new(),
            next_id: 0,
            refreshes: 0,
            status: Status::Idle,
        };
        s.append_page();
        s.append_page();
        s
    }

    fn append_page(&mut self) {
        for _ in 0..PAGE_SIZE {
            self.items.push(format!("Item #{}", self.next_id));
            self.next_id += 1;
        }
    }
}

impl Reducible for FeedState {
    type Action = FeedAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use FeedAction::*;
        let mut new = (*self).clone();
        match action {
            Pulling { distance, threshold } => {
                new.status = Status::Pulling {
                    distance,
                    ready: distance >= threshold,
                };
            }
            Settle => {
                if matches!(new.status, Status::Pulling { .. }) {
                    new.status = Status::Idle;
                }
            }
            Refreshing => new.status = Status::Refreshing,
            Refreshed => {
                new.refreshes += 1;
                let fresh = format!("Fresh item (refresh {})", new.refreshes);
                new.items.insert(0, fresh);
                new.status = Status::Idle;
            }
            Loading => {
                if new.status != Status::Exhausted {
                    new.status = Status::Loading;
                }
            }
            Loaded => {
                new.append_page();
                if new.status == Status::Loading {
                    new.status = Status::Idle;
                }
            }
            Exhausted => new.status = Status::Exhausted,
        }
        Rc::new(new)
    }
}
