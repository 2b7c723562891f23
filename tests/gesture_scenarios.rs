use std::cell::RefCell;
use std::rc::Rc;

use yew_pull_gesture::hub::{self, Hub};
use yew_pull_gesture::registry::Callbacks;
use yew_pull_gesture::state::Debounce;
use yew_pull_gesture::{
    EventKind, GestureEvent, GestureFamily, PullOptions, PullTracker, ScrollMetrics,
};

fn page(scroll_top: f64) -> ScrollMetrics {
    ScrollMetrics {
        scroll_top,
        scroll_height: 1000.0,
        client_height: 500.0,
    }
}

/// Drive one vertical gesture and collect every emitted event.
fn run(tracker: &mut PullTracker, metrics: ScrollMetrics, ys: &[f64]) -> Vec<GestureEvent> {
    let mut events = Vec::new();
    tracker.touch_start(Some((0.0, ys[0])), metrics);
    for y in &ys[1..] {
        if let Some(ev) = tracker.touch_move(Some((0.0, *y))).event {
            events.push(ev);
        }
    }
    if let Some(ev) = tracker.touch_end(true) {
        events.push(ev);
    }
    events
}

#[test]
fn short_pull_emits_move_then_cancel() {
    let mut t = PullTracker::new(PullOptions::default().pull_down(50.0));
    let events = run(&mut t, page(0.0), &[100.0, 160.0]);
    assert_eq!(
        events,
        vec![
            GestureEvent::PullDownMove {
                distance: 20.0,
                threshold: 50.0
            },
            GestureEvent::PullDownCancel,
        ]
    );
}

#[test]
fn long_pull_arms_and_commits() {
    let mut t = PullTracker::new(PullOptions::default().pull_down(50.0));
    t.touch_start(Some((0.0, 100.0)), page(0.0));
    let out = t.touch_move(Some((0.0, 300.0)));
    match out.event {
        Some(GestureEvent::PullDownMove { distance, threshold }) => {
            assert!((distance - 200.0 / 3.0).abs() < 1e-9);
            assert_eq!(threshold, 50.0);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(t.session().unwrap().pull_down_armed);
    assert_eq!(t.touch_end(true), Some(GestureEvent::PullDown { threshold: 50.0 }));
}

#[test]
fn monotonic_pull_below_threshold_never_commits() {
    for threshold in [10.0, 50.0, 120.0] {
        let mut t = PullTracker::new(PullOptions::default().pull_down(threshold));
        // Damped distance tops out at threshold - 1.
        let ys: Vec<f64> = (0..=30)
            .map(|i| 100.0 + (threshold - 1.0) * 3.0 * i as f64 / 30.0)
            .collect();
        let events = run(&mut t, page(0.0), &ys);
        assert_eq!(events.last(), Some(&GestureEvent::PullDownCancel));
        assert!(!events.iter().any(|e| e.kind() == EventKind::PullDown));
    }
}

#[test]
fn committed_pull_has_non_decreasing_distances_and_one_commit() {
    let threshold = 40.0;
    let mut t = PullTracker::new(PullOptions::default().pull_down(threshold));
    let ys: Vec<f64> = (0..=20).map(|i| 100.0 + 10.0 * i as f64).collect();
    let events = run(&mut t, page(0.0), &ys);

    let commits: Vec<_> = events
        .iter()
        .filter(|e| e.kind() == EventKind::PullDown)
        .collect();
    assert_eq!(commits, vec![&GestureEvent::PullDown { threshold }]);

    let distances: Vec<f64> = events.iter().filter_map(GestureEvent::distance).collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(events.last().map(GestureEvent::kind), Some(EventKind::PullDown));
}

#[test]
fn no_session_mixes_pull_down_and_pull_up_events() {
    let opts = PullOptions::default().pull_down(50.0).pull_up(50.0);
    let short_page = ScrollMetrics {
        scroll_top: 0.0,
        scroll_height: 300.0,
        client_height: 300.0,
    };
    for ys in [
        vec![300.0, 500.0],
        vec![300.0, 0.0],
        vec![300.0, 350.0, 200.0],
        vec![300.0, 250.0, 450.0],
        vec![300.0, 500.0, 100.0, 500.0],
        vec![300.0],
    ] {
        let mut t = PullTracker::new(opts.clone());
        let events = run(&mut t, short_page, &ys);
        let families: Vec<GestureFamily> = events.iter().map(|e| e.kind().family()).collect();
        assert!(
            !(families.contains(&GestureFamily::PullDown)
                && families.contains(&GestureFamily::PullUp)),
            "{:?} -> {:?}",
            ys,
            events
        );
        let ends = events.iter().filter(|e| e.distance().is_none()).count();
        assert!(ends <= 1, "{:?}", events);
    }
}

#[test]
fn cancelled_touch_never_commits() {
    let mut t = PullTracker::new(PullOptions::default().pull_down(50.0));
    t.touch_start(Some((0.0, 100.0)), page(0.0));
    t.touch_move(Some((0.0, 400.0)));
    assert!(t.session().unwrap().pull_down_armed);
    assert_eq!(t.touch_cancel(true), Some(GestureEvent::PullDownCancel));
    assert_eq!(t.touch_end(true), None);
}

#[test]
fn pull_up_at_bottom_commits() {
    let mut t = PullTracker::new(PullOptions::default().pull_up(50.0));
    let events = run(&mut t, page(500.0), &[400.0, 300.0, 200.0]);
    assert_eq!(
        events.last(),
        Some(&GestureEvent::PullUp { threshold: 50.0 })
    );
}

#[test]
fn horizontal_swipe_emits_nothing() {
    let mut t = PullTracker::new(PullOptions::default().pull_down(50.0));
    t.touch_start(Some((100.0, 100.0)), page(0.0));
    assert_eq!(t.touch_move(Some((160.0, 110.0))).event, None);
    // Now mostly vertical, but the axis is already horizontal.
    assert_eq!(t.touch_move(Some((161.0, 500.0))).event, None);
    assert_eq!(t.touch_end(true), None);
}

#[test]
fn lock_window_emits_no_moves() {
    let mut t = PullTracker::new(PullOptions::default().pull_down(50.0));
    t.touch_start(Some((0.0, 100.0)), page(0.0));
    t.set_locked(true);
    for y in [150.0, 250.0, 400.0] {
        let out = t.touch_move(Some((0.0, y)));
        assert!(out.prevent_default);
        assert_eq!(out.event, None);
    }
    t.set_locked(false);
    assert!(t.touch_move(Some((0.0, 160.0))).event.is_some());
}

#[test]
fn listeners_see_events_through_hub() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut callbacks: Callbacks<()> = Callbacks::new();
    for kind in EventKind::ALL {
        let log = log.clone();
        callbacks = callbacks.on(kind, move |_: &(), ev: &GestureEvent| log.borrow_mut().push(*ev));
    }
    let state: RefCell<Hub<(), Timer>> =
        RefCell::new(Hub::new(PullOptions::default().pull_down(50.0), &callbacks));

    let gesture = |state: &RefCell<Hub<(), Timer>>| {
        let mut t = PullTracker::new(state.borrow().tracker().options().clone());
        run(&mut t, page(0.0), &[100.0, 300.0])
            .iter()
            .map(|ev| hub::emit(state, &(), ev))
            .sum::<usize>()
    };
    assert_eq!(gesture(&state), 2);
    assert_eq!(log.borrow().len(), 2);

    state.borrow_mut().destroy(GestureFamily::PullDown);
    assert_eq!(gesture(&state), 0);
    assert_eq!(log.borrow().len(), 2);
}

/// Timer stand-in: registered as live while pending, removed when dropped.
struct Timer {
    due: u32,
    live: Rc<RefCell<Vec<u32>>>,
}

impl Timer {
    fn new(due: u32, live: &Rc<RefCell<Vec<u32>>>) -> Self {
        live.borrow_mut().push(due);
        Self {
            due,
            live: live.clone(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let due = self.due;
        self.live.borrow_mut().retain(|d| *d != due);
    }
}

#[test]
fn scroll_burst_leaves_one_pending_check() {
    let live = Rc::new(RefCell::new(Vec::new()));
    let mut debounce = Debounce::new();
    for t in [0, 30, 60, 90] {
        debounce.arm(Timer::new(t + 100, &live));
    }
    // Only the timer armed by the last scroll survives.
    assert_eq!(*live.borrow(), vec![190]);

    debounce.cancel();
    assert!(live.borrow().is_empty());
}

#[test]
fn bottom_check_requires_exact_max_offset() {
    assert!(page(500.0).at_bottom());
    assert!(!page(499.0).at_bottom());
    assert!(!page(0.0).at_bottom());
}
