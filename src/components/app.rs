use std::cell::{Cell, RefCell};
use std::rc::Rc;

use web_sys::HtmlElement;
use yew::prelude::*;
use yew_pull_gesture::env::Timeout;
use yew_pull_gesture::util::clog;
use yew_pull_gesture::{
    Callbacks, EventKind, GestureEvent, GestureFamily, Pull, PullError, PullOptions,
};

use super::feed::{FeedAction, FeedState};
use super::status_banner::StatusBanner;

const PULL_OFFSET: f64 = 60.0;
const REFRESH_MS: i32 = 800;
const LOAD_MS: i32 = 500;
const SETTLE_MS: u32 = 300;
/// Pages fetched before auto-load is torn down.
const MAX_PAGES: u32 = 4;

type Pending = Rc<RefCell<Option<Timeout>>>;

fn schedule(pending: &Pending, millis: i32, f: impl FnMut() + 'static) {
    let scheduled = web_sys::window()
        .ok_or(PullError::NoWindow)
        .and_then(|w| Timeout::schedule(&w, millis, f));
    match scheduled {
        Ok(t) => *pending.borrow_mut() = Some(t),
        Err(err) => clog(&format!("schedule failed: {}", err)),
    }
}

// Move the banner with the finger; `duration` animates it back.
fn slide(pull: &Pull, banner: &NodeRef, distance: f64, duration: Option<u32>) {
    if let Some(el) = banner.cast::<HtmlElement>() {
        let to = format!("translateY({:.0}px)", distance);
        if let Err(err) = pull.apply_transition(&el, "transform", &to, duration) {
            clog(&format!("transition failed: {}", err));
        }
    }
}

fn log_event(ev: &GestureEvent) {
    if let Ok(s) = serde_json::to_string(ev) {
        clog(&s);
    }
}

fn load_more(
    dispatch: UseReducerDispatcher<FeedState>,
    pending: Pending,
    loads: Rc<Cell<u32>>,
) -> impl Fn(&Pull, &GestureEvent) + 'static {
    move |pull: &Pull, ev: &GestureEvent| {
        log_event(ev);
        if pull.locked() {
            return;
        }
        pull.set_locked(true);
        dispatch.dispatch(FeedAction::Loading);
        let pull = pull.clone();
        let dispatch = dispatch.clone();
        let loads = loads.clone();
        schedule(&pending, LOAD_MS, move || {
            pull.set_locked(false);
            loads.set(loads.get() + 1);
            dispatch.dispatch(FeedAction::Loaded);
            if loads.get() >= MAX_PAGES {
                pull.destroy(GestureFamily::AutoLoad);
                pull.destroy(GestureFamily::PullUp);
                dispatch.dispatch(FeedAction::Exhausted);
            }
        });
    }
}

fn feed_callbacks(
    dispatch: UseReducerDispatcher<FeedState>,
    banner: NodeRef,
    pending: Pending,
) -> Callbacks {
    let loads = Rc::new(Cell::new(0u32));
    let on_move = {
        let dispatch = dispatch.clone();
        let banner = banner.clone();
        move |pull: &Pull, ev: &GestureEvent| {
            if let GestureEvent::PullDownMove { distance, threshold } = *ev {
                slide(pull, &banner, distance, None);
                dispatch.dispatch(FeedAction::Pulling { distance, threshold });
            }
        }
    };
    let on_cancel = {
        let dispatch = dispatch.clone();
        let banner = banner.clone();
        move |pull: &Pull, ev: &GestureEvent| {
            log_event(ev);
            slide(pull, &banner, 0.0, Some(SETTLE_MS));
            dispatch.dispatch(FeedAction::Settle);
        }
    };
    let on_refresh = {
        let dispatch = dispatch.clone();
        let banner = banner.clone();
        let pending = pending.clone();
        move |pull: &Pull, ev: &GestureEvent| {
            log_event(ev);
            pull.set_locked(true);
            slide(pull, &banner, PULL_OFFSET / 2.0, Some(SETTLE_MS));
            dispatch.dispatch(FeedAction::Refreshing);
            let pull = pull.clone();
            let dispatch = dispatch.clone();
            let banner = banner.clone();
            schedule(&pending, REFRESH_MS, move || {
                pull.set_locked(false);
                slide(&pull, &banner, 0.0, Some(SETTLE_MS));
                dispatch.dispatch(FeedAction::Refreshed);
            });
        }
    };
    Callbacks::new()
        .on(EventKind::PullDownMove, on_move)
        .on(EventKind::PullDownCancel, on_cancel)
        .on(EventKind::PullDown, on_refresh)
        .on(
            EventKind::PullUp,
            load_more(dispatch.clone(), pending.clone(), loads.clone()),
        )
        .on(EventKind::AutoLoad, load_more(dispatch, pending, loads))
}

#[function_component(App)]
pub fn app() -> Html {
    let feed = use_reducer(FeedState::initial);
    let banner = use_node_ref();
    let pending: Pending = use_mut_ref(|| None);

    // Controller lives as long as the app is mounted.
    {
        let dispatch = feed.dispatcher();
        let banner = banner.clone();
        let pending = pending.clone();
        use_effect_with((), move |_| {
            let options = PullOptions::default()
                .selector("#feed")
                .pull_down(PULL_OFFSET)
                .pull_up(PULL_OFFSET)
                .auto_load();
            let callbacks = feed_callbacks(dispatch, banner, pending.clone());
            let pull = match Pull::new(options, callbacks) {
                Ok(p) => Some(p),
                Err(err) => {
                    clog(&format!("pull controller unavailable: {}", err));
                    None
                }
            };
            move || {
                // Pending timers hold controller handles; clear them first.
                pending.borrow_mut().take();
                drop(pull);
            }
        });
    }

    html! {
        <div id="feed" style="min-height:100vh; background:#0e1116; color:#c9d1d9; font-family:sans-serif;">
            <StatusBanner status={feed.status.clone()} node={banner.clone()} />
            { for feed.items.iter().map(|item| html! {
                <div key={item.clone()} style="padding:18px 16px; border-bottom:1px solid #21262d;">{ item.clone() }</div>
            }) }
        </div>
    }
}
