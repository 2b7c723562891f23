use super::feed::Status;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusBannerProps {
    pub status: Status,
    pub node: NodeRef,
}

fn label(status: &Status) -> String {
    match status {
        Status::Idle => "Pull down to refresh".to_string(),
        Status::Pulling { ready: false, distance } => format!("Keep pulling ({:.0}px)", distance),
        Status::Pulling { ready: true, .. } => "Release to refresh".to_string(),
        Status::Refreshing => "Refreshing…".to_string(),
        Status::Loading => "Loading more…".to_string(),
        Status::Exhausted => "No more items".to_string(),
    }
}

#[function_component(StatusBanner)]
pub fn status_banner(props: &StatusBannerProps) -> Html {
    html! {<div ref={props.node.clone()} style="padding:12px; text-align:center; font-size:13px; color:#8b949e; transform:translateY(0px);">
        { label(&props.status) }
    </div>}
}
