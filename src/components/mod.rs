pub mod app;
pub mod feed;
pub mod status_banner;
