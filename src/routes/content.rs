use axum::{routing::get, Router};

use crate::handlers::{news, settings, sliders, sponsors};
use crate::state::AppState;

pub fn news_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(news::get_news))
        .route("/:id", get(news::get_news_by_id))
}

pub fn video_routes() -> Router<AppState> {
    Router::new().route("/", get(news::get_videos))
}

pub fn sponsor_routes() -> Router<AppState> {
    Router::new().route("/", get(sponsors::get_sponsors))
}

pub fn slider_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(sliders::get_sliders))
        .route("/debug", get(sliders::debug_sliders))
}

pub fn settings_routes() -> Router<AppState> {
    Router::new().route("/:key", get(settings::get_setting))
}
