use axum::{routing::get, Router};

use crate::handlers::fixtures;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(fixtures::get_fixtures))
        .route("/upcoming", get(fixtures::get_upcoming))
        .route("/results", get(fixtures::get_results))
        .route("/:id", get(fixtures::get_fixture_by_id))
}
