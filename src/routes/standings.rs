use axum::{routing::get, Router};

use crate::handlers::standings;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(standings::get_standings))
        .route("/:id", get(standings::get_standing_by_id))
}
