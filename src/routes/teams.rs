use axum::{routing::get, Router};

use crate::handlers::teams;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(teams::get_teams))
        .route("/:id", get(teams::get_team_by_id))
        .route("/:id/players", get(teams::get_team_players))
        .route("/:id/staff", get(teams::get_team_staff))
}

pub fn player_routes() -> Router<AppState> {
    Router::new().route("/", get(teams::get_players))
}

pub fn staff_routes() -> Router<AppState> {
    Router::new().route("/", get(teams::get_staff))
}
