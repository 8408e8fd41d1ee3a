use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{
    auth, fixtures, news, products, settings, sliders, sponsors, standings, teams, tickets,
    upload,
};
use crate::state::AppState;

/// Everything under /admin except the login page sits behind the session
/// cookie gate.
pub fn routes(state: AppState) -> Router<AppState> {
    let gated = Router::new()
        .nest("/fixtures", fixture_admin())
        .nest("/standings", standing_admin())
        .nest("/teams", team_admin())
        .nest("/players", player_admin())
        .nest("/staff", staff_admin())
        .nest("/news", news_admin())
        .nest("/videos", video_admin())
        .nest("/products", product_admin())
        .nest("/tickets", ticket_admin())
        .nest("/sponsors", sponsor_admin())
        .nest("/sliders", slider_admin())
        .nest("/settings", settings_admin())
        .route("/upload", post(upload::upload_image))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::admin_gate,
        ));

    Router::new()
        .route("/login", get(auth::login_required))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .merge(gated)
}

fn fixture_admin() -> Router<AppState> {
    Router::new()
        .route("/", post(fixtures::create_fixture))
        .route("/:id", put(fixtures::update_fixture))
        .route("/:id/score", patch(fixtures::update_score))
        .route("/:id/status", patch(fixtures::update_status))
        .route("/:id/timeline", post(fixtures::add_timeline_event))
        .route("/:id/timeline/:index", put(fixtures::update_timeline_event))
        .route(
            "/:id/timeline/:index",
            delete(fixtures::delete_timeline_event),
        )
}

fn standing_admin() -> Router<AppState> {
    Router::new()
        .route("/", post(standings::create_standing))
        .route("/:id/rows", put(standings::replace_rows))
        .route("/:id/rows/:index", patch(standings::replace_row))
        .route("/:id", delete(standings::delete_standing))
}

fn team_admin() -> Router<AppState> {
    Router::new()
        .route("/", post(teams::create_team))
        .route("/:id", put(teams::update_team))
        .route("/:id", delete(teams::delete_team))
}

fn player_admin() -> Router<AppState> {
    Router::new()
        .route("/", post(teams::create_player))
        .route("/:id", put(teams::update_player))
        .route("/:id", delete(teams::delete_player))
}

fn staff_admin() -> Router<AppState> {
    Router::new()
        .route("/", post(teams::create_staff))
        .route("/:id", put(teams::update_staff))
        .route("/:id", delete(teams::delete_staff))
}

fn news_admin() -> Router<AppState> {
    Router::new()
        .route("/", post(news::create_news))
        .route("/:id", put(news::update_news))
        .route("/:id", delete(news::delete_news))
}

fn video_admin() -> Router<AppState> {
    Router::new()
        .route("/", post(news::create_video))
        .route("/:id", put(news::update_video))
        .route("/:id", delete(news::delete_video))
}

fn product_admin() -> Router<AppState> {
    Router::new()
        .route("/", post(products::create_product))
        .route("/:id", put(products::update_product))
        .route("/:id", delete(products::delete_product))
}

fn ticket_admin() -> Router<AppState> {
    Router::new()
        .route("/", post(tickets::create_ticket))
        .route("/:id", put(tickets::update_ticket))
        .route("/:id", delete(tickets::delete_ticket))
}

fn sponsor_admin() -> Router<AppState> {
    Router::new()
        .route("/", post(sponsors::create_sponsor))
        .route("/:id", put(sponsors::update_sponsor))
        .route("/:id", delete(sponsors::delete_sponsor))
}

fn slider_admin() -> Router<AppState> {
    Router::new()
        .route("/", post(sliders::create_slider))
        .route("/:id", put(sliders::update_slider))
        .route("/:id", delete(sliders::delete_slider))
        .route("/migrate-news", post(sliders::migrate_from_news))
}

fn settings_admin() -> Router<AppState> {
    Router::new()
        .route("/", get(settings::list_settings))
        .route("/:key", put(settings::set_setting))
        .route("/:key", delete(settings::delete_setting))
}
