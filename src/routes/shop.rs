use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{checkout, products, tickets};
use crate::state::AppState;

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::get_products))
        .route("/:id", get(products::get_product_by_id))
}

pub fn ticket_routes() -> Router<AppState> {
    Router::new().route("/", get(tickets::get_tickets))
}

pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/config", get(checkout::checkout_config))
        .route("/session", post(checkout::create_checkout_session))
        .route("/payment-intent", post(checkout::create_payment_intent))
}
