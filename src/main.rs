use axum::extract::State;
use axum::{http::Method, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

mod config;
mod database;
mod datefmt;
mod dtos;
mod errors;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;
mod state;

use config::AppConfig;
use database::connection::{ensure_indexes, get_db_client};
use services::auth::{MarkerSession, SharedPassword};
use services::cloudinary::CloudinaryService;
use services::stripe::StripeService;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = AppConfig::from_env();
    tracing::info!("Starting in {} mode", config.app_environment);

    let db = get_db_client(&config.database_url, &config.database_name)
        .await
        .map_err(|e| anyhow::anyhow!("Database startup failed: {}", e))?;
    if let Err(e) = ensure_indexes(&db).await {
        tracing::warn!("Failed to ensure indexes: {}", e);
    }

    let app_state = initialize_app_state(db, &config);

    let app = build_router(app_state);
    start_server(app, &config).await;
    Ok(())
}

fn initialize_app_state(db: mongodb::Database, config: &AppConfig) -> AppState {
    let credentials = Arc::new(SharedPassword::new(config.admin_password.clone()));
    let sessions = Arc::new(MarkerSession::new());
    let mut app_state = AppState::new(db, credentials, sessions);

    match CloudinaryService::from_env() {
        Ok(cloudinary) => {
            tracing::info!("Cloudinary service initialized");
            app_state = app_state.with_cloudinary(Arc::new(cloudinary));
        }
        Err(e) => {
            tracing::warn!("Cloudinary disabled: {}", e);
        }
    }

    match (&config.stripe_secret_key, &config.stripe_publishable_key) {
        (Some(secret), Some(publishable)) => {
            match StripeService::new(
                secret.clone(),
                publishable.clone(),
                config.checkout_success_url.clone(),
                config.checkout_cancel_url.clone(),
            ) {
                Ok(stripe) => {
                    tracing::info!("Stripe service initialized");
                    app_state = app_state.with_stripe(Arc::new(stripe));
                }
                Err(e) => {
                    tracing::error!("Failed to initialize Stripe: {}", e);
                    tracing::warn!("Checkout will be disabled");
                }
            }
        }
        _ => {
            tracing::warn!("Stripe keys not set, checkout will be disabled");
        }
    }

    app_state
}

fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .allow_credentials(false);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/api/health", get(api_health_check))
        .nest("/api/fixtures", routes::fixtures::routes())
        .nest("/api/standings", routes::standings::routes())
        .nest("/api/teams", routes::teams::routes())
        .nest("/api/players", routes::teams::player_routes())
        .nest("/api/staff", routes::teams::staff_routes())
        .nest("/api/news", routes::content::news_routes())
        .nest("/api/videos", routes::content::video_routes())
        .nest("/api/sponsors", routes::content::sponsor_routes())
        .nest("/api/sliders", routes::content::slider_routes())
        .nest("/api/settings", routes::content::settings_routes())
        .nest("/api/products", routes::shop::product_routes())
        .nest("/api/tickets", routes::shop::ticket_routes())
        .nest("/api/checkout", routes::shop::checkout_routes())
        .nest("/admin", routes::admin::routes(app_state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

async fn start_server(app: Router, config: &AppConfig) {
    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Server starting on {}", addr);

    match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Server error: {}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    }
}

async fn root_handler() -> &'static str {
    "Club Website API"
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn api_health_check(State(state): State<AppState>) -> Json<Value> {
    use mongodb::bson::doc;

    let db_status = match state.db.run_command(doc! {"ping": 1}).await {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };

    Json(json!({
        "status": "healthy",
        "database": db_status,
        "stripe": state.stripe.is_some(),
        "cloudinary": state.cloudinary.is_some(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
