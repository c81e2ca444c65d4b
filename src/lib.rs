pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod storage;
pub mod submission;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::{AppState, SharedState};

pub fn build_app(config: Config) -> Router {
    tracing::info!(
        "Saving applications to {} (on collision: {:?})",
        config.save_dir.display(),
        config.on_collision
    );

    let intake = routes::intake_routes(&config);
    let state: SharedState = Arc::new(AppState::new(config));

    Router::new()
        .merge(intake)
        .route("/health", axum::routing::get(health))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
