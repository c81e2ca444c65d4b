pub mod submit;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue};
use axum::routing::post;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::Config;
use crate::state::SharedState;

pub const ALLOWED_HEADERS: &str =
    "Content-Type, Access-Control-Allow-Headers, Authorization, X-Requested-With";

pub fn intake_routes(config: &Config) -> Router<SharedState> {
    Router::new()
        .route(
            "/submit",
            post(submit::submit)
                .options(submit::preflight)
                .fallback(submit::method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-origin"),
            config.cors_origin.clone(),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-methods"),
            HeaderValue::from_static("POST"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-headers"),
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
}
