use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::models::Envelope;
use crate::state::SharedState;
use crate::submission::{metadata, pipeline};

pub async fn submit(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            tracing::debug!("Failed to read request body: {rejection}");
            AppError::InvalidPayload
        }
    })?;

    let meta = metadata::extract(&headers, Some(addr.ip()), &state.config.trusted_proxies);

    let saved = pipeline::run(&state, &meta, &body).await?;

    Ok(Envelope::saved(saved.filename).into_response())
}

/// CORS preflight. The allow-* headers are added by the route layer.
pub async fn preflight() -> Response {
    (
        StatusCode::NO_CONTENT,
        [("Access-Control-Max-Age", "86400")],
    )
        .into_response()
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
