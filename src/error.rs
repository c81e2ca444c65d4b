use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::models::Envelope;

pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed. Only POST requests are accepted.";
pub const INVALID_PAYLOAD: &str = "Invalid or empty JSON data received in the request body.";
pub const PAYLOAD_TOO_LARGE: &str = "Request body exceeds the maximum allowed size.";

#[derive(Debug)]
pub enum AppError {
    MethodNotAllowed,
    InvalidPayload,
    PayloadTooLarge,
    StorageUnavailable { dir: PathBuf, source: std::io::Error },
    EncodingFailure(serde_json::Error),
    WriteFailure { dir: PathBuf, source: std::io::Error },
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            AppError::InvalidPayload => write!(f, "Invalid Payload"),
            AppError::PayloadTooLarge => write!(f, "Payload Too Large"),
            AppError::StorageUnavailable { dir, source } => {
                write!(f, "Storage Unavailable: {}: {source}", dir.display())
            }
            AppError::EncodingFailure(err) => write!(f, "Encoding Failure: {err}"),
            AppError::WriteFailure { dir, source } => {
                write!(f, "Write Failure: {}: {source}", dir.display())
            }
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::InvalidPayload => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::StorageUnavailable { .. }
            | AppError::EncodingFailure(_)
            | AppError::WriteFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller. IO details stay in the logs.
    pub fn message(&self) -> String {
        match self {
            AppError::MethodNotAllowed => METHOD_NOT_ALLOWED.to_string(),
            AppError::InvalidPayload => INVALID_PAYLOAD.to_string(),
            AppError::PayloadTooLarge => PAYLOAD_TOO_LARGE.to_string(),
            AppError::StorageUnavailable { dir, .. } => format!(
                "FATAL ERROR: Could not create save directory: '{}'. \
                 Please ensure the server has WRITE permissions for the parent folder.",
                dir.display()
            ),
            AppError::EncodingFailure(err) => format!("JSON encoding failed: {err}"),
            AppError::WriteFailure { dir, .. } => format!(
                "File Write Error: Failed to write data to file. \
                 Check if the server has WRITE permissions to the existing '{}' folder.",
                dir.display()
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::debug!("Rejected submission: {self}");
        }

        Envelope::failure(self.message()).into_response_with(status)
    }
}
