use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Body of every response from the submit endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl Envelope {
    pub fn saved(filename: String) -> Self {
        Envelope {
            success: true,
            message: "Application saved successfully.".to_string(),
            filename: Some(filename),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Envelope {
            success: false,
            message: message.into(),
            filename: None,
        }
    }

    /// Render with the given status and an explicit UTF-8 JSON content type.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        let body = match serde_json::to_vec(&self) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Failed to encode response envelope: {e}");
                br#"{"success":false,"message":"Internal server error"}"#.to_vec()
            }
        };

        (
            status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json; charset=UTF-8"),
            )],
            body,
        )
            .into_response()
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        self.into_response_with(StatusCode::OK)
    }
}
