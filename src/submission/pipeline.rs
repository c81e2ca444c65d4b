use chrono::Local;

use crate::error::AppError;
use crate::state::SharedState;
use crate::storage::{self, SavedRecord};

use super::applicant;
use super::metadata::RequestMeta;
use super::parser;

/// Validate a raw body and persist it as a new record.
pub async fn run(state: &SharedState, meta: &RequestMeta, body: &[u8]) -> Result<SavedRecord, AppError> {
    let submission = parser::parse_body(body)?;

    state.store.ensure_dir().await?;

    let token = applicant::applicant_token(&submission);
    let contents = storage::encode(&submission)?;
    let now = Local::now().naive_local();

    let saved = state.store.write(&now, &token, &contents).await?;

    tracing::info!(
        request_id = %meta.request_id,
        ip = %meta.ip,
        user_agent = %meta.user_agent,
        fields = submission.len(),
        bytes = saved.bytes,
        "Saved application {}",
        saved.filename
    );

    Ok(saved)
}
