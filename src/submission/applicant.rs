use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

pub const NAME_FIELD: &str = "full_names";
pub const UNKNOWN_APPLICANT: &str = "unknown_applicant";

static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\- ]").unwrap());

/// Derive the filesystem-safe applicant token used in record filenames.
pub fn applicant_token(submission: &Map<String, Value>) -> String {
    submission
        .get(NAME_FIELD)
        .and_then(Value::as_str)
        .map(sanitize)
        .filter(|token| !token.is_empty())
        .unwrap_or_else(|| UNKNOWN_APPLICANT.to_string())
}

/// Drop everything outside `[A-Za-z0-9_- ]`, then turn spaces into underscores.
pub fn sanitize(name: &str) -> String {
    DISALLOWED_RE.replace_all(name, "").replace(' ', "_")
}
