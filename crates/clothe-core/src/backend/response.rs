//! Request body construction and typed response projection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::endpoint::ResponseKey;
use super::error::BackendError;

/// JSON body sent to every outfit endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitRequest<'a> {
    pub user_id: &'a str,
    pub text: &'a str,
}

/// Serializes `{"userId": ..., "text": ...}`.
///
/// # Errors
/// Returns an error only if serde fails to serialize two strings.
pub fn request_body(user_id: &str, text: &str) -> serde_json::Result<String> {
    serde_json::to_string(&OutfitRequest { user_id, text })
}

#[derive(Debug, Deserialize)]
struct IdeaResponse {
    idea: String,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    parsed: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    message: String,
}

/// Decodes a response body and projects it onto the display text for `key`.
///
/// # Errors
/// Returns `BackendError::UnexpectedFormat` when the body is not JSON, the field
/// is missing or mistyped, or the field is empty.
pub fn extract_display_text(key: ResponseKey, body: &str) -> Result<String, BackendError> {
    match key {
        ResponseKey::Idea => {
            let response: IdeaResponse = decode(body)?;
            if response.idea.is_empty() {
                return Err(BackendError::UnexpectedFormat("empty idea".to_string()));
            }
            Ok(response.idea.replace("\\n", "\n"))
        }
        ResponseKey::Parsed => {
            let response: AnalyzeResponse = decode(body)?;
            if response.parsed.is_empty() {
                return Err(BackendError::UnexpectedFormat(
                    "empty parsed object".to_string(),
                ));
            }
            Ok(format_attributes(&response.parsed))
        }
    }
}

/// Decodes the backend root route's `{"message": ...}` body.
pub(crate) fn extract_health_message(body: &str) -> Result<String, BackendError> {
    let response: HealthResponse = decode(body)?;
    Ok(response.message)
}

fn decode<'a, T: Deserialize<'a>>(body: &'a str) -> Result<T, BackendError> {
    serde_json::from_str(body).map_err(|e| BackendError::UnexpectedFormat(e.to_string()))
}

/// One `key: value` line per attribute, in the order the backend sent them.
fn format_attributes(attributes: &Map<String, Value>) -> String {
    attributes
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{key}: {s}"),
            other => format!("{key}: {other}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
