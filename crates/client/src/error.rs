use thiserror::Error;

use galleria_core::DomainError;

/// Failure of a single backend call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid client configuration: {0}")]
    Config(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    /// Map a non-success response to an error.
    ///
    /// The backend reports duplicates with a message containing
    /// "already exists", not always with a 409.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| format!("HTTP {status}"));
        if status == 404 {
            return ApiError::NotFound(message);
        }
        if status == 409 || message.to_lowercase().contains("already exists") {
            return ApiError::Conflict(message);
        }
        ApiError::Status { status, message }
    }

    /// Whether the call may have reached the backend without an answer.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Parse(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Looks at `message`, then `error`, then `title` (problem details), and
/// falls back to the raw text.
fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error", "title"] {
            if let Some(msg) = map.get(key).and_then(|v| v.as_str()) {
                if !msg.trim().is_empty() {
                    return Some(msg.trim().to_string());
                }
            }
        }
    }
    Some(body.to_string())
}
