use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Key used for messages that do not belong to a single form field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";
const DETAIL: &str = "detail";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection failures, timeouts and malformed HTTP exchanges.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend rejected the payload (HTTP 400).
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("authentication required")]
    Unauthorized,

    #[error("permission denied: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-success status, including 5xx.
    #[error("backend returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("credential storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("no refresh token stored; log in again")]
    MissingRefreshToken,
}

impl ApiError {
    /// Maps an error response onto the taxonomy. `body` is the raw response
    /// text, which may or may not be JSON.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            400 => ApiError::Validation(FieldErrors::from_body(body)),
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden(detail_message(body)),
            404 => ApiError::NotFound(detail_message(body)),
            _ => ApiError::Status {
                status,
                detail: detail_message(body),
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    /// Network-level or server-side failures, as opposed to problems with
    /// the request itself.
    pub fn is_transport(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Backend validation messages keyed by form field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn from_body(body: &str) -> Self {
        let mut errors = FieldErrors::default();
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => {
                for (field, value) in map {
                    errors.collect(&field, &value);
                }
            }
            Ok(other) => errors.collect(NON_FIELD_ERRORS, &other),
            Err(_) => {
                let text = body.trim();
                if !text.is_empty() {
                    errors.push(DETAIL, text.to_string());
                }
            }
        }
        errors
    }

    fn collect(&mut self, field: &str, value: &Value) {
        match value {
            Value::String(message) => self.push(field, message.clone()),
            Value::Array(items) => {
                for item in items {
                    self.collect(field, item);
                }
            }
            Value::Object(nested) => {
                for (key, inner) in nested {
                    self.collect(&format!("{field}.{key}"), inner);
                }
            }
            Value::Null => {}
            other => self.push(field, other.to_string()),
        }
    }

    fn push(&mut self, field: &str, message: String) {
        self.0.entry(field.to_string()).or_default().push(message);
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn non_field(&self) -> &[String] {
        self.get(NON_FIELD_ERRORS)
            .or_else(|| self.get(DETAIL))
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "no details provided");
        }
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}

fn detail_message(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in [DETAIL, "error", "message"] {
            if let Some(Value::String(message)) = map.get(key) {
                return message.clone();
            }
        }
    }
    let text = body.trim();
    if text.is_empty() {
        "no details provided".to_string()
    } else {
        text.chars().take(200).collect()
    }
}
