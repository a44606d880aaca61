use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Result type using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unauthorized - token missing or expired")]
    Unauthorized,

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Server error ({status}): {message}")]
    ServerError { status: StatusCode, message: String },

    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus { status: StatusCode, message: String },

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error payload shapes Keycloak uses for admin API failures.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(rename = "errorMessage")]
    error_message: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

impl Error {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    /// Pull the human-readable message out of a Keycloak error body,
    /// falling back to the raw (truncated) text.
    fn message_from_body(body: &str) -> String {
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
            let message = match (parsed.error_message, parsed.error, parsed.error_description) {
                (Some(msg), _, _) => Some(msg),
                (None, Some(err), Some(desc)) => Some(format!("{}: {}", err, desc)),
                (None, Some(err), None) => Some(err),
                (None, None, Some(desc)) => Some(desc),
                (None, None, None) => None,
            };
            if let Some(message) = message {
                return Self::truncate_body(&message);
            }
        }
        Self::truncate_body(body)
    }

    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = Self::message_from_body(body);
        match status.as_u16() {
            401 => Error::Unauthorized,
            403 => Error::AccessDenied(message),
            404 => Error::NotFound(message),
            409 => Error::Conflict(message),
            500..=599 => Error::ServerError { status, message },
            _ => Error::UnexpectedStatus { status, message },
        }
    }

    /// HTTP status carried by this error, if it came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            Error::AccessDenied(_) => Some(StatusCode::FORBIDDEN),
            Error::NotFound(_) => Some(StatusCode::NOT_FOUND),
            Error::Conflict(_) => Some(StatusCode::CONFLICT),
            Error::ServerError { status, .. } | Error::UnexpectedStatus { status, .. } => {
                Some(*status)
            }
            Error::Http(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
