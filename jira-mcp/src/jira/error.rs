//! Errors raised by the Jira REST client

use super::types::ErrorBody;
use thiserror::Error;

/// Errors that can occur while talking to Jira
#[derive(Debug, Error)]
pub enum JiraError {
    /// HTTP 404
    #[error("Not found: {message}")]
    NotFound {
        /// Server supplied message
        message: String,
    },

    /// HTTP 400, the server rejected the request payload or query
    #[error("Bad request: {message}")]
    BadRequest {
        /// Server supplied message
        message: String,
    },

    /// HTTP 401 or 403
    #[error("Authentication failed (HTTP {status}): {message}")]
    Unauthorized {
        /// Status code
        status: u16,
        /// Server supplied message
        message: String,
    },

    /// Any other non-success status
    #[error("Jira returned HTTP {status}: {message}")]
    Status {
        /// Status code
        status: u16,
        /// Server supplied message
        message: String,
    },

    /// Connection, TLS or timeout failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not what the API documents
    #[error("Failed to decode Jira response: {0}")]
    Decode(String),

    /// A request URL could not be built from the base URL
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl JiraError {
    /// Classify a non-success response by status code and body
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = Self::body_message(status, body);
        match status {
            400 => JiraError::BadRequest { message },
            401 | 403 => JiraError::Unauthorized { status, message },
            404 => JiraError::NotFound { message },
            _ => JiraError::Status { status, message },
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            JiraError::NotFound { .. } => Some(404),
            JiraError::BadRequest { .. } => Some(400),
            JiraError::Unauthorized { status, .. } | JiraError::Status { status, .. } => {
                Some(*status)
            }
            JiraError::Http(err) => err.status().map(|s| s.as_u16()),
            JiraError::Decode(_) | JiraError::InvalidUrl(_) => None,
        }
    }

    /// Whether the request timed out
    pub fn is_timeout(&self) -> bool {
        matches!(self, JiraError::Http(err) if err.is_timeout())
    }

    fn body_message(status: u16, body: &str) -> String {
        if let Some(summary) = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.summary())
        {
            return summary;
        }

        let trimmed = body.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }

        reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("no response body")
            .to_string()
    }
}
