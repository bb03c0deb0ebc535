//! Uniform result wrapper returned by every dispatch

use crate::error::ToolError;
use rmcp::model::{Annotated, CallToolResult, RawContent, RawTextContent};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Outcome of one tool call
///
/// Exactly one of payload or error is present. The payload is the remote
/// response re-serialized as JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultEnvelope {
    /// The call succeeded
    Success {
        /// Serialized JSON payload
        payload: String,
    },
    /// The call failed
    Failure {
        /// What went wrong
        error: ToolError,
    },
}

impl ResultEnvelope {
    /// Serialize `value` into a success envelope
    ///
    /// A serialization failure yields an `Internal` failure envelope instead.
    pub fn success<T: Serialize>(value: &T) -> Self {
        match serde_json::to_string_pretty(value) {
            Ok(payload) => ResultEnvelope::Success { payload },
            Err(e) => ResultEnvelope::failure(ToolError::internal(format!(
                "Failed to serialize result: {e}"
            ))),
        }
    }

    /// Wrap an error
    pub fn failure(error: ToolError) -> Self {
        ResultEnvelope::Failure { error }
    }

    /// True for the success branch
    pub fn is_success(&self) -> bool {
        matches!(self, ResultEnvelope::Success { .. })
    }

    /// Serialized payload, if successful
    pub fn payload(&self) -> Option<&str> {
        match self {
            ResultEnvelope::Success { payload } => Some(payload),
            ResultEnvelope::Failure { .. } => None,
        }
    }

    /// Error, if failed
    pub fn error(&self) -> Option<&ToolError> {
        match self {
            ResultEnvelope::Success { .. } => None,
            ResultEnvelope::Failure { error } => Some(error),
        }
    }

    /// Deserialize the payload into `T`
    pub fn decode_payload<T: DeserializeOwned>(&self) -> Result<T, ToolError> {
        match self {
            ResultEnvelope::Success { payload } => serde_json::from_str(payload)
                .map_err(|e| ToolError::internal(format!("Failed to decode payload: {e}"))),
            ResultEnvelope::Failure { error } => Err(error.clone()),
        }
    }

    /// Text handed back to the host: the payload, or the error as JSON
    pub fn text(&self) -> String {
        match self {
            ResultEnvelope::Success { payload } => payload.clone(),
            ResultEnvelope::Failure { error } => serde_json::to_string(error)
                .unwrap_or_else(|_| format!("{{\"kind\":\"{}\"}}", error.kind)),
        }
    }

    /// Convert into the MCP `tools/call` response
    pub fn into_call_tool_result(self) -> CallToolResult {
        let is_error = !self.is_success();
        CallToolResult {
            content: vec![Annotated::new(
                RawContent::Text(RawTextContent { text: self.text() }),
                None,
            )],
            is_error: Some(is_error),
        }
    }
}

impl From<ToolError> for ResultEnvelope {
    fn from(error: ToolError) -> Self {
        ResultEnvelope::failure(error)
    }
}
