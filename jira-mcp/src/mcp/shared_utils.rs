//! Shared utilities for MCP operations
//!
//! This module provides common functionality used across MCP tool handlers
//! to reduce code duplication and ensure consistent behavior.

use crate::error::ToolError;
use crate::jira::JiraError;
use std::fmt;

/// Issue operations a tool can perform against Jira
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Fetch one issue
    GetIssue,
    /// Create an issue
    CreateIssue,
    /// Run a JQL search
    SearchIssues,
    /// Update issue fields
    EditIssue,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::GetIssue => "get issue",
            Operation::CreateIssue => "create issue",
            Operation::SearchIssues => "search issues",
            Operation::EditIssue => "edit issue",
        })
    }
}

/// Common error handling patterns for MCP operations
pub struct McpErrorHandler;

impl McpErrorHandler {
    /// Convert a JiraError into the tool error reported to the host
    ///
    /// - 404 on get/edit -> `NotFound`
    /// - 400 on search -> `QuerySyntax`
    /// - 400 on create/edit -> `Validation`
    /// - everything else -> `Remote`
    pub fn handle_jira_error(error: JiraError, operation: Operation, subject: &str) -> ToolError {
        tracing::error!("Jira operation '{}' for '{}' failed: {}", operation, subject, error);

        match (&error, operation) {
            (JiraError::NotFound { .. }, Operation::GetIssue | Operation::EditIssue) => {
                ToolError::not_found(format!("Issue '{subject}' not found: {error}"))
                    .with_field("issue_key")
            }
            (JiraError::BadRequest { message }, Operation::SearchIssues) => {
                ToolError::query_syntax(format!("Invalid JQL query: {message}")).with_field("jql")
            }
            (JiraError::BadRequest { message }, Operation::CreateIssue | Operation::EditIssue) => {
                ToolError::validation(format!(
                    "Jira rejected {operation} for '{subject}': {message}"
                ))
            }
            (JiraError::Http(err), _) if err.is_timeout() => {
                ToolError::remote(format!("Timed out during {operation} for '{subject}': {error}"))
            }
            _ => ToolError::remote(format!("Failed to {operation} for '{subject}': {error}")),
        }
    }
}

/// Common validation patterns for MCP operations
pub struct McpValidation;

impl McpValidation {
    /// Reject blank values, returning the trimmed value otherwise
    pub fn validate_not_empty<'a>(value: &'a str, field: &str) -> Result<&'a str, ToolError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ToolError::validation(format!(
                "{} cannot be empty",
                Self::capitalize_first_letter(field)
            ))
            .with_field(field));
        }
        Ok(trimmed)
    }

    /// Helper function to capitalize the first letter of a string
    fn capitalize_first_letter(s: &str) -> String {
        let mut chars = s.chars();
        match chars.next() {
            None => String::new(),
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolErrorKind;

    fn not_found() -> JiraError {
        JiraError::from_status(404, r#"{"errorMessages":["Issue does not exist"]}"#)
    }

    fn bad_request() -> JiraError {
        JiraError::from_status(400, r#"{"errorMessages":["Expecting ')'"]}"#)
    }

    #[test]
    fn test_not_found_mapping_depends_on_operation() {
        let error = McpErrorHandler::handle_jira_error(not_found(), Operation::GetIssue, "PROJ-9");
        assert_eq!(error.kind, ToolErrorKind::NotFound);
        assert!(error.message.contains("PROJ-9"));

        let error = McpErrorHandler::handle_jira_error(not_found(), Operation::EditIssue, "PROJ-9");
        assert_eq!(error.kind, ToolErrorKind::NotFound);

        let error =
            McpErrorHandler::handle_jira_error(not_found(), Operation::SearchIssues, "project = X");
        assert_eq!(error.kind, ToolErrorKind::Remote);
    }

    #[test]
    fn test_bad_request_mapping_depends_on_operation() {
        let error =
            McpErrorHandler::handle_jira_error(bad_request(), Operation::SearchIssues, "bad (");
        assert_eq!(error.kind, ToolErrorKind::QuerySyntax);
        assert!(error.message.contains("Expecting ')'"));

        let error =
            McpErrorHandler::handle_jira_error(bad_request(), Operation::CreateIssue, "PROJ");
        assert_eq!(error.kind, ToolErrorKind::Validation);

        let error =
            McpErrorHandler::handle_jira_error(bad_request(), Operation::EditIssue, "PROJ-1");
        assert_eq!(error.kind, ToolErrorKind::Validation);

        let error =
            McpErrorHandler::handle_jira_error(bad_request(), Operation::GetIssue, "PROJ-1");
        assert_eq!(error.kind, ToolErrorKind::Remote);
    }

    #[test]
    fn test_other_failures_are_remote() {
        for error in [
            JiraError::from_status(401, ""),
            JiraError::from_status(500, "boom"),
            JiraError::Decode("eof".to_string()),
        ] {
            let mapped = McpErrorHandler::handle_jira_error(error, Operation::GetIssue, "PROJ-1");
            assert_eq!(mapped.kind, ToolErrorKind::Remote);
        }
    }

    #[test]
    fn test_validate_not_empty() {
        assert_eq!(
            McpValidation::validate_not_empty("  PROJ-1 ", "issue_key").unwrap(),
            "PROJ-1"
        );

        let error = McpValidation::validate_not_empty(" \t", "jql").unwrap_err();
        assert_eq!(error.kind, ToolErrorKind::Validation);
        assert_eq!(error.message, "Jql cannot be empty");
        assert_eq!(error.field.as_deref(), Some("jql"));
    }
}
