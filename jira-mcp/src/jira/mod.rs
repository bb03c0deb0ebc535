//! Jira REST client and domain types
//!
//! [`IssueClient`] is the seam between the tool handlers and the network.
//! [`JiraClient`] implements it over REST API v2; tests substitute
//! [`MockIssueClient`](crate::test_utils::MockIssueClient).

use async_trait::async_trait;
use serde_json::{Map, Value};

mod client;
mod error;
mod types;

pub use client::JiraClient;
pub use error::JiraError;
pub use types::{
    CreateIssueFields, ErrorBody, Issue, IssueFields, Nullable, Reference, SearchResponse,
    ServerInfo,
};

/// Field projection requested when fetching a single issue
pub const GET_ISSUE_FIELDS: &[&str] = &[
    "key",
    "summary",
    "description",
    "status",
    "assignee",
    "reporter",
    "priority",
    "created",
    "updated",
    "comment",
    "parent",
    "project",
    "issuetype",
    "labels",
];

/// Field projection requested for search results
pub const SEARCH_ISSUE_FIELDS: &[&str] = &[
    "key",
    "summary",
    "description",
    "status",
    "assignee",
    "reporter",
    "priority",
    "created",
    "updated",
    "parent",
    "project",
    "issuetype",
    "labels",
];

/// Result limit used when a search does not specify one
pub const DEFAULT_MAX_RESULTS: u64 = 50;

/// Operations the tool handlers need from an issue tracker
#[async_trait]
pub trait IssueClient: Send + Sync {
    /// Fetch one issue restricted to `fields`
    async fn get_issue(&self, key: &str, fields: &[&str]) -> Result<Issue, JiraError>;

    /// Create an issue and return what the server reports back
    async fn create_issue(&self, fields: &CreateIssueFields) -> Result<Issue, JiraError>;

    /// Run a JQL query, returning issues in server order
    async fn search_issues(
        &self,
        jql: &str,
        max_results: u64,
        fields: &[&str],
    ) -> Result<Vec<Issue>, JiraError>;

    /// Apply a partial field update and return the updated issue
    async fn update_issue_fields(
        &self,
        key: &str,
        fields: Map<String, Value>,
    ) -> Result<Issue, JiraError>;
}
