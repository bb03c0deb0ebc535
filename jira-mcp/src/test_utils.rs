//! Test utilities for jira-mcp tests
//!
//! [`MockIssueClient`] stands in for Jira. It keeps issues in memory, records
//! every call it receives and can be told to fail or stall, so tool and
//! registry behavior can be checked without a network.
//!
//! ```no_run
//! use jira_mcp::test_utils::{sample_issue, MockIssueClient};
//!
//! let client = MockIssueClient::new().with_issue(sample_issue("PROJ-1", "Fix bug"));
//! assert_eq!(client.call_count(), 0);
//! ```

use crate::jira::{CreateIssueFields, Issue, IssueClient, IssueFields, JiraError, Reference};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// A call received by [`MockIssueClient`]
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    /// `get_issue`
    GetIssue {
        /// Requested key
        key: String,
        /// Requested projection
        fields: Vec<String>,
    },
    /// `create_issue`
    CreateIssue {
        /// Submitted fields
        fields: CreateIssueFields,
    },
    /// `search_issues`
    SearchIssues {
        /// JQL query
        jql: String,
        /// Requested limit
        max_results: u64,
        /// Requested projection
        fields: Vec<String>,
    },
    /// `update_issue_fields`
    UpdateIssueFields {
        /// Updated key
        key: String,
        /// Partial field map
        fields: Map<String, Value>,
    },
}

type FailureFn = Box<dyn Fn() -> JiraError + Send + Sync>;

/// In-memory [`IssueClient`] for tests
#[derive(Default)]
pub struct MockIssueClient {
    issues: Mutex<HashMap<String, Issue>>,
    search_results: Mutex<Vec<Issue>>,
    calls: Mutex<Vec<RecordedCall>>,
    failure: Option<FailureFn>,
    delay: Option<Duration>,
    next_id: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn projection(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

impl MockIssueClient {
    /// Create an empty mock
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(10_000),
            ..Self::default()
        }
    }

    /// Seed an issue, keyed by `issue.key`
    pub fn with_issue(self, issue: Issue) -> Self {
        lock(&self.issues).insert(issue.key.clone(), issue);
        self
    }

    /// Issues returned by every search, in this order
    pub fn with_search_results(self, issues: Vec<Issue>) -> Self {
        *lock(&self.search_results) = issues;
        self
    }

    /// Make every call fail with the error produced by `failure`
    pub fn failing_with<F>(mut self, failure: F) -> Self
    where
        F: Fn() -> JiraError + Send + Sync + 'static,
    {
        self.failure = Some(Box::new(failure));
        self
    }

    /// Sleep this long inside every call before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Current stored state of an issue
    pub fn issue(&self, key: &str) -> Option<Issue> {
        lock(&self.issues).get(key).cloned()
    }

    async fn begin(&self, call: RecordedCall) -> Result<(), JiraError> {
        lock(&self.calls).push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(failure) => Err(failure()),
            None => Ok(()),
        }
    }

    fn not_found(key: &str) -> JiraError {
        JiraError::NotFound {
            message: format!("Issue {key} does not exist or you do not have permission to see it."),
        }
    }
}

#[async_trait]
impl IssueClient for MockIssueClient {
    async fn get_issue(&self, key: &str, fields: &[&str]) -> Result<Issue, JiraError> {
        self.begin(RecordedCall::GetIssue {
            key: key.to_string(),
            fields: projection(fields),
        })
        .await?;

        self.issue(key).ok_or_else(|| Self::not_found(key))
    }

    async fn create_issue(&self, fields: &CreateIssueFields) -> Result<Issue, JiraError> {
        self.begin(RecordedCall::CreateIssue {
            fields: fields.clone(),
        })
        .await?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let project = fields.project.key.clone().unwrap_or_default();
        let key = format!("{project}-{}", id - 9_999);
        let self_url = format!("https://jira.example.com/rest/api/2/issue/{id}");

        let stored = Issue {
            id: Some(id.to_string()),
            key: key.clone(),
            self_url: Some(self_url.clone()),
            fields: IssueFields {
                summary: Some(Some(fields.summary.clone())),
                description: Some(Some(fields.description.clone())),
                issue_type: Some(Some(fields.issue_type.clone())),
                project: Some(Some(fields.project.clone())),
                parent: fields.parent.clone().map(Some),
                ..IssueFields::default()
            },
            extra: Map::new(),
        };
        lock(&self.issues).insert(key.clone(), stored);

        Ok(Issue {
            id: Some(id.to_string()),
            key,
            self_url: Some(self_url),
            ..Issue::default()
        })
    }

    async fn search_issues(
        &self,
        jql: &str,
        max_results: u64,
        fields: &[&str],
    ) -> Result<Vec<Issue>, JiraError> {
        self.begin(RecordedCall::SearchIssues {
            jql: jql.to_string(),
            max_results,
            fields: projection(fields),
        })
        .await?;

        let limit = usize::try_from(max_results).unwrap_or(usize::MAX);
        Ok(lock(&self.search_results)
            .iter()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update_issue_fields(
        &self,
        key: &str,
        fields: Map<String, Value>,
    ) -> Result<Issue, JiraError> {
        self.begin(RecordedCall::UpdateIssueFields {
            key: key.to_string(),
            fields: fields.clone(),
        })
        .await?;

        let mut issues = lock(&self.issues);
        let issue = issues.get_mut(key).ok_or_else(|| Self::not_found(key))?;
        for (name, value) in fields {
            match (name.as_str(), value) {
                ("description", Value::String(text)) => {
                    issue.fields.description = Some(Some(text));
                }
                ("summary", Value::String(text)) => issue.fields.summary = Some(Some(text)),
                (_, value) => {
                    issue.fields.other.insert(name, value);
                }
            }
        }
        Ok(issue.clone())
    }
}

/// A realistic issue as Jira returns it for the get projection
pub fn sample_issue(key: &str, summary: &str) -> Issue {
    let project = key.split('-').next().unwrap_or(key);

    let mut other = Map::new();
    other.insert("status".to_string(), json!({"name": "To Do", "id": "10000"}));
    other.insert(
        "assignee".to_string(),
        json!({"displayName": "Alex Doe", "accountId": "5b10a2844c20165700ede21g"}),
    );
    other.insert("priority".to_string(), json!({"name": "Medium", "id": "3"}));
    other.insert("created".to_string(), json!("2024-03-01T10:15:00.000+0000"));
    other.insert("updated".to_string(), json!("2024-03-02T08:00:00.000+0000"));
    other.insert(
        "comment".to_string(),
        json!({"comments": [], "maxResults": 0, "total": 0, "startAt": 0}),
    );

    Issue {
        id: Some("10001".to_string()),
        key: key.to_string(),
        self_url: Some("https://jira.example.com/rest/api/2/issue/10001".to_string()),
        fields: IssueFields {
            summary: Some(Some(summary.to_string())),
            description: Some(Some(format!("Details for {key}"))),
            issue_type: Some(Some(Reference {
                id: Some("10004".to_string()),
                name: Some("Bug".to_string()),
                ..Reference::default()
            })),
            project: Some(Some(Reference {
                id: Some("10000".to_string()),
                key: Some(project.to_string()),
                name: Some(format!("{project} project")),
                ..Reference::default()
            })),
            parent: None,
            labels: Some(Some(vec!["backend".to_string()])),
            other,
        },
        extra: Map::new(),
    }
}
