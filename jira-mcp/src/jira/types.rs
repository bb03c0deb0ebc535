//! Jira REST API data types
//!
//! Only the fields the tools read or write are typed. Everything else the
//! server sends is kept in flattened maps. Typed issue fields remember whether
//! the server left them out or sent `null`, so an issue survives a
//! deserialize/serialize cycle unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A field that may be absent (`None`) or present but `null` (`Some(None)`)
pub type Nullable<T> = Option<Option<T>>;

fn nullable<'de, D, T>(deserializer: D) -> Result<Nullable<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A Jira issue as returned by the REST API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Numeric id, as a string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human readable key such as `PROJ-123`
    #[serde(default)]
    pub key: String,
    /// REST URL of the issue
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// Issue fields
    #[serde(default, skip_serializing_if = "IssueFields::is_empty")]
    pub fields: IssueFields,
    /// Any other top level entries (`expand`, `changelog`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Issue {
    /// Summary line, if the projection included it
    pub fn summary(&self) -> Option<&str> {
        self.fields.summary()
    }
}

/// The `fields` object of an issue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueFields {
    /// One line summary
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub summary: Nullable<String>,
    /// Free text description
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Nullable<String>,
    /// Issue type (Bug, Task, Story, ...)
    #[serde(
        rename = "issuetype",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub issue_type: Nullable<Reference>,
    /// Owning project
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub project: Nullable<Reference>,
    /// Parent issue for sub-tasks and child issues
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub parent: Nullable<Reference>,
    /// Labels
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub labels: Nullable<Vec<String>>,
    /// Every other field in the projection (status, assignee, comment, ...)
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl IssueFields {
    /// True when no field at all was returned
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.description.is_none()
            && self.issue_type.is_none()
            && self.project.is_none()
            && self.parent.is_none()
            && self.labels.is_none()
            && self.other.is_empty()
    }

    /// Summary text, `None` when absent or `null`
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_ref().and_then(Option::as_deref)
    }

    /// Description text, `None` when absent or `null`
    pub fn description(&self) -> Option<&str> {
        self.description.as_ref().and_then(Option::as_deref)
    }

    /// Issue type, if returned
    pub fn issue_type(&self) -> Option<&Reference> {
        self.issue_type.as_ref().and_then(Option::as_ref)
    }

    /// Owning project, if returned
    pub fn project(&self) -> Option<&Reference> {
        self.project.as_ref().and_then(Option::as_ref)
    }

    /// Parent issue, if any
    pub fn parent(&self) -> Option<&Reference> {
        self.parent.as_ref().and_then(Option::as_ref)
    }

    /// Labels, empty when the server sent none or `null`
    pub fn labels(&self) -> &[String] {
        self.labels
            .as_ref()
            .and_then(Option::as_deref)
            .unwrap_or_default()
    }
}

/// Reference to another Jira entity by id, key or name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    /// Entity id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Entity key (projects, issues)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Entity name (issue types, priorities)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Remaining attributes
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Reference {
    /// Reference an entity by key
    pub fn by_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Reference an entity by name
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Fields sent when creating an issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIssueFields {
    /// Target project, by key
    pub project: Reference,
    /// One line summary
    pub summary: String,
    /// Free text description
    pub description: String,
    /// Issue type, by name
    #[serde(rename = "issuetype")]
    pub issue_type: Reference,
    /// Parent issue, by key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Reference>,
}

impl CreateIssueFields {
    /// Fields for a new issue without a parent
    pub fn new(
        project_key: impl Into<String>,
        summary: impl Into<String>,
        description: impl Into<String>,
        issue_type: impl Into<String>,
    ) -> Self {
        Self {
            project: Reference::by_key(project_key),
            summary: summary.into(),
            description: description.into(),
            issue_type: Reference::by_name(issue_type),
            parent: None,
        }
    }

    /// Link the new issue to a parent
    pub fn with_parent(mut self, parent_key: impl Into<String>) -> Self {
        self.parent = Some(Reference::by_key(parent_key));
        self
    }
}

/// Response body of `POST /rest/api/2/search`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Matching issues in server order
    #[serde(default)]
    pub issues: Vec<Issue>,
}

/// Response body of `GET /rest/api/2/serverInfo`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    /// Canonical base URL configured on the server
    #[serde(default)]
    pub base_url: Option<String>,
    /// Jira version string
    #[serde(default)]
    pub version: Option<String>,
    /// Cloud or Server
    #[serde(default)]
    pub deployment_type: Option<String>,
    /// Instance title
    #[serde(default)]
    pub server_title: Option<String>,
}

/// Error body Jira attaches to 4xx/5xx responses
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// General messages
    #[serde(default)]
    pub error_messages: Vec<String>,
    /// Per field messages
    #[serde(default)]
    pub errors: BTreeMap<String, Value>,
}

impl ErrorBody {
    /// Join all messages into one line, `None` when the body carried none
    pub fn summary(&self) -> Option<String> {
        let mut parts: Vec<String> = self
            .error_messages
            .iter()
            .filter(|m| !m.trim().is_empty())
            .cloned()
            .collect();

        for (field, value) in &self.errors {
            match value {
                Value::String(message) => parts.push(format!("{field}: {message}")),
                other => parts.push(format!("{field}: {other}")),
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}
