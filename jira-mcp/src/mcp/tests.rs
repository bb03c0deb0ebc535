//! Tests for the issue tools served through McpServer

use super::server::McpServer;
use crate::error::ToolErrorKind;
use crate::jira::{Issue, JiraError, GET_ISSUE_FIELDS, SEARCH_ISSUE_FIELDS};
use crate::test_utils::{sample_issue, MockIssueClient, RecordedCall};
use rmcp::ServerHandler;
use serde_json::{json, Map, Value};
use std::sync::Arc;

fn server_with(client: MockIssueClient) -> (McpServer, Arc<MockIssueClient>) {
    let client = Arc::new(client);
    let server = McpServer::new(client.clone()).unwrap();
    (server, client)
}

fn args(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

#[test]
fn test_mcp_server_info() {
    let (server, _) = server_with(MockIssueClient::new());
    let info = server.get_info();

    assert_eq!(info.server_info.name, "jira-mcp");
    assert!(!info.server_info.version.is_empty());
    assert!(info.capabilities.tools.is_some());
    assert!(info.capabilities.prompts.is_none());
    assert!(info.instructions.unwrap().contains("get_jira_issue"));
}

#[test]
fn test_all_issue_tools_registered_in_order() {
    let (server, _) = server_with(MockIssueClient::new());
    assert_eq!(
        server.tool_registry().list_tool_names(),
        vec![
            "get_jira_issue",
            "create_jira_issue",
            "search_jira_issue",
            "edit_jira_issue"
        ]
    );

    for tool in server.tool_registry().list_tools() {
        assert!(tool.description.is_some_and(|d| !d.is_empty()));
        assert_eq!(tool.input_schema["type"], "object");
    }
}

#[tokio::test]
async fn test_get_issue_returns_remote_issue() {
    let remote = sample_issue("PROJ-1", "Fix bug");
    let (server, client) = server_with(MockIssueClient::new().with_issue(remote.clone()));

    let envelope = server
        .call_tool_by_name("get_jira_issue", args(json!({"issue_key": "PROJ-1"})))
        .await;

    let issue: Issue = envelope.decode_payload().unwrap();
    assert_eq!(issue.summary(), Some("Fix bug"));
    assert_eq!(issue, remote);

    let expected_fields: Vec<String> = GET_ISSUE_FIELDS.iter().map(|f| f.to_string()).collect();
    assert_eq!(
        client.calls(),
        vec![RecordedCall::GetIssue {
            key: "PROJ-1".to_string(),
            fields: expected_fields,
        }]
    );
}

#[tokio::test]
async fn test_get_issue_not_found() {
    let (server, _) = server_with(MockIssueClient::new());

    let envelope = server
        .call_tool_by_name("get_jira_issue", args(json!({"issue_key": "PROJ-404"})))
        .await;

    let error = envelope.error().unwrap();
    assert_eq!(error.kind, ToolErrorKind::NotFound);
    assert!(error.message.contains("PROJ-404"));
}

#[tokio::test]
async fn test_get_issue_other_failures_are_remote() {
    let (server, _) = server_with(
        MockIssueClient::new().failing_with(|| JiraError::from_status(401, "bad credentials")),
    );

    let envelope = server
        .call_tool_by_name("get_jira_issue", args(json!({"issue_key": "PROJ-1"})))
        .await;

    assert_eq!(envelope.error().unwrap().kind, ToolErrorKind::Remote);
}

#[tokio::test]
async fn test_get_issue_blank_key_never_calls_remote() {
    let (server, client) = server_with(MockIssueClient::new());

    let envelope = server
        .call_tool_by_name("get_jira_issue", args(json!({"issue_key": "   "})))
        .await;

    assert_eq!(envelope.error().unwrap().kind, ToolErrorKind::Validation);
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_missing_required_field_never_calls_remote() {
    let (server, client) = server_with(MockIssueClient::new());

    let envelope = server
        .call_tool_by_name(
            "create_jira_issue",
            args(json!({"project_key": "PROJ", "summary": "s", "issue_type": "Bug"})),
        )
        .await;

    let error = envelope.error().unwrap();
    assert_eq!(error.kind, ToolErrorKind::MissingField);
    assert_eq!(error.field.as_deref(), Some("description"));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_type_mismatch_never_calls_remote() {
    let (server, client) = server_with(MockIssueClient::new());

    let envelope = server
        .call_tool_by_name("get_jira_issue", args(json!({"issue_key": 42})))
        .await;

    let error = envelope.error().unwrap();
    assert_eq!(error.kind, ToolErrorKind::TypeMismatch);
    assert_eq!(error.field.as_deref(), Some("issue_key"));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_create_issue_without_parent() {
    let (server, client) = server_with(MockIssueClient::new());

    for parent in [json!(null), json!(""), json!("  ")] {
        let envelope = server
            .call_tool_by_name(
                "create_jira_issue",
                args(json!({
                    "project_key": "PROJ",
                    "summary": "New feature",
                    "description": "Details",
                    "issue_type": "Story",
                    "parent": parent,
                })),
            )
            .await;
        assert!(envelope.is_success());
    }

    for call in client.calls() {
        match call {
            RecordedCall::CreateIssue { fields } => {
                assert!(fields.parent.is_none());
                assert_eq!(fields.project.key.as_deref(), Some("PROJ"));
                assert_eq!(fields.issue_type.name.as_deref(), Some("Story"));
            }
            other => panic!("unexpected call {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_create_issue_with_parent() {
    let (server, client) = server_with(MockIssueClient::new());

    let envelope = server
        .call_tool_by_name(
            "create_jira_issue",
            args(json!({
                "project_key": "PROJ",
                "summary": "Sub task",
                "description": "Details",
                "issue_type": "Sub-task",
                "parent": "PROJ-7",
            })),
        )
        .await;

    let created: Issue = envelope.decode_payload().unwrap();
    assert_eq!(created.key, "PROJ-1");

    match &client.calls()[0] {
        RecordedCall::CreateIssue { fields } => {
            assert_eq!(
                fields.parent.as_ref().and_then(|p| p.key.as_deref()),
                Some("PROJ-7")
            );
        }
        other => panic!("unexpected call {other:?}"),
    }
}

#[tokio::test]
async fn test_create_issue_rejected_is_validation() {
    let (server, _) = server_with(MockIssueClient::new().failing_with(|| {
        JiraError::from_status(400, r#"{"errors":{"issuetype":"valid issue type is required"}}"#)
    }));

    let envelope = server
        .call_tool_by_name(
            "create_jira_issue",
            args(json!({
                "project_key": "PROJ",
                "summary": "s",
                "description": "d",
                "issue_type": "Nonsense",
            })),
        )
        .await;

    let error = envelope.error().unwrap();
    assert_eq!(error.kind, ToolErrorKind::Validation);
    assert!(error.message.contains("valid issue type is required"));
}

#[tokio::test]
async fn test_search_defaults_to_fifty_results() {
    let (server, client) = server_with(MockIssueClient::new());

    let envelope = server
        .call_tool_by_name("search_jira_issue", args(json!({"jql": "project = PROJ"})))
        .await;
    assert!(envelope.is_success());

    let expected_fields: Vec<String> = SEARCH_ISSUE_FIELDS.iter().map(|f| f.to_string()).collect();
    assert_eq!(
        client.calls(),
        vec![RecordedCall::SearchIssues {
            jql: "project = PROJ".to_string(),
            max_results: 50,
            fields: expected_fields,
        }]
    );
}

#[test]
fn test_search_projection_is_get_projection_without_comments() {
    let expected: Vec<&str> = GET_ISSUE_FIELDS
        .iter()
        .copied()
        .filter(|field| *field != "comment")
        .collect();
    assert_eq!(SEARCH_ISSUE_FIELDS, expected.as_slice());
    assert!(GET_ISSUE_FIELDS.contains(&"comment"));
}

#[tokio::test]
async fn test_search_preserves_remote_order() {
    let (server, client) = server_with(MockIssueClient::new().with_search_results(vec![
        sample_issue("PROJ-3", "third"),
        sample_issue("PROJ-1", "first"),
        sample_issue("PROJ-2", "second"),
    ]));

    let envelope = server
        .call_tool_by_name(
            "search_jira_issue",
            args(json!({"jql": "project = PROJ ORDER BY rank", "max_results": 10})),
        )
        .await;

    let issues: Vec<Issue> = envelope.decode_payload().unwrap();
    let keys: Vec<&str> = issues.iter().map(|i| i.key.as_str()).collect();
    assert_eq!(keys, vec!["PROJ-3", "PROJ-1", "PROJ-2"]);

    match &client.calls()[0] {
        RecordedCall::SearchIssues { max_results, .. } => assert_eq!(*max_results, 10),
        other => panic!("unexpected call {other:?}"),
    }
}

#[tokio::test]
async fn test_search_blank_jql_is_validation_without_call() {
    let (server, client) = server_with(MockIssueClient::new());

    let envelope = server
        .call_tool_by_name("search_jira_issue", args(json!({"jql": " \n "})))
        .await;

    assert_eq!(envelope.error().unwrap().kind, ToolErrorKind::Validation);
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_search_rejected_query_is_query_syntax() {
    let (server, _) = server_with(MockIssueClient::new().failing_with(|| {
        JiraError::from_status(
            400,
            r#"{"errorMessages":["Error in the JQL Query: The character '!' is a reserved JQL character."]}"#,
        )
    }));

    let envelope = server
        .call_tool_by_name("search_jira_issue", args(json!({"jql": "project = !"})))
        .await;

    let error = envelope.error().unwrap();
    assert_eq!(error.kind, ToolErrorKind::QuerySyntax);
    assert!(error.message.contains("reserved JQL character"));
}

#[tokio::test]
async fn test_edit_issue_updates_description_only() {
    let (server, client) =
        server_with(MockIssueClient::new().with_issue(sample_issue("PROJ-1", "Fix bug")));

    let envelope = server
        .call_tool_by_name(
            "edit_jira_issue",
            args(json!({"issue_key": "PROJ-1", "description": "new text"})),
        )
        .await;

    let updated: Issue = envelope.decode_payload().unwrap();
    assert_eq!(updated.fields.description(), Some("new text"));
    assert_eq!(updated.summary(), Some("Fix bug"));

    let mut expected = Map::new();
    expected.insert("description".to_string(), json!("new text"));
    assert_eq!(
        client.calls(),
        vec![RecordedCall::UpdateIssueFields {
            key: "PROJ-1".to_string(),
            fields: expected,
        }]
    );
}

#[tokio::test]
async fn test_edit_missing_issue_is_not_found() {
    let (server, _) = server_with(MockIssueClient::new());

    let envelope = server
        .call_tool_by_name(
            "edit_jira_issue",
            args(json!({"issue_key": "PROJ-99", "description": "x"})),
        )
        .await;

    assert_eq!(envelope.error().unwrap().kind, ToolErrorKind::NotFound);
}

#[tokio::test]
async fn test_edit_rejected_is_validation() {
    let (server, _) = server_with(MockIssueClient::new().failing_with(|| {
        JiraError::from_status(400, r#"{"errors":{"description":"too long"}}"#)
    }));

    let envelope = server
        .call_tool_by_name(
            "edit_jira_issue",
            args(json!({"issue_key": "PROJ-1", "description": "x"})),
        )
        .await;

    assert_eq!(envelope.error().unwrap().kind, ToolErrorKind::Validation);
}

#[tokio::test]
async fn test_unknown_tool_through_server() {
    let (server, client) = server_with(MockIssueClient::new());

    let envelope = server
        .call_tool_by_name("delete_jira_issue", args(json!({"issue_key": "PROJ-1"})))
        .await;

    let error = envelope.error().unwrap();
    assert_eq!(error.kind, ToolErrorKind::UnknownTool);
    assert_eq!(client.call_count(), 0);
}
