//! HTTP client for the Jira REST API v2

use super::error::JiraError;
use super::types::{CreateIssueFields, Issue, SearchResponse, ServerInfo};
use super::{IssueClient, GET_ISSUE_FIELDS};
use crate::config::JiraConfig;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use url::Url;

const API_PREFIX: [&str; 3] = ["rest", "api", "2"];

/// Authenticated Jira REST client
///
/// Wraps a single pooled `reqwest::Client`; cheap to share behind an `Arc`.
pub struct JiraClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    api_token: String,
}

impl JiraClient {
    /// Create a client from configuration
    pub fn new(config: &JiraConfig) -> Result<Self, JiraError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("jira-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url().clone(),
            username: config.username().to_string(),
            api_token: config.api_token().to_string(),
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch server metadata, used as a connectivity and credentials check
    pub async fn server_info(&self) -> Result<ServerInfo, JiraError> {
        let url = self.endpoint(&["serverInfo"])?;
        self.send_json(self.request(Method::GET, url)).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, JiraError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| JiraError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(API_PREFIX)
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .basic_auth(&self.username, Some(&self.api_token))
            .header(ACCEPT, "application/json")
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<reqwest::Response, JiraError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!("Jira responded {}: {}", status, body);
        Err(JiraError::from_status(status.as_u16(), &body))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, JiraError> {
        let bytes = self.execute(builder).await?.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| JiraError::Decode(e.to_string()))
    }
}

#[async_trait]
impl IssueClient for JiraClient {
    async fn get_issue(&self, key: &str, fields: &[&str]) -> Result<Issue, JiraError> {
        let mut url = self.endpoint(&["issue", key])?;
        if !fields.is_empty() {
            url.query_pairs_mut()
                .append_pair("fields", &fields.join(","));
        }

        tracing::debug!("GET issue {}", key);
        self.send_json(self.request(Method::GET, url)).await
    }

    async fn create_issue(&self, fields: &CreateIssueFields) -> Result<Issue, JiraError> {
        let url = self.endpoint(&["issue"])?;
        let body = json!({ "fields": fields });

        tracing::debug!("POST issue in project {:?}", fields.project.key);
        self.send_json(self.request(Method::POST, url).json(&body))
            .await
    }

    async fn search_issues(
        &self,
        jql: &str,
        max_results: u64,
        fields: &[&str],
    ) -> Result<Vec<Issue>, JiraError> {
        let url = self.endpoint(&["search"])?;
        let body = json!({
            "jql": jql,
            "maxResults": max_results,
            "fields": fields,
        });

        tracing::debug!("POST search (maxResults={}): {}", max_results, jql);
        let response: SearchResponse = self
            .send_json(self.request(Method::POST, url).json(&body))
            .await?;
        Ok(response.issues)
    }

    async fn update_issue_fields(
        &self,
        key: &str,
        fields: Map<String, Value>,
    ) -> Result<Issue, JiraError> {
        let url = self.endpoint(&["issue", key])?;
        let body = json!({ "fields": fields });

        tracing::debug!("PUT issue {}", key);
        self.execute(self.request(Method::PUT, url).json(&body))
            .await?;

        self.get_issue(key, GET_ISSUE_FIELDS).await
    }
}
