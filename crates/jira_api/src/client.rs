use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::JiraConfig;
use crate::error::{JiraError, Result};
use crate::models::{
    EstimateAdjustment, Issue, IssueSearchResponse, LogWorkRequest, Myself, Transition,
    TransitionsResponse, WorklogCreated,
};
use crate::rate_limiter::RateLimiter;

const ISSUE_SUMMARY_FIELDS: &str = "key,summary,status,timetracking";

#[derive(Clone)]
pub struct JiraClient {
    http: HttpClient,
    config: JiraConfig,
    limiter: RateLimiter,
}

impl JiraClient {
    pub fn new(config: JiraConfig) -> Result<Self> {
        let http = build_http_client(&config)?;
        let limiter = RateLimiter::new(config.cooldown);
        Ok(Self {
            http,
            config,
            limiter,
        })
    }

    pub fn new_with_limiter(config: JiraConfig, limiter: RateLimiter) -> Result<Self> {
        let http = build_http_client(&config)?;
        Ok(Self {
            http,
            config,
            limiter,
        })
    }

    pub fn config(&self) -> &JiraConfig {
        &self.config
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    async fn get<T>(&self, path: &str, query: Option<&[(&str, &str)]>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.limiter.hit().await;
        let mut request = self.http.get(self.url_for(path));
        if let Some(params) = query {
            request = request.query(params);
        }
        let response = request.send().await?;
        Self::parse_json(response).await
    }

    async fn send_with_body<B, T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.limiter.hit().await;
        let response = self
            .http
            .request(method, self.url_for(path))
            .query(query)
            .json(body)
            .send()
            .await?;
        Self::parse_json(response).await
    }

    async fn send_expect_empty<B>(&self, method: Method, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.limiter.hit().await;
        let response = self
            .http
            .request(method, self.url_for(path))
            .json(body)
            .send()
            .await?;
        Self::ensure_success(response).await
    }

    fn url_for(&self, path: &str) -> String {
        let mut base = self.config.api_root();
        base.push_str(path.trim_start_matches('/'));
        base
    }

    async fn parse_json<T>(response: Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if status.is_success() {
            response.json::<T>().await.map_err(JiraError::from)
        } else {
            Err(Self::response_error(status, response).await)
        }
    }

    async fn ensure_success(response: Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::response_error(status, response).await)
        }
    }

    async fn response_error(status: StatusCode, response: Response) -> JiraError {
        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            JiraError::Authentication(format!("Access denied ({}) - {}", status, body))
        } else {
            JiraError::http(status, extract_error_message(&body).unwrap_or(body))
        }
    }

    pub async fn get_myself(&self) -> Result<Myself> {
        self.get("myself", None).await
    }

    /// Runs a JQL search restricted to the summary/status/timetracking
    /// field set the issue list renders.
    pub async fn search_issues(&self, jql: &str, max_results: u32) -> Result<Vec<Issue>> {
        debug!(jql, max_results, "jira: searching issues");
        let max = max_results.clamp(1, 100).to_string();
        let response: IssueSearchResponse = self
            .get(
                "search",
                Some(&[
                    ("jql", jql),
                    ("fields", ISSUE_SUMMARY_FIELDS),
                    ("maxResults", max.as_str()),
                ]),
            )
            .await?;
        Ok(response.issues)
    }

    pub async fn get_issue(&self, issue_key: &str) -> Result<Issue> {
        let path = format!("issue/{}", issue_key);
        self.get(&path, Some(&[("fields", ISSUE_SUMMARY_FIELDS)]))
            .await
    }

    pub async fn get_transitions(&self, issue_key: &str) -> Result<Vec<Transition>> {
        let path = format!("issue/{}/transitions", issue_key);
        let response: TransitionsResponse = self.get(&path, None).await?;
        Ok(response.transitions)
    }

    /// Executes a workflow transition, optionally setting the resolution
    /// (completion transitions require one).
    pub async fn transition_issue(
        &self,
        issue_key: &str,
        transition_id: &str,
        resolution: Option<&str>,
    ) -> Result<()> {
        let path = format!("issue/{}/transitions", issue_key);
        let mut payload = json!({ "transition": { "id": transition_id } });
        if let Some(name) = resolution {
            payload["fields"] = json!({ "resolution": { "name": name } });
        }
        self.send_expect_empty(Method::POST, &path, &payload).await
    }

    pub async fn add_comment(&self, issue_key: &str, text: &str) -> Result<()> {
        let path = format!("issue/{}/comment", issue_key);
        let payload = json!({ "body": text });
        self.send_expect_empty(Method::POST, &path, &payload).await
    }

    /// Rewrites the issue's timetracking block. `None` fields are left
    /// untouched on the service side.
    pub async fn update_estimates(
        &self,
        issue_key: &str,
        original: Option<&str>,
        remaining: Option<&str>,
    ) -> Result<()> {
        let path = format!("issue/{}", issue_key);
        let mut timetracking = serde_json::Map::new();
        if let Some(value) = original {
            timetracking.insert("originalEstimate".to_string(), Value::String(value.into()));
        }
        if let Some(value) = remaining {
            timetracking.insert("remainingEstimate".to_string(), Value::String(value.into()));
        }
        let payload = json!({ "fields": { "timetracking": timetracking } });
        self.send_expect_empty(Method::PUT, &path, &payload).await
    }

    /// Submits a worklog entry. The estimate adjustment is rendered into
    /// the `adjustEstimate` query parameters and passed through untouched.
    pub async fn log_work(
        &self,
        issue_key: &str,
        request: &LogWorkRequest,
        adjustment: &EstimateAdjustment,
    ) -> Result<WorklogCreated> {
        debug!(issue_key, "jira: submitting worklog");
        let path = format!("issue/{}/worklog", issue_key);
        let query = adjustment.query_params();
        self.send_with_body(Method::POST, &path, &query, request)
            .await
    }
}

fn build_http_client(config: &JiraConfig) -> Result<HttpClient> {
    let mut headers = HeaderMap::new();

    let credentials = BASE64_STANDARD.encode(format!("{}:{}", config.email, config.api_token));
    headers.insert(AUTHORIZATION, header_value(format!("Basic {}", credentials))?);
    headers.insert(USER_AGENT, header_value(config.user_agent.clone())?);

    HttpClient::builder()
        .default_headers(headers)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .build()
        .map_err(|err| JiraError::Other(err.to_string()))
}

fn header_value(value: String) -> Result<HeaderValue> {
    HeaderValue::from_str(&value).map_err(|err| JiraError::Other(err.to_string()))
}

/// Pulls the first human-readable message out of a Jira error body
/// (`errorMessages` array or the `errors` object), falling back to None.
fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    if let Some(messages) = value.get("errorMessages").and_then(Value::as_array) {
        if let Some(first) = messages.iter().find_map(Value::as_str) {
            return Some(first.to_string());
        }
    }
    value
        .get("errors")
        .and_then(Value::as_object)
        .and_then(|map| map.values().find_map(Value::as_str))
        .map(|text| text.to_string())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::{EstimateAdjustment, LogWorkRequest};

    fn test_client(server: &mockito::ServerGuard) -> JiraClient {
        let config = JiraConfig::new(server.url(), "dev@example.com", "token")
            .with_cooldown(Duration::from_millis(0));
        JiraClient::new(config).expect("client should build")
    }

    #[tokio::test]
    async fn log_work_sends_adjustment_query_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/api/2/issue/JQR-1/worklog")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("adjustEstimate".into(), "new".into()),
                mockito::Matcher::UrlEncoded("newEstimate".into(), "2d".into()),
            ]))
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "timeSpent": "1h 30m",
                "started": "2019-05-12T13:15:00.000+0000",
            })))
            .with_status(201)
            .with_body(r#"{"id":"10042"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let request = LogWorkRequest {
            time_spent: "1h 30m".to_string(),
            started: "2019-05-12T13:15:00.000+0000".to_string(),
            comment: None,
        };
        let created = client
            .log_work("JQR-1", &request, &EstimateAdjustment::New("2d".into()))
            .await
            .expect("worklog should be accepted");

        assert_eq!(created.id.as_deref(), Some("10042"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn search_parses_issue_fields() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rest/api/2/search")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"total":1,"issues":[{"key":"JQR-7","fields":{
                    "summary":"Fix timer drift",
                    "status":{"id":"3","name":"In Progress"},
                    "timetracking":{"originalEstimate":"1d","remainingEstimate":"4h","timeSpent":"2h"}
                }}]}"#,
            )
            .create_async()
            .await;

        let client = test_client(&server);
        let issues = client
            .search_issues("assignee = currentUser()", 50)
            .await
            .expect("search should parse");

        assert_eq!(issues.len(), 1);
        let fields = &issues[0].fields;
        assert_eq!(issues[0].key, "JQR-7");
        assert_eq!(fields.summary.as_deref(), Some("Fix timer drift"));
        let tracking = fields.timetracking.as_ref().expect("timetracking present");
        assert_eq!(tracking.time_spent.as_deref(), Some("2h"));
    }

    #[tokio::test]
    async fn domain_rejection_surfaces_service_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/rest/api/2/issue/JQR-1/worklog")
            .match_query(mockito::Matcher::Any)
            .with_status(400)
            .with_body(r#"{"errorMessages":["Worklog must not be null"],"errors":{}}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let request = LogWorkRequest {
            time_spent: "0m".to_string(),
            started: "2019-05-12T13:15:00.000+0000".to_string(),
            comment: None,
        };
        let err = client
            .log_work("JQR-1", &request, &EstimateAdjustment::Auto)
            .await
            .expect_err("400 must map to a domain error");

        match err {
            JiraError::Http { status, ref message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Worklog must not be null");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
        assert!(!err.is_connectivity());
    }

    #[tokio::test]
    async fn unauthorized_maps_to_authentication_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rest/api/2/myself")
            .with_status(401)
            .with_body("Unauthorized")
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client.get_myself().await.expect_err("401 must fail");
        assert!(matches!(err, JiraError::Authentication(_)));
    }
}
