//! Issue models returned by Jira search and detail endpoints.

use serde::Deserialize;

/// Represents an issue returned by the Jira API with the field subset this
/// application requests (`key,summary,status,timetracking`).
#[derive(Debug, Deserialize, Clone)]
pub struct Issue {
    pub key: String,
    #[serde(default)]
    pub fields: IssueFields,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct IssueFields {
    pub summary: Option<String>,
    #[serde(default)]
    pub status: Option<StatusRef>,
    #[serde(default)]
    pub timetracking: Option<Timetracking>,
}

/// Status reference embedded in issue fields.
#[derive(Debug, Deserialize, Clone)]
pub struct StatusRef {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Timetracking block carrying the human-readable estimate strings the
/// service maintains ("2h 30m" style); absent on never-estimated issues.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Timetracking {
    pub original_estimate: Option<String>,
    pub remaining_estimate: Option<String>,
    pub time_spent: Option<String>,
}

/// Envelope returned by the issue search endpoint.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct IssueSearchResponse {
    #[serde(default)]
    pub issues: Vec<Issue>,
    pub total: Option<u64>,
}
