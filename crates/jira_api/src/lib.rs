//! Typed Jira REST client crate used by the native app backend.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod rate_limiter;

pub use client::JiraClient;
pub use reqwest::StatusCode;
pub use config::JiraConfig;
pub use error::{JiraError, Result};
pub use models::{
    EstimateAdjustment, Issue, IssueFields, IssueSearchResponse, LogWorkRequest, Myself, StatusRef,
    Timetracking, Transition, TransitionDestination, TransitionsResponse, WorklogCreated,
};
