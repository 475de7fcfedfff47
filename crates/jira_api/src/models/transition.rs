//! Workflow transition models.

use serde::Deserialize;

/// Represents a workflow transition available on an issue.
#[derive(Debug, Deserialize, Clone)]
pub struct Transition {
    pub id: String,
    pub name: Option<String>,
    #[serde(default)]
    pub to: Option<TransitionDestination>,
}

/// Target status a transition leads to.
#[derive(Debug, Deserialize, Clone)]
pub struct TransitionDestination {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Envelope returned by the transitions endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct TransitionsResponse {
    #[serde(default)]
    pub transitions: Vec<Transition>,
}
