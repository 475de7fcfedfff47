//! Worklog submission models.

use serde::{Deserialize, Serialize};

/// How the remaining estimate should change when a worklog is added.
///
/// The variants map onto the service's `adjustEstimate` query parameter;
/// their exact effect on the issue's estimate is owned by the service and
/// passed through here untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstimateAdjustment {
    /// Let the service derive the new remaining estimate.
    Auto,
    /// Replace the remaining estimate with the given duration string.
    New(String),
    /// Reduce the remaining estimate by the given duration string.
    Manual(String),
}

impl EstimateAdjustment {
    /// Renders the query parameters for this adjustment mode.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        match self {
            EstimateAdjustment::Auto => Vec::new(),
            EstimateAdjustment::New(estimate) => vec![
                ("adjustEstimate", "new".to_string()),
                ("newEstimate", estimate.clone()),
            ],
            EstimateAdjustment::Manual(reduce_by) => vec![
                ("adjustEstimate", "manual".to_string()),
                ("reduceBy", reduce_by.clone()),
            ],
        }
    }
}

/// Body of a worklog creation request.
#[derive(Debug, Serialize, Clone)]
pub struct LogWorkRequest {
    /// Human-readable duration, e.g. `"1h 30m"`.
    #[serde(rename = "timeSpent")]
    pub time_spent: String,
    /// Work start timestamp in the service's expected format.
    pub started: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Response envelope for a created worklog entry.
#[derive(Debug, Deserialize, Clone)]
pub struct WorklogCreated {
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::EstimateAdjustment;

    #[test]
    fn auto_adjustment_adds_no_params() {
        assert!(EstimateAdjustment::Auto.query_params().is_empty());
    }

    #[test]
    fn new_and_manual_render_expected_params() {
        let new = EstimateAdjustment::New("2d".into()).query_params();
        assert_eq!(new[0], ("adjustEstimate", "new".to_string()));
        assert_eq!(new[1], ("newEstimate", "2d".to_string()));

        let manual = EstimateAdjustment::Manual("3h".into()).query_params();
        assert_eq!(manual[0], ("adjustEstimate", "manual".to_string()));
        assert_eq!(manual[1], ("reduceBy", "3h".to_string()));
    }
}
