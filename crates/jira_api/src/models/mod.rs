mod issue;
mod transition;
mod user;
mod worklog;

pub use issue::{Issue, IssueFields, IssueSearchResponse, StatusRef, Timetracking};
pub use transition::{Transition, TransitionDestination, TransitionsResponse};
pub use user::Myself;
pub use worklog::{EstimateAdjustment, LogWorkRequest, WorklogCreated};
