//! Workflow state.

use serde::{Deserialize, Serialize};

use crate::result::MeasurementResult;

/// The phase a monitoring run is in.
///
/// Exactly one is active at any time. Transitions happen only inside the
/// workflow; `Succeeded` and `Failed` are terminal until the next run, which
/// re-enters `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowState {
  /// No run has happened yet.
  Idle,
  /// A run is in flight.
  Running,
  /// The last run produced a [`MeasurementResult`].
  Succeeded,
  /// The last run failed with a classified reason.
  Failed,
}

/// A point-in-time view of the workflow, for the presentation layer.
///
/// `result` and `failure` are never both present; both are cleared when a new
/// run enters `Running`.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowSnapshot {
  pub state: WorkflowState,
  /// Human-readable progress/outcome message. Never empty.
  pub status: String,
  /// Present only in `Succeeded`.
  pub result: Option<MeasurementResult>,
  /// Classified failure reason. Present only in `Failed`.
  pub failure: Option<String>,
}
