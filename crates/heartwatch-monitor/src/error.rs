//! Workflow errors.

use thiserror::Error;

/// Errors returned by `MonitoringWorkflow::start`.
///
/// Everything that goes wrong *inside* a run is caught at the workflow
/// boundary and classified into the snapshot's failure reason; `start` itself
/// only refuses to overlap runs.
#[derive(Debug, Error)]
pub enum WorkflowError {
  /// A previous run has not reached a terminal state yet.
  #[error("a monitoring run is already in flight")]
  AlreadyRunning,
}

/// Failure causes a run can hit, before classification.
///
/// The `Display` text of each variant is the description handed to
/// [`classify_failure`](crate::classify_failure).
#[derive(Debug, Error)]
pub enum RunError {
  /// Camera permission was not granted.
  #[error("{reason}")]
  PermissionRejected { reason: String },

  /// The fetch completed with a non-success status code.
  #[error("HTTP error: {status}")]
  Transport { status: u16 },

  /// The response parsed but did not match the required schema
  /// (`status_code` != 200 or `detail.results` missing).
  #[error("Monitoring failed. The data structure from the server was invalid.")]
  InvalidPayload,

  /// Anything else raised by the collaborators: network unreachable, a body
  /// that is not JSON, and so on.
  #[error("{message}")]
  Other { message: String },
}
