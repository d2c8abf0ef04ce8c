//! Heartwatch monitoring workflow.
//!
//! This crate implements the client-side workflow that turns one button press
//! into one monitoring run: probe camera permission, fetch the
//! signal-processing results from the monitoring service, validate the
//! payload, and classify anything that went wrong into a user-facing reason.
//!
//! The workflow is a small state machine ([`MonitoringWorkflow`]) with two
//! collaborator capabilities at its seams — [`CameraGate`] and
//! [`MonitorClient`] — and an observer surface ([`WorkflowNotifier`] plus
//! [`MonitoringWorkflow::snapshot`]) for the presentation layer. Camera
//! capture itself and the signal-processing algorithm live on the other side
//! of those seams.

mod capability;
mod classify;
mod error;
mod events;
mod result;
mod state;
mod workflow;

pub use capability::{
  CameraError, CameraGate, CameraLease, FetchError, FetchResponse, MonitorClient,
};
pub use classify::classify_failure;
pub use error::{RunError, WorkflowError};
pub use events::{ChannelNotifier, NoopNotifier, WorkflowEvent, WorkflowNotifier};
pub use result::{MeasurementResult, MonitorDetail, MonitorResponse};
pub use state::{WorkflowSnapshot, WorkflowState};
pub use workflow::{DEFAULT_ENDPOINT, MonitorConfig, MonitoringWorkflow};
