//! Workflow events and notifiers.
//!
//! Status changes must be visible to the presentation layer as they occur,
//! not only when a run ends. The workflow emits events through a
//! `WorkflowNotifier`; consumers decide what to do with them (render, log,
//! ignore, etc.).

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::result::MeasurementResult;

/// Events emitted over the course of a run.
///
/// Every run emits `RunStarted`, a sequence of `StatusChanged` values
/// (initializing, in-progress once permission is granted, terminal), and
/// exactly one of `RunSucceeded` or `RunFailed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WorkflowEvent {
  /// A run has entered `Running`.
  RunStarted { run_id: String },

  /// The status message changed.
  StatusChanged { run_id: String, status: String },

  /// The run reached `Succeeded`.
  RunSucceeded {
    run_id: String,
    result: MeasurementResult,
  },

  /// The run reached `Failed`.
  RunFailed { run_id: String, failure: String },
}

/// Trait for receiving workflow events.
pub trait WorkflowNotifier: Send + Sync {
  /// Called when a workflow event occurs.
  fn notify(&self, event: WorkflowEvent);
}

/// A no-op notifier that discards all events.
///
/// Useful for tests or when event observation is not needed.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl WorkflowNotifier for NoopNotifier {
  fn notify(&self, _event: WorkflowEvent) {
    // Intentionally empty
  }
}

/// A notifier that sends events to an unbounded channel.
///
/// Use this when the presentation layer consumes events asynchronously. The
/// channel is unbounded so a slow consumer never stalls the run; event volume
/// is a handful per run, so memory growth is not a concern.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  sender: mpsc::UnboundedSender<WorkflowEvent>,
}

impl ChannelNotifier {
  /// Create a new channel notifier.
  pub fn new(sender: mpsc::UnboundedSender<WorkflowEvent>) -> Self {
    Self { sender }
  }
}

impl WorkflowNotifier for ChannelNotifier {
  fn notify(&self, event: WorkflowEvent) {
    // Ignore send errors - receiver may have been dropped
    let _ = self.sender.send(event);
  }
}
