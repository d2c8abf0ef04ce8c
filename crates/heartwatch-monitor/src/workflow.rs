//! The monitoring workflow state machine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use tracing::{error, info, instrument, warn};

use crate::capability::{CameraGate, MonitorClient};
use crate::classify::classify_failure;
use crate::error::{RunError, WorkflowError};
use crate::events::{NoopNotifier, WorkflowEvent, WorkflowNotifier};
use crate::result::{MeasurementResult, MonitorResponse};
use crate::state::{WorkflowSnapshot, WorkflowState};

/// Default monitoring service endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/monitor";

const STATUS_IDLE: &str = "Click the button to start monitoring.";
const STATUS_INITIALIZING: &str = "Initializing...";
const STATUS_CAPTURING: &str = "Capturing data from the server...";
const STATUS_COMPLETE: &str = "Monitoring complete!";
const STATUS_FAILED: &str = "Monitoring failed. Please try again.";

/// Configuration for the monitoring workflow.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
  /// URL of the monitoring service. Queried as-is, no parameters.
  pub endpoint: String,
}

impl Default for MonitorConfig {
  fn default() -> Self {
    Self {
      endpoint: DEFAULT_ENDPOINT.to_string(),
    }
  }
}

/// The monitoring workflow.
///
/// Sequences permission acquisition and result fetching as one user-visible
/// operation, classifies failures, and exposes progress through
/// [`WorkflowSnapshot`]s and notifier events. Generic over the two
/// collaborator capabilities and `N: WorkflowNotifier`; use
/// `MonitoringWorkflow::new()` for a workflow with no-op notifications, or
/// `MonitoringWorkflow::with_notifier()` to observe events.
///
/// A workflow has one in-flight run capacity and no queue: `start()` while a
/// run is in flight is refused with [`WorkflowError::AlreadyRunning`]. There
/// is no cancellation; once honored, a run proceeds to a terminal state.
pub struct MonitoringWorkflow<C, M, N = NoopNotifier>
where
  C: CameraGate,
  M: MonitorClient,
  N: WorkflowNotifier,
{
  camera: C,
  client: M,
  config: MonitorConfig,
  notifier: N,
  in_flight: AtomicBool,
  inner: Mutex<Inner>,
}

/// Mutable workflow fields, guarded together so snapshots are consistent.
struct Inner {
  state: WorkflowState,
  status: String,
  result: Option<MeasurementResult>,
  failure: Option<String>,
}

/// Clears the in-flight flag on every exit path of a run.
struct InFlightGuard<'a> {
  flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
  fn drop(&mut self) {
    self.flag.store(false, Ordering::Release);
  }
}

impl<C, M> MonitoringWorkflow<C, M, NoopNotifier>
where
  C: CameraGate,
  M: MonitorClient,
{
  /// Create a workflow with no-op notifications.
  ///
  /// Progress is still observable through `snapshot()`.
  pub fn new(config: MonitorConfig, camera: C, client: M) -> Self {
    Self::with_notifier(config, camera, client, NoopNotifier)
  }
}

impl<C, M, N> MonitoringWorkflow<C, M, N>
where
  C: CameraGate,
  M: MonitorClient,
  N: WorkflowNotifier,
{
  /// Create a workflow with a custom notifier.
  pub fn with_notifier(config: MonitorConfig, camera: C, client: M, notifier: N) -> Self {
    Self {
      camera,
      client,
      config,
      notifier,
      in_flight: AtomicBool::new(false),
      inner: Mutex::new(Inner {
        state: WorkflowState::Idle,
        status: STATUS_IDLE.to_string(),
        result: None,
        failure: None,
      }),
    }
  }

  /// Current state.
  pub fn state(&self) -> WorkflowState {
    self.lock().state
  }

  /// Point-in-time view of the workflow.
  pub fn snapshot(&self) -> WorkflowSnapshot {
    let inner = self.lock();
    WorkflowSnapshot {
      state: inner.state,
      status: inner.status.clone(),
      result: inner.result.clone(),
      failure: inner.failure.clone(),
    }
  }

  /// Run the monitoring workflow once.
  ///
  /// Refused with [`WorkflowError::AlreadyRunning`], without touching any
  /// state, if a run is still in flight. Every other outcome — permission
  /// rejected, transport failure, invalid payload, success — lands in the
  /// snapshot and the event stream; `start` never surfaces them as errors.
  pub async fn start(&self) -> Result<(), WorkflowError> {
    if self
      .in_flight
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
      .is_err()
    {
      warn!("start refused: a run is already in flight");
      return Err(WorkflowError::AlreadyRunning);
    }
    // Dropped when the run reaches a terminal state, on every exit path.
    let _guard = InFlightGuard {
      flag: &self.in_flight,
    };

    let run_id = uuid::Uuid::new_v4().to_string();
    self.run(&run_id).await;
    Ok(())
  }

  #[instrument(name = "monitor_run", skip_all, fields(run_id = %run_id))]
  async fn run(&self, run_id: &str) {
    self.begin_run(run_id);

    match self.acquire_and_fetch(run_id).await {
      Ok((result, message)) => self.complete(run_id, result, message),
      Err(e) => self.fail(run_id, e),
    }
  }

  /// Permission probe followed by a single fetch and payload validation.
  async fn acquire_and_fetch(
    &self,
    run_id: &str,
  ) -> Result<(MeasurementResult, Option<String>), RunError> {
    // The grant is only a readiness probe - release the lease right away.
    let lease = self
      .camera
      .request_access()
      .await
      .map_err(|e| RunError::PermissionRejected { reason: e.reason })?;
    lease.release();
    info!(run_id = %run_id, "camera access granted and lease released");

    self.set_status(run_id, STATUS_CAPTURING);

    let response = self
      .client
      .fetch(&self.config.endpoint)
      .await
      .map_err(|e| RunError::Other { message: e.message })?;
    info!(run_id = %run_id, status = response.status, "fetch completed");

    if !(200..300).contains(&response.status) {
      return Err(RunError::Transport {
        status: response.status,
      });
    }

    let parsed: MonitorResponse = serde_json::from_slice(&response.body)
      .map_err(|e| RunError::Other {
        message: e.to_string(),
      })?;

    // The body carries its own success discriminator, checked after the
    // transport status.
    if parsed.status_code != Some(200) {
      return Err(RunError::InvalidPayload);
    }
    let detail = parsed.detail.ok_or(RunError::InvalidPayload)?;
    let results = detail.results.ok_or(RunError::InvalidPayload)?;

    Ok((results, detail.message))
  }

  /// Enter `Running` and clear the artifacts of the previous run.
  fn begin_run(&self, run_id: &str) {
    {
      let mut inner = self.lock();
      inner.state = WorkflowState::Running;
      inner.status = STATUS_INITIALIZING.to_string();
      inner.result = None;
      inner.failure = None;
    }
    info!(run_id = %run_id, "run started");
    self.notifier.notify(WorkflowEvent::RunStarted {
      run_id: run_id.to_string(),
    });
    self.notifier.notify(WorkflowEvent::StatusChanged {
      run_id: run_id.to_string(),
      status: STATUS_INITIALIZING.to_string(),
    });
  }

  fn set_status(&self, run_id: &str, status: &str) {
    self.lock().status = status.to_string();
    self.notifier.notify(WorkflowEvent::StatusChanged {
      run_id: run_id.to_string(),
      status: status.to_string(),
    });
  }

  /// Transition to `Succeeded`.
  ///
  /// The status message is the server-provided one if present, else a fixed
  /// success message.
  fn complete(&self, run_id: &str, result: MeasurementResult, message: Option<String>) {
    let status = message.unwrap_or_else(|| STATUS_COMPLETE.to_string());
    {
      let mut inner = self.lock();
      inner.state = WorkflowState::Succeeded;
      inner.status = status.clone();
      inner.result = Some(result.clone());
      inner.failure = None;
    }
    info!(run_id = %run_id, bpm = result.bpm, "run succeeded");
    self.notifier.notify(WorkflowEvent::StatusChanged {
      run_id: run_id.to_string(),
      status,
    });
    self.notifier.notify(WorkflowEvent::RunSucceeded {
      run_id: run_id.to_string(),
      result,
    });
  }

  /// Classify the failure and transition to `Failed`.
  fn fail(&self, run_id: &str, cause: RunError) {
    let failure = classify_failure(&cause.to_string());
    {
      let mut inner = self.lock();
      inner.state = WorkflowState::Failed;
      inner.status = STATUS_FAILED.to_string();
      inner.result = None;
      inner.failure = Some(failure.clone());
    }
    error!(run_id = %run_id, cause = %cause, failure = %failure, "run failed");
    self.notifier.notify(WorkflowEvent::StatusChanged {
      run_id: run_id.to_string(),
      status: STATUS_FAILED.to_string(),
    });
    self.notifier.notify(WorkflowEvent::RunFailed {
      run_id: run_id.to_string(),
      failure,
    });
  }

  fn lock(&self) -> MutexGuard<'_, Inner> {
    self.inner.lock().expect("workflow state lock poisoned")
  }
}
