//! Collaborator capabilities consumed by the workflow.
//!
//! The workflow never talks to a camera or a socket directly; it goes through
//! these two traits. Implementations live in the host crates.

use async_trait::async_trait;
use thiserror::Error;

/// Rejection from the camera permission prompt.
///
/// Carries the permission API's own description of why access was not
/// granted. The workflow only ever inspects it for the `denied` substring.
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct CameraError {
  pub reason: String,
}

impl CameraError {
  pub fn new(reason: impl Into<String>) -> Self {
    Self {
      reason: reason.into(),
    }
  }
}

/// A granted camera handle.
///
/// The workflow uses the grant purely as a readiness probe and releases the
/// lease immediately after it is handed out. `release` must be cheap and
/// infallible.
pub trait CameraLease: Send {
  fn release(self: Box<Self>);
}

/// Permission-checking capability.
#[async_trait]
pub trait CameraGate: Send + Sync {
  /// Request camera access.
  ///
  /// May suspend for as long as the user takes to decide.
  async fn request_access(&self) -> Result<Box<dyn CameraLease>, CameraError>;
}

/// Transport-level failure from the fetch capability.
///
/// Covers everything below the HTTP status line: connection refused, DNS,
/// interrupted body reads. A response that arrived with a non-success status
/// is not a `FetchError` — the workflow inspects the status itself.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct FetchError {
  pub message: String,
}

impl FetchError {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }
}

/// HTTP-like response from the monitoring service.
#[derive(Debug, Clone)]
pub struct FetchResponse {
  pub status: u16,
  pub body: Vec<u8>,
}

/// Result-fetching capability.
#[async_trait]
pub trait MonitorClient: Send + Sync {
  /// Fetch the monitoring payload from `url`. Exactly one attempt, no retry.
  async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError>;
}
