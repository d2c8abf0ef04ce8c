//! Camera gate implementations.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use heartwatch_monitor::{CameraError, CameraGate, CameraLease};

/// Description attached to a user-declined prompt.
///
/// The workflow's classifier keys on the `denied` substring in this wording.
const DENIED_BY_USER: &str = "Permission denied by user";

/// Lease handed out on a grant.
///
/// There is no real device handle behind it; releasing only logs.
struct ProbeLease;

impl CameraLease for ProbeLease {
  fn release(self: Box<Self>) {
    debug!("camera lease released");
  }
}

/// Interactive gate that prompts on the terminal.
///
/// Suspends in `request_access` until the user answers, which may take
/// arbitrarily long.
pub struct PromptCameraGate;

impl PromptCameraGate {
  pub fn new() -> Self {
    Self
  }
}

impl Default for PromptCameraGate {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl CameraGate for PromptCameraGate {
  async fn request_access(&self) -> Result<Box<dyn CameraLease>, CameraError> {
    let mut stderr = tokio::io::stderr();
    stderr
      .write_all(b"Allow camera access? [y/N] ")
      .await
      .map_err(|e| CameraError::new(format!("camera prompt failed: {}", e)))?;
    stderr
      .flush()
      .await
      .map_err(|e| CameraError::new(format!("camera prompt failed: {}", e)))?;

    let mut line = String::new();
    let mut reader = BufReader::new(tokio::io::stdin());
    reader
      .read_line(&mut line)
      .await
      .map_err(|e| CameraError::new(format!("camera prompt failed: {}", e)))?;

    match line.trim().to_ascii_lowercase().as_str() {
      "y" | "yes" => {
        debug!("camera access granted at the prompt");
        Ok(Box::new(ProbeLease) as Box<dyn CameraLease>)
      }
      _ => Err(CameraError::new(DENIED_BY_USER)),
    }
  }
}

/// Gate with a fixed answer.
pub struct StaticCameraGate {
  rejection: Option<String>,
}

impl StaticCameraGate {
  /// A gate that always grants.
  pub fn granted() -> Self {
    Self { rejection: None }
  }

  /// A gate that always rejects with the standard user-declined wording.
  pub fn denied() -> Self {
    Self {
      rejection: Some(DENIED_BY_USER.to_string()),
    }
  }

  /// A gate that always rejects with a custom description.
  pub fn rejecting(reason: impl Into<String>) -> Self {
    Self {
      rejection: Some(reason.into()),
    }
  }
}

#[async_trait]
impl CameraGate for StaticCameraGate {
  async fn request_access(&self) -> Result<Box<dyn CameraLease>, CameraError> {
    match &self.rejection {
      None => Ok(Box::new(ProbeLease) as Box<dyn CameraLease>),
      Some(reason) => Err(CameraError::new(reason.clone())),
    }
  }
}
