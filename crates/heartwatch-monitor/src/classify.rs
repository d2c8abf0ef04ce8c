//! Failure classification.
//!
//! Maps a raw failure description to the user-facing reason. The
//! case-sensitive `denied` substring match mirrors the permission API's own
//! wording for a user-declined prompt; it is the existing contract, kept
//! behind this single function so a structured error code could replace it
//! without touching the state machine.

/// Fixed reason shown when camera permission is declined.
pub(crate) const CAMERA_REQUIRED: &str = "Camera access is required to perform monitoring.";

/// Classify a failure description into the user-facing reason.
pub fn classify_failure(description: &str) -> String {
  if description.contains("denied") {
    CAMERA_REQUIRED.to_string()
  } else {
    format!("An error occurred: {}", description)
  }
}
