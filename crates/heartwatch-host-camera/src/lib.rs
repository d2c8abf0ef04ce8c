//! Camera permission capability for heartwatch.
//!
//! The workflow only needs a grant/deny answer; no frames are ever captured.
//! [`PromptCameraGate`] asks on the terminal and suspends until the user
//! answers. [`StaticCameraGate`] answers without asking, for scripted use and
//! tests.

mod gate;

pub use gate::{PromptCameraGate, StaticCameraGate};
