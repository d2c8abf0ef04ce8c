//! Wire schema for the monitoring service response.

use serde::{Deserialize, Serialize};

/// Signal-processing results of a successful run.
///
/// Values are taken from the server payload verbatim; no transformation
/// happens on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
  pub bpm: f64,
  pub fft_bpm: f64,
  pub peaks_found: u64,
  /// Mean inter-beat interval, milliseconds.
  pub mean_ibi: f64,
  /// Standard deviation of NN intervals, milliseconds.
  pub sdnn: f64,
  /// 0-100.
  pub signal_quality: u8,
  /// Peak timestamps/indices. Order-significant.
  pub peaks: Vec<f64>,
}

/// Top-level response body.
///
/// `status_code` is the body's own success discriminator, independent of the
/// transport status code and checked after it. The payload is valid only if
/// it equals 200 and `detail.results` is present.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorResponse {
  #[serde(default)]
  pub status_code: Option<i64>,
  #[serde(default)]
  pub detail: Option<MonitorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitorDetail {
  /// Optional server-provided status line, shown on success.
  #[serde(default)]
  pub message: Option<String>,
  #[serde(default)]
  pub results: Option<MeasurementResult>,
}
