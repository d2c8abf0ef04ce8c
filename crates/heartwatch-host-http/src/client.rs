//! reqwest-backed monitoring service client.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use heartwatch_monitor::{FetchError, FetchResponse, MonitorClient};

/// `reqwest`-backed implementation of the result-fetching capability.
///
/// One GET per fetch, no query parameters, no retry. Timeouts are whatever
/// the underlying client enforces.
pub struct HttpMonitorClient {
  client: Client,
}

impl HttpMonitorClient {
  pub fn new() -> Self {
    Self {
      client: Client::new(),
    }
  }
}

impl Default for HttpMonitorClient {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl MonitorClient for HttpMonitorClient {
  async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
    let url = Url::parse(url)
      .map_err(|e| FetchError::new(format!("invalid endpoint '{}': {}", url, e)))?;

    let response = self
      .client
      .get(url)
      .send()
      .await
      .map_err(|e| FetchError::new(e.to_string()))?;

    let status = response.status().as_u16();
    debug!(status, "monitor fetch completed");

    let body = response
      .bytes()
      .await
      .map_err(|e| FetchError::new(e.to_string()))?
      .to_vec();

    Ok(FetchResponse { status, body })
  }
}
