//! HTTP client capability for heartwatch.

mod client;

pub use client::HttpMonitorClient;
