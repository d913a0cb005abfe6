//! Domain port surface for recording user counters and exporting them.
//!
//! Keeps the service free of any particular metrics backend. The Prometheus
//! adapter lives in `outbound::metrics`; [`NoOpUserMetrics`] discards writes.

use std::fmt;

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors exposed by metrics sink adapters.
    pub enum UserMetricsError {
        /// Counter could not be incremented.
        Record { message: String } => "user metrics recorder failed: {message}",
        /// Snapshot could not be encoded.
        Export { message: String } => "user metrics exporter failed: {message}",
    }
}

/// Named counters maintained by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserCounter {
    /// Incremented once per successfully persisted user.
    Created,
}

impl UserCounter {
    /// Every counter the service records, for adapter registration.
    pub const ALL: [Self; 1] = [Self::Created];

    /// Exposition name of the counter.
    pub fn name(self) -> &'static str {
        match self {
            Self::Created => "user_create_total",
        }
    }

    /// Help text published alongside the counter.
    pub fn help(self) -> &'static str {
        match self {
            Self::Created => "Number of users created",
        }
    }
}

impl fmt::Display for UserCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Point-in-time metrics payload ready to be served verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsExport {
    /// Encoded exposition body.
    pub body: Vec<u8>,
    /// MIME type of `body`.
    pub content_type: String,
}

/// Metrics sink used by the user service.
///
/// `increment` must be atomic and must not block on exports; `export` must
/// never observe a partially applied increment.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserMetrics: Send + Sync {
    /// Monotonically increment the named counter by one.
    async fn increment(&self, counter: UserCounter) -> Result<(), UserMetricsError>;

    /// Produce a snapshot of every registered metric.
    async fn export(&self) -> Result<MetricsExport, UserMetricsError>;
}

/// No-op implementation for when metrics are disabled or in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpUserMetrics;

#[async_trait]
impl UserMetrics for NoOpUserMetrics {
    async fn increment(&self, _counter: UserCounter) -> Result<(), UserMetricsError> {
        Ok(())
    }

    async fn export(&self) -> Result<MetricsExport, UserMetricsError> {
        Ok(MetricsExport {
            body: Vec::new(),
            content_type: "text/plain; version=0.0.4".to_owned(),
        })
    }
}
