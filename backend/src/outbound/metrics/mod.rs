//! Outbound adapters for metrics exporting.
//!
//! Provides the Prometheus-backed implementation of the
//! [`crate::domain::ports::UserMetrics`] port and the process collector
//! registered alongside it.

mod prometheus_user_metrics;

pub use prometheus_user_metrics::{PrometheusUserMetrics, register_process_collector};
