//! Prometheus adapter for user counters.
//!
//! Counters are registered on a caller-supplied registry so HTTP request
//! metrics (when enabled) and user counters share one `/metrics` exposition.

use std::collections::HashMap;

use async_trait::async_trait;
use prometheus::{Encoder, IntCounter, Opts, Registry, TextEncoder};

use crate::domain::ports::{MetricsExport, UserCounter, UserMetrics, UserMetricsError};

/// Prometheus-backed metrics sink.
///
/// # Metric Specification
///
/// - **Name**: `user_create_total`
/// - **Type**: Counter
/// - **Labels**: none
pub struct PrometheusUserMetrics {
    registry: Registry,
    counters: HashMap<UserCounter, IntCounter>,
}

impl PrometheusUserMetrics {
    /// Create and register every [`UserCounter`] with the given registry.
    ///
    /// # Errors
    ///
    /// Returns an error if a counter cannot be registered (for example when a
    /// metric with the same name already exists in the registry).
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let mut counters = HashMap::with_capacity(UserCounter::ALL.len());
        for counter in UserCounter::ALL {
            let metric = IntCounter::with_opts(Opts::new(counter.name(), counter.help()))?;
            registry.register(Box::new(metric.clone()))?;
            counters.insert(counter, metric);
        }
        Ok(Self {
            registry: registry.clone(),
            counters,
        })
    }

    /// Current value of a counter, if registered.
    pub fn value(&self, counter: UserCounter) -> Option<u64> {
        self.counters.get(&counter).map(IntCounter::get)
    }
}

/// Register CPU, memory, thread and file-descriptor series for this process.
///
/// Only Linux exposes these through `/proc`; elsewhere nothing is registered.
///
/// # Errors
///
/// Returns an error if process metrics are already registered on `registry`.
pub fn register_process_collector(registry: &Registry) -> Result<(), prometheus::Error> {
    #[cfg(target_os = "linux")]
    registry.register(Box::new(
        prometheus::process_collector::ProcessCollector::for_self(),
    ))?;
    #[cfg(not(target_os = "linux"))]
    let _ = registry;
    Ok(())
}

#[async_trait]
impl UserMetrics for PrometheusUserMetrics {
    async fn increment(&self, counter: UserCounter) -> Result<(), UserMetricsError> {
        let metric = self
            .counters
            .get(&counter)
            .ok_or_else(|| UserMetricsError::record(format!("counter {counter} is not registered")))?;
        metric.inc();
        Ok(())
    }

    async fn export(&self) -> Result<MetricsExport, UserMetricsError> {
        let encoder = TextEncoder::new();
        let families = self.registry.gather();
        let mut body = Vec::new();
        encoder
            .encode(&families, &mut body)
            .map_err(|err| UserMetricsError::export(err.to_string()))?;
        Ok(MetricsExport {
            body,
            content_type: encoder.format_type().to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn metrics() -> PrometheusUserMetrics {
        PrometheusUserMetrics::new(&Registry::new()).expect("metric registration should succeed")
    }

    #[rstest]
    fn registers_counter_with_registry() {
        let registry = Registry::new();
        let _metrics = PrometheusUserMetrics::new(&registry).expect("registration succeeds");
        assert!(
            registry
                .gather()
                .iter()
                .any(|family| family.name() == "user_create_total"),
            "user_create_total should be registered"
        );
    }

    #[rstest]
    fn duplicate_registration_is_rejected() {
        let registry = Registry::new();
        let _first = PrometheusUserMetrics::new(&registry).expect("first registration");
        assert!(PrometheusUserMetrics::new(&registry).is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn increments_are_exact(metrics: PrometheusUserMetrics) {
        for _ in 0..3 {
            metrics
                .increment(UserCounter::Created)
                .await
                .expect("increment succeeds");
        }
        assert_eq!(metrics.value(UserCounter::Created), Some(3));
    }

    #[rstest]
    #[tokio::test]
    async fn export_uses_text_exposition(metrics: PrometheusUserMetrics) {
        metrics
            .increment(UserCounter::Created)
            .await
            .expect("increment succeeds");
        let export = metrics.export().await.expect("export succeeds");
        let body = String::from_utf8(export.body).expect("utf8 exposition");

        assert_eq!(export.content_type, prometheus::TEXT_FORMAT);
        assert!(body.contains("# HELP user_create_total Number of users created"));
        assert!(body.contains("# TYPE user_create_total counter"));
        assert!(body.lines().any(|line| line == "user_create_total 1"));
    }

    #[rstest]
    #[tokio::test]
    async fn concurrent_increments_are_not_lost(metrics: PrometheusUserMetrics) {
        let metrics = std::sync::Arc::new(metrics);
        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let metrics = metrics.clone();
                tokio::spawn(async move {
                    for _ in 0..25 {
                        metrics
                            .increment(UserCounter::Created)
                            .await
                            .expect("increment succeeds");
                    }
                })
            })
            .collect();
        for task in tasks {
            task.await.expect("task completes");
        }
        assert_eq!(metrics.value(UserCounter::Created), Some(400));
    }

    fn exported_total(body: &[u8]) -> u64 {
        std::str::from_utf8(body)
            .expect("utf8 exposition")
            .lines()
            .find_map(|line| line.strip_prefix("user_create_total "))
            .and_then(|value| value.trim().parse().ok())
            .expect("user_create_total sample present")
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn exports_during_increments_never_go_backwards() {
        const WRITERS: u64 = 8;
        const PER_WRITER: u64 = 50;
        const TOTAL: u64 = WRITERS * PER_WRITER;

        let metrics = std::sync::Arc::new(
            PrometheusUserMetrics::new(&Registry::new()).expect("registration succeeds"),
        );
        let writers: Vec<_> = (0..WRITERS)
            .map(|_| {
                let metrics = metrics.clone();
                tokio::spawn(async move {
                    for _ in 0..PER_WRITER {
                        metrics
                            .increment(UserCounter::Created)
                            .await
                            .expect("increment succeeds");
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let metrics = metrics.clone();
                tokio::spawn(async move {
                    let mut observed = Vec::new();
                    for _ in 0..60 {
                        let export = metrics.export().await.expect("export succeeds");
                        observed.push(exported_total(&export.body));
                        tokio::task::yield_now().await;
                    }
                    observed
                })
            })
            .collect();

        for writer in writers {
            writer.await.expect("writer completes");
        }
        for reader in readers {
            let observed = reader.await.expect("reader completes");
            assert!(
                observed.windows(2).all(|pair| matches!(pair, [a, b] if a <= b)),
                "snapshots went backwards: {observed:?}"
            );
            assert!(observed.iter().all(|value| *value <= TOTAL));
        }

        let last = metrics.export().await.expect("final export");
        assert_eq!(exported_total(&last.body), TOTAL);
    }

    #[cfg(target_os = "linux")]
    #[rstest]
    fn process_collector_adds_process_series() {
        let registry = Registry::new();
        let _metrics = PrometheusUserMetrics::new(&registry).expect("registration succeeds");
        register_process_collector(&registry).expect("process collector registers");

        let names: Vec<String> = registry
            .gather()
            .iter()
            .map(|family| family.name().to_owned())
            .collect();
        assert!(names.iter().any(|name| name == "process_cpu_seconds_total"));
        assert!(names.iter().any(|name| name == "user_create_total"));
        assert!(register_process_collector(&registry).is_err());
    }
}
