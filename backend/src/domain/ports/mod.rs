//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Ports describe how the domain expects to talk to driven adapters: the
//! user store and the metrics sink. Each trait exposes strongly typed errors
//! so adapters map their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod user_metrics;
mod user_store;

#[cfg(test)]
pub use user_metrics::MockUserMetrics;
pub use user_metrics::{MetricsExport, NoOpUserMetrics, UserCounter, UserMetrics, UserMetricsError};
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{InvalidUserIdError, UserStore, UserStoreError};
