//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: the in-memory, ObjectId-keyed user store
//! - **metrics**: Prometheus-backed counters and text exposition
//!
//! Adapters are thin translators between domain types and backend
//! representations. They contain no request-handling logic.

pub mod metrics;
pub mod persistence;
