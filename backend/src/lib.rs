//! User API library modules.
//!
//! Layout follows a hexagonal split: `domain` holds the model, ports and the
//! user service; `inbound` adapts HTTP onto it; `outbound` implements the
//! store and metrics ports.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
