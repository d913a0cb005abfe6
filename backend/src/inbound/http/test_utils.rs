//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use prometheus::Registry;

use crate::Trace;
use crate::domain::UserService;
use crate::inbound::http::health::HealthState;
use crate::inbound::http::routes::configure;
use crate::inbound::http::state::HttpState;
use crate::outbound::metrics::PrometheusUserMetrics;
use crate::outbound::persistence::InMemoryUserStore;

/// Service over a fresh in-memory store and a private Prometheus registry.
///
/// The metrics adapter is returned so tests can read counter values.
pub fn in_memory_service() -> (UserService, Arc<PrometheusUserMetrics>) {
    let metrics = Arc::new(
        PrometheusUserMetrics::new(&Registry::new()).expect("metric registration should succeed"),
    );
    let service = UserService::new(Arc::new(InMemoryUserStore::new()), metrics.clone());
    (service, metrics)
}

/// Full application wired like the server, minus the listener.
pub fn test_app(
    service: UserService,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(service)))
        .app_data(web::Data::new(HealthState::new()))
        .wrap(Trace)
        .configure(configure)
}
