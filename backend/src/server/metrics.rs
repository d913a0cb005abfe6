//! Optional Prometheus request metrics middleware wrapper.
//!
//! Request histograms are recorded on the same registry as the user
//! counters, so `GET /metrics` exports both. The middleware itself never
//! serves an endpoint.

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::BoxBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;
use prometheus::Registry;
use std::sync::Arc;

const NAMESPACE: &str = "user_api";

#[derive(Clone)]
pub(crate) enum MetricsLayer {
    Enabled(Arc<PrometheusMetrics>),
    Disabled,
}

impl MetricsLayer {
    /// Build request metrics on `registry`, or a pass-through layer.
    pub(crate) fn for_registry(registry: Option<&Registry>) -> std::io::Result<Self> {
        let Some(registry) = registry else {
            return Ok(Self::Disabled);
        };
        let metrics = PrometheusMetricsBuilder::new(NAMESPACE)
            .registry(registry.clone())
            .build()
            .map_err(|err| {
                std::io::Error::other(format!("request metrics registration failed: {err}"))
            })?;
        Ok(Self::Enabled(Arc::new(metrics)))
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self.clone() {
            Self::Enabled(metrics) => {
                let fut = Compat::new((*metrics).clone()).new_transform(service);
                Box::pin(async move {
                    let svc = fut.await?;
                    Ok(boxed::service(svc))
                })
            }
            Self::Disabled => Box::pin(async move {
                let svc = service.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
                Ok(boxed::service(svc))
            }),
        }
    }
}
