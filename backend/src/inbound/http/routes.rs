//! Route table for the HTTP adapter.

use actix_web::web;

use super::error::json_config;
use super::health::{live, ready, root};
use super::metrics::metrics;
use super::users::{create_user, get_user};

/// Register every endpoint and the JSON extractor configuration.
///
/// Callers supply [`super::state::HttpState`] and
/// [`super::health::HealthState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_api::inbound::http::routes::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(root)
        .service(create_user)
        .service(get_user)
        .service(metrics)
        .service(ready)
        .service(live);
}
