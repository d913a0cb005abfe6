//! Metrics exposition endpoint.

use actix_web::{HttpResponse, get, http::header, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;

/// Serve the metrics sink's snapshot verbatim with its own content type.
#[utoipa::path(
    get,
    path = "/metrics",
    tags = ["metrics"],
    responses(
        (status = 200, description = "Prometheus text exposition", content_type = "text/plain", body = String),
        (status = 500, description = "Snapshot could not be encoded", body = ErrorBody)
    )
)]
#[get("/metrics")]
pub async fn metrics(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let export = state.users.export_metrics().await?;
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, export.content_type))
        .body(export.body))
}
