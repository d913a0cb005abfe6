//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn failures into `{"detail": ...}` bodies with consistent
//! status codes. Internal failures are redacted.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, INTERNAL_ERROR_MESSAGE, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Error payload returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable failure description.
    #[schema(example = "User not found")]
    pub detail: String,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn body_for(error: &Error) -> ErrorBody {
    let detail = if matches!(error.code(), ErrorCode::InternalError) {
        INTERNAL_ERROR_MESSAGE
    } else {
        error.message()
    };
    ErrorBody {
        detail: detail.to_owned(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(body_for(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Self::internal(INTERNAL_ERROR_MESSAGE)
    }
}

fn reject_payload(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "request body failed shape validation");
    Error::try_new(ErrorCode::UnprocessableEntity, err.to_string())
        .unwrap_or_else(|_| Error::unprocessable("Invalid request body"))
        .into()
}

/// JSON extractor configuration answering shape mismatches with 422.
///
/// The body is `{"detail": "<deserializer message>"}`, a single string naming
/// the first problem (for example ``missing field `email` ``). It is not a
/// list of per-field location entries.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_api::inbound::http::error::json_config;
///
/// let app = App::new().app_data(json_config());
/// ```
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(reject_payload)
}
