//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with its request and response schemas. Swagger UI serves it in debug
//! builds and `cargo run --bin openapi-dump` prints it for tooling.

use utoipa::OpenApi;

use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::health::RootMessage;
use crate::inbound::http::users::{CreateUserRequest, CreateUserResponse, UserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User API",
        description = "Create and fetch user records and expose Prometheus metrics."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::metrics::metrics,
        crate::inbound::http::health::root,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateUserRequest,
        CreateUserResponse,
        UserResponse,
        ErrorBody,
        RootMessage
    )),
    tags(
        (name = "users", description = "Create and fetch user records"),
        (name = "metrics", description = "Prometheus exposition"),
        (name = "health", description = "Liveness and readiness")
    )
)]
pub struct ApiDoc;
