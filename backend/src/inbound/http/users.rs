//! Users API handlers.
//!
//! ```text
//! POST /users/ {"username":"alice","email":"a@x.com"}
//! GET /users/{user_id}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{User, UserRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /users/`.
///
/// Only shape is checked: both fields must be present and be strings.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "a@x.com")]
    pub email: String,
}

impl From<CreateUserRequest> for User {
    fn from(value: CreateUserRequest) -> Self {
        Self::new(value.username, value.email)
    }
}

/// Response body for `POST /users/`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateUserResponse {
    /// Identifier assigned by the store.
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: String,
}

/// User record as returned by `GET /users/{user_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    /// Store-assigned identifier rendered as text.
    #[serde(rename = "_id")]
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: String,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "a@x.com")]
    pub email: String,
}

impl From<UserRecord> for UserResponse {
    fn from(value: UserRecord) -> Self {
        let (id, user) = value.into_parts();
        Self {
            id: id.into(),
            username: user.username().to_owned(),
            email: user.email().to_owned(),
        }
    }
}

/// Create a user.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_api::inbound::http::users::create_user;
///
/// let app = App::new().service(create_user);
/// ```
#[utoipa::path(
    post,
    path = "/users/",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = CreateUserResponse),
        (status = 422, description = "Body is missing a field or has a non-string value", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users/")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<web::Json<CreateUserResponse>> {
    let id = state.users.create_user(payload.into_inner().into()).await?;
    Ok(web::Json(CreateUserResponse { id: id.into() }))
}

/// Fetch a user by identifier.
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(("user_id" = String, Path, description = "Store-assigned user identifier")),
    responses(
        (status = 200, description = "User record", body = UserResponse),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 404, description = "No user with this identifier", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{user_id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    user_id: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let record = state.users.get_user(user_id.as_str()).await?;
    Ok(web::Json(record.into()))
}
