//! Domain primitives, ports and the user service.
//!
//! Purpose: keep the request contract (validate, delegate, map) free of HTTP
//! and storage details. Adapters in `inbound` and `outbound` translate at the
//! edges.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure categories.
//! - User / UserRecord / UserId: the user data model.
//! - UserService: create, get-by-id and metrics export use-cases.

pub mod error;
pub mod ports;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::user::{User, UserId, UserRecord};
pub use self::user_service::{
    INTERNAL_ERROR_MESSAGE, INVALID_USER_ID_MESSAGE, USER_NOT_FOUND_MESSAGE, UserService,
};
