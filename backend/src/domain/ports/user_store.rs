//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{User, UserId, UserRecord};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user store adapters.
    pub enum UserStoreError {
        /// Store connection could not be established or was lost.
        Connection { message: String } => "user store connection failed: {message}",
        /// Insert was rejected by the store.
        Write { message: String } => "user store write failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } => "user store query failed: {message}",
        /// Call did not complete within the configured bound.
        Timeout { timeout_ms: u64 } => "user store call timed out after {timeout_ms} ms",
    }
}

/// Identifier text does not match the store's identifier scheme.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed user identifier: {reason}")]
pub struct InvalidUserIdError {
    reason: String,
}

impl InvalidUserIdError {
    /// Describe why the identifier was rejected.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Rejection reason for logs.
    pub fn reason(&self) -> &str {
        self.reason.as_str()
    }
}

/// Store owning persisted user records.
///
/// Implementations must tolerate concurrent calls from many in-flight
/// requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user and return its freshly assigned identifier.
    async fn insert(&self, user: &User) -> Result<UserId, UserStoreError>;

    /// Fetch a user by identifier. A well-formed id with no record yields
    /// `Ok(None)`.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, UserStoreError>;

    /// Validate identifier text against the store's identifier scheme.
    fn parse_id(&self, text: &str) -> Result<UserId, InvalidUserIdError>;
}
