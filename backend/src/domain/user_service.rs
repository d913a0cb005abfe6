//! User service: the create, get-by-id and metrics use-cases.
//!
//! The service validates identifiers through the store, delegates
//! persistence and counter updates to its ports, and maps port failures onto
//! the three client-visible outcomes: invalid id, not found, and an opaque
//! internal error. It holds no state between requests.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::domain::ports::{
    MetricsExport, UserCounter, UserMetrics, UserStore, UserStoreError,
};
use crate::domain::{Error, User, UserId, UserRecord};

/// Message returned when identifier text fails store validation.
pub const INVALID_USER_ID_MESSAGE: &str = "Invalid user ID";
/// Message returned when a well-formed identifier has no record.
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";
/// Message returned for any store or exporter failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Use-case service for user records.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use user_api::domain::UserService;
/// use user_api::domain::ports::NoOpUserMetrics;
/// use user_api::outbound::persistence::InMemoryUserStore;
///
/// let service = UserService::new(
///     Arc::new(InMemoryUserStore::new()),
///     Arc::new(NoOpUserMetrics),
/// );
/// # let _ = service;
/// ```
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    metrics: Arc<dyn UserMetrics>,
    store_timeout: Duration,
}

impl UserService {
    /// Upper bound applied to each store call unless overridden.
    pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

    /// Build a service over the given ports.
    pub fn new(store: Arc<dyn UserStore>, metrics: Arc<dyn UserMetrics>) -> Self {
        Self {
            store,
            metrics,
            store_timeout: Self::DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Override the per-call store timeout.
    #[must_use]
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Persist a new user and return its identifier.
    ///
    /// The created counter is bumped after a successful insert. A counter
    /// failure is logged and otherwise ignored; the record stays persisted.
    ///
    /// # Errors
    /// Returns an internal error when the store fails or times out.
    pub async fn create_user(&self, user: User) -> Result<UserId, Error> {
        let id = self
            .bounded(self.store.insert(&user))
            .await
            .map_err(|err| map_store_error("insert", &err))?;

        if let Err(err) = self.metrics.increment(UserCounter::Created).await {
            warn!(error = %err, counter = %UserCounter::Created, "counter increment failed");
        }
        debug!(user_id = %id, "user created");
        Ok(id)
    }

    /// Fetch a user by identifier text.
    ///
    /// # Errors
    /// - [`crate::domain::ErrorCode::InvalidRequest`] when `raw_id` is not a
    ///   well-formed identifier for the store.
    /// - [`crate::domain::ErrorCode::NotFound`] when no record exists.
    /// - [`crate::domain::ErrorCode::InternalError`] on store failure.
    pub async fn get_user(&self, raw_id: &str) -> Result<UserRecord, Error> {
        let id = self.store.parse_id(raw_id).map_err(|err| {
            debug!(reason = err.reason(), "rejected user id");
            Error::invalid_request(INVALID_USER_ID_MESSAGE)
        })?;

        self.bounded(self.store.find_by_id(&id))
            .await
            .map_err(|err| map_store_error("find_by_id", &err))?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND_MESSAGE))
    }

    /// Snapshot the metrics sink.
    ///
    /// # Errors
    /// Returns an internal error when the sink cannot encode its snapshot.
    pub async fn export_metrics(&self) -> Result<MetricsExport, Error> {
        self.metrics.export().await.map_err(|err| {
            error!(error = %err, "metrics export failed");
            Error::internal(INTERNAL_ERROR_MESSAGE)
        })
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, UserStoreError>
    where
        F: Future<Output = Result<T, UserStoreError>>,
    {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(UserStoreError::timeout(
                u64::try_from(self.store_timeout.as_millis()).unwrap_or(u64::MAX),
            )),
        }
    }
}

fn map_store_error(operation: &'static str, err: &UserStoreError) -> Error {
    error!(operation, error = %err, "user store call failed");
    Error::internal(INTERNAL_ERROR_MESSAGE)
}
