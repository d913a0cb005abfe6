//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data`, so they only depend
//! on the domain service and stay testable against in-memory adapters.

use crate::domain::UserService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User use-cases backed by the configured store and metrics sink.
    pub users: UserService,
}

impl HttpState {
    /// Construct state around the user service.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use user_api::domain::UserService;
    /// use user_api::domain::ports::NoOpUserMetrics;
    /// use user_api::inbound::http::state::HttpState;
    /// use user_api::outbound::persistence::InMemoryUserStore;
    ///
    /// let service = UserService::new(
    ///     Arc::new(InMemoryUserStore::new()),
    ///     Arc::new(NoOpUserMetrics),
    /// );
    /// let state = HttpState::new(service);
    /// let _users = state.users.clone();
    /// ```
    pub fn new(users: UserService) -> Self {
        Self { users }
    }
}
