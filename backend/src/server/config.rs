//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use prometheus::Registry;
use user_api::domain::UserService;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) users: UserService,
    #[cfg(feature = "metrics")]
    pub(crate) registry: Option<Registry>,
}

impl ServerConfig {
    /// Construct a server configuration around the user service.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, users: UserService) -> Self {
        Self {
            bind_addr,
            users,
            #[cfg(feature = "metrics")]
            registry: None,
        }
    }

    /// Registry that request metrics should be recorded on.
    ///
    /// Without the `metrics` feature the registry is only used by the user
    /// counters, so it is ignored here.
    #[must_use]
    pub fn with_registry(self, registry: &Registry) -> Self {
        #[cfg(feature = "metrics")]
        {
            let mut this = self;
            this.registry = Some(registry.clone());
            this
        }
        #[cfg(not(feature = "metrics"))]
        {
            let _ = registry;
            self
        }
    }
}
