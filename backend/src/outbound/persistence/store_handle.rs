//! Process-scoped ownership of the configured user store.
//!
//! The handle is opened once at start-up and closed once at shutdown. Closing
//! only releases the backend when no request state still holds the store, and
//! the returned [`StoreShutdown`] says which case occurred.

use std::sync::Arc;

use tracing::info;

use crate::domain::ports::{UserStore, UserStoreError};

use super::diesel_user_store::DieselUserStore;
use super::memory_user_store::InMemoryUserStore;
use super::pool::{DbPool, PoolConfig};

/// What happened when a [`UserStoreHandle`] was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreShutdown {
    /// The connection pool was dropped and its connections closed.
    Closed,
    /// The in-memory documents were dropped.
    Discarded,
    /// Another owner still holds the store; it is released with that owner.
    StillReferenced,
}

/// Owner of the store backing the user service.
pub enum UserStoreHandle {
    /// PostgreSQL via Diesel.
    Postgres(Arc<DieselUserStore>),
    /// Process-local map; contents are lost on exit.
    InMemory(Arc<InMemoryUserStore>),
}

impl UserStoreHandle {
    /// Open the store described by `config`, or an in-memory store when no
    /// database is configured.
    ///
    /// For PostgreSQL the pool is built and the `users` table created if
    /// missing.
    ///
    /// # Errors
    /// Returns a connection error when the pool cannot be built and a query
    /// error when the schema cannot be created.
    pub async fn open(config: Option<PoolConfig>) -> Result<Self, UserStoreError> {
        let Some(config) = config else {
            return Ok(Self::in_memory(InMemoryUserStore::new()));
        };
        let pool = DbPool::new(config)
            .await
            .map_err(|err| UserStoreError::connection(err.to_string()))?;
        let store = DieselUserStore::new(pool);
        store.ensure_schema().await?;
        info!(backend = "postgres", "user store opened");
        Ok(Self::Postgres(Arc::new(store)))
    }

    /// Wrap an existing in-memory store.
    pub fn in_memory(store: InMemoryUserStore) -> Self {
        info!(backend = "memory", "user store opened");
        Self::InMemory(Arc::new(store))
    }

    /// Short backend label for logs.
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::InMemory(_) => "memory",
        }
    }

    /// Shared port for the user service.
    pub fn port(&self) -> Arc<dyn UserStore> {
        match self {
            Self::Postgres(store) => store.clone(),
            Self::InMemory(store) => store.clone(),
        }
    }

    /// Release the store if this handle is its last owner.
    pub fn close(self) -> StoreShutdown {
        match self {
            Self::Postgres(store) => match Arc::try_unwrap(store) {
                Ok(store) => {
                    store.close();
                    StoreShutdown::Closed
                }
                Err(_) => StoreShutdown::StillReferenced,
            },
            Self::InMemory(store) => match Arc::try_unwrap(store) {
                Ok(store) => {
                    drop(store);
                    StoreShutdown::Discarded
                }
                Err(_) => StoreShutdown::StillReferenced,
            },
        }
    }
}
