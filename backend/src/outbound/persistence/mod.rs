//! Persistence adapters implementing the [`crate::domain::ports::UserStore`]
//! port.
//!
//! [`DieselUserStore`] keeps users in PostgreSQL. [`InMemoryUserStore`] is
//! the test double and the fallback when no database is configured.
//! [`UserStoreHandle`] owns whichever one the process opened.

mod diesel_user_store;
mod memory_user_store;
mod models;
mod object_id;
mod pool;
mod schema;
mod store_handle;

pub use diesel_user_store::DieselUserStore;
pub use memory_user_store::InMemoryUserStore;
pub use object_id::{ObjectId, ObjectIdError, ObjectIdGenerator};
pub use pool::{DbPool, PoolConfig, PoolError};
pub use store_handle::{StoreShutdown, UserStoreHandle};
