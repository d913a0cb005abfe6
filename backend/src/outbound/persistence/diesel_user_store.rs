//! PostgreSQL-backed [`UserStore`] built on Diesel.
//!
//! Identifiers are generated client-side as [`ObjectId`]s and stored as
//! lowercase hex, so the wire format matches the in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::DefaultClock;
use tracing::debug;

use crate::domain::ports::{InvalidUserIdError, UserStore, UserStoreError};
use crate::domain::{User, UserId, UserRecord};

use super::models::{NewUserRow, UserRow};
use super::object_id::{ObjectId, ObjectIdGenerator};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Idempotent schema script, shared with the diesel CLI migrations.
const SCHEMA_SQL: &str = include_str!("../../../migrations/2026-10-19-000000_create_users/up.sql");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Schema,
    Insert,
    Find,
}

fn map_pool_error(error: PoolError) -> UserStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserStoreError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error, operation: Operation) -> UserStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, ?operation, message = info.message(), "diesel operation failed");
        }
        _ => debug!(?operation, error = %error, "diesel operation failed"),
    }

    match (error, operation) {
        (DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _), _) => {
            UserStoreError::connection("database connection closed")
        }
        (DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _), _) => {
            UserStoreError::write("identifier already assigned")
        }
        (_, Operation::Insert) => UserStoreError::write("database error"),
        (_, Operation::Schema) => UserStoreError::query("schema bootstrap failed"),
        (_, Operation::Find) => UserStoreError::query("database error"),
    }
}

fn row_to_record(row: UserRow) -> UserRecord {
    UserRecord::new(UserId::new(row.id), User::new(row.username, row.email))
}

/// Diesel-backed implementation of the [`UserStore`] port.
pub struct DieselUserStore {
    pool: DbPool,
    ids: ObjectIdGenerator,
}

impl DieselUserStore {
    /// Store over `pool`, stamping identifiers with the system clock.
    pub fn new(pool: DbPool) -> Self {
        Self::with_generator(pool, ObjectIdGenerator::new(Arc::new(DefaultClock)))
    }

    /// Store over `pool` using the supplied identifier generator.
    pub fn with_generator(pool: DbPool, ids: ObjectIdGenerator) -> Self {
        Self { pool, ids }
    }

    /// Create the `users` table if it does not exist yet.
    ///
    /// # Errors
    /// Returns a connection error when no connection can be checked out and
    /// a query error when the script fails.
    pub async fn ensure_schema(&self) -> Result<(), UserStoreError> {
        use diesel_async::SimpleAsyncConnection;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.batch_execute(SCHEMA_SQL)
            .await
            .map_err(|err| map_diesel_error(err, Operation::Schema))
    }

    /// Release the pool and its connections.
    pub fn close(self) {
        self.pool.close();
    }
}

#[async_trait]
impl UserStore for DieselUserStore {
    async fn insert(&self, user: &User) -> Result<UserId, UserStoreError> {
        let id = self.ids.generate().to_hex();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserRow {
            id: &id,
            username: user.username(),
            email: user.email(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Operation::Insert))?;

        debug!(user_id = %id, "user row inserted");
        Ok(UserId::new(id))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, Operation::Find))?;

        Ok(row.map(row_to_record))
    }

    fn parse_id(&self, text: &str) -> Result<UserId, InvalidUserIdError> {
        ObjectId::parse_str(text)
            .map(|object_id| UserId::new(object_id.to_hex()))
            .map_err(|err| InvalidUserIdError::new(err.to_string()))
    }
}
