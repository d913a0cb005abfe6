//! Diesel row structs for the `users` table.
//!
//! These stay inside the persistence layer; the domain only sees
//! [`crate::domain::UserRecord`].

use diesel::prelude::*;

use super::schema::users;

/// Row read back from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Insertable row for a newly created user.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub username: &'a str,
    pub email: &'a str,
}
