//! User data model.
//!
//! [`User`] is the unpersisted shape accepted by the create operation.
//! [`UserRecord`] is what the store hands back once an identifier has been
//! assigned. Neither type validates content beyond shape; `email` is an
//! arbitrary string.

use std::fmt;

/// Opaque store-assigned user identifier.
///
/// The domain only ever sees the textual rendering. Stores construct values
/// through [`UserId::new`] after validating text against their own
/// identifier scheme (see [`crate::domain::ports::UserStore::parse_id`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Wrap an identifier rendered by a store.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// User attributes supplied at creation time.
///
/// # Examples
/// ```
/// use user_api::domain::User;
///
/// let user = User::new("alice", "a@x.com");
/// assert_eq!(user.username(), "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    username: String,
    email: String,
}

impl User {
    /// Build a user from its attributes.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }

    /// Login-style handle chosen by the user.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Contact address; not format-checked.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}

/// A persisted user together with its assigned identifier.
///
/// ## Invariants
/// - `id` is assigned exactly once by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    id: UserId,
    user: User,
}

impl UserRecord {
    /// Pair a stored user with its identifier.
    pub fn new(id: UserId, user: User) -> Self {
        Self { id, user }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Stored attributes.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Split the record into its parts.
    pub fn into_parts(self) -> (UserId, User) {
        (self.id, self.user)
    }
}
