//! In-process user store keyed by [`ObjectId`].
//!
//! Documents live in a `tokio` read-write lock so concurrent requests can
//! read in parallel while inserts take a short exclusive hold. The store's
//! native identifiers are rendered to text before they reach the domain.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::DefaultClock;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{InvalidUserIdError, UserStore, UserStoreError};
use crate::domain::{User, UserId, UserRecord};

use super::object_id::{ObjectId, ObjectIdGenerator};

#[derive(Debug, Clone)]
struct UserDocument {
    username: String,
    email: String,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            username: user.username().to_owned(),
            email: user.email().to_owned(),
        }
    }
}

impl UserDocument {
    fn into_record(self, id: ObjectId) -> UserRecord {
        UserRecord::new(UserId::new(id.to_hex()), User::new(self.username, self.email))
    }
}

/// Thread-safe in-memory [`UserStore`].
///
/// # Examples
/// ```
/// use user_api::domain::ports::UserStore;
/// use user_api::outbound::persistence::InMemoryUserStore;
///
/// let store = InMemoryUserStore::new();
/// assert!(store.parse_id("not-a-valid-id").is_err());
/// ```
pub struct InMemoryUserStore {
    ids: ObjectIdGenerator,
    documents: RwLock<HashMap<ObjectId, UserDocument>>,
}

impl InMemoryUserStore {
    /// Create an empty store stamping identifiers with the system clock.
    pub fn new() -> Self {
        Self::with_generator(ObjectIdGenerator::new(Arc::new(DefaultClock)))
    }

    /// Create an empty store using the supplied identifier generator.
    pub fn with_generator(ids: ObjectIdGenerator) -> Self {
        Self {
            ids,
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether the store holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: &User) -> Result<UserId, UserStoreError> {
        let id = self.ids.generate();
        let mut documents = self.documents.write().await;
        match documents.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(UserDocument::from(user));
            }
            Entry::Occupied(_) => {
                return Err(UserStoreError::write(format!(
                    "identifier {id} is already assigned"
                )));
            }
        }
        debug!(user_id = %id, "user document inserted");
        Ok(UserId::new(id.to_hex()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, UserStoreError> {
        let object_id =
            ObjectId::parse_str(id.as_str()).map_err(|err| UserStoreError::query(err.to_string()))?;
        let documents = self.documents.read().await;
        Ok(documents
            .get(&object_id)
            .cloned()
            .map(|document| document.into_record(object_id)))
    }

    fn parse_id(&self, text: &str) -> Result<UserId, InvalidUserIdError> {
        ObjectId::parse_str(text)
            .map(|object_id| UserId::new(object_id.to_hex()))
            .map_err(|err| InvalidUserIdError::new(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mockable::MockClock;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryUserStore {
        InMemoryUserStore::new()
    }

    #[rstest]
    #[tokio::test]
    async fn insert_then_find_round_trips_attributes(store: InMemoryUserStore) {
        let id = store
            .insert(&User::new("alice", "a@x.com"))
            .await
            .expect("insert succeeds");
        assert_eq!(id.as_str().len(), ObjectId::HEX_LEN);

        let record = store
            .find_by_id(&id)
            .await
            .expect("lookup succeeds")
            .expect("record present");
        assert_eq!(record.id(), &id);
        assert_eq!(record.user().username(), "alice");
        assert_eq!(record.user().email(), "a@x.com");
    }

    #[rstest]
    #[tokio::test]
    async fn identical_inserts_get_distinct_ids(store: InMemoryUserStore) {
        let user = User::new("bob", "b@x.com");
        let first = store.insert(&user).await.expect("first insert");
        let second = store.insert(&user).await.expect("second insert");
        assert_ne!(first, second);
        assert_eq!(store.len().await, 2);
    }

    #[rstest]
    #[tokio::test]
    async fn unissued_id_is_absent(store: InMemoryUserStore) {
        let id = store
            .parse_id("ffffffffffffffffffffffff")
            .expect("well-formed id");
        assert!(store.find_by_id(&id).await.expect("lookup").is_none());
        assert!(store.is_empty().await);
    }

    #[rstest]
    #[case("not-a-valid-id")]
    #[case("65a1f0c2e4b0a1b2c3d4e5f")]
    #[case("65a1f0c2e4b0a1b2c3d4e5fg")]
    fn parse_id_rejects_malformed_text(store: InMemoryUserStore, #[case] text: &str) {
        assert!(store.parse_id(text).is_err());
    }

    #[rstest]
    fn parse_id_normalises_case(store: InMemoryUserStore) {
        let id = store
            .parse_id("65A1F0C2E4B0A1B2C3D4E5F6")
            .expect("upper-case hex accepted");
        assert_eq!(id.as_str(), "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[rstest]
    #[tokio::test]
    async fn colliding_generator_reports_write_failure() {
        let mut clock = MockClock::new();
        let now = Utc
            .timestamp_opt(1_705_000_000, 0)
            .single()
            .expect("valid timestamp");
        clock.expect_utc().return_const(now);
        let clock: Arc<dyn mockable::Clock + Send + Sync> = Arc::new(clock);
        let generator = ObjectIdGenerator::with_seed(clock.clone(), [7; 5], 0);
        let store = InMemoryUserStore::with_generator(generator);
        let user = User::new("carol", "c@x.com");
        let existing = ObjectIdGenerator::with_seed(clock, [7; 5], 0).generate();
        store
            .documents
            .write()
            .await
            .insert(existing, UserDocument::from(&user));

        let err = store.insert(&user).await.expect_err("collision detected");
        assert!(matches!(err, UserStoreError::Write { .. }));
    }
}
