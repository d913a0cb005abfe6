//! PostgreSQL user store behaviour against a live database.
//!
//! Set `USER_API_TEST_DATABASE_URL` to a disposable database to run these
//! tests; without it they print a skip marker and pass.

use std::time::Duration;

use rstest::rstest;

use user_api::domain::User;
use user_api::outbound::persistence::{PoolConfig, StoreShutdown, UserStoreHandle};

const DATABASE_URL_ENV: &str = "USER_API_TEST_DATABASE_URL";

fn pool_config() -> Option<PoolConfig> {
    match std::env::var(DATABASE_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => Some(
            PoolConfig::new(url.trim())
                .with_max_size(4)
                .with_min_idle(Some(1))
                .with_connection_timeout(Duration::from_secs(5)),
        ),
        _ => {
            eprintln!("SKIP-TEST-DATABASE: {DATABASE_URL_ENV} is not set");
            None
        }
    }
}

async fn open(config: PoolConfig) -> UserStoreHandle {
    UserStoreHandle::open(Some(config))
        .await
        .expect("postgres store opens")
}

#[rstest]
#[tokio::test]
async fn records_survive_reopening_the_store() {
    let Some(config) = pool_config() else {
        return;
    };

    let first = open(config.clone()).await;
    assert_eq!(first.backend(), "postgres");
    let id = first
        .port()
        .insert(&User::new("alice", "a@x.com"))
        .await
        .expect("insert succeeds");
    assert_eq!(first.close(), StoreShutdown::Closed);

    let second = open(config).await;
    let record = second
        .port()
        .find_by_id(&id)
        .await
        .expect("lookup succeeds")
        .expect("record persisted across reopen");
    assert_eq!(record.id(), &id);
    assert_eq!(record.user(), &User::new("alice", "a@x.com"));
    assert_eq!(second.close(), StoreShutdown::Closed);
}

#[rstest]
#[tokio::test]
async fn identical_inserts_get_distinct_rows() {
    let Some(config) = pool_config() else {
        return;
    };

    let handle = open(config).await;
    let store = handle.port();
    let user = User::new("bob", "b@x.com");
    let first = store.insert(&user).await.expect("first insert");
    let second = store.insert(&user).await.expect("second insert");
    assert_ne!(first, second);
    drop(store);
    assert_eq!(handle.close(), StoreShutdown::Closed);
}

#[rstest]
#[tokio::test]
async fn unissued_identifier_is_absent() {
    let Some(config) = pool_config() else {
        return;
    };

    let handle = open(config).await;
    let store = handle.port();
    let id = store
        .parse_id("FFFFFFFFFFFFFFFFFFFFFFFF")
        .expect("well-formed id");
    assert!(store.find_by_id(&id).await.expect("lookup").is_none());
    drop(store);
    assert_eq!(handle.close(), StoreShutdown::Closed);
}
