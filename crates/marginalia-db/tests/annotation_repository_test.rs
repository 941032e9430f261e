//! Integration tests for the MySQL annotation repository.
//!
//! These require a running MySQL instance with the migrations applied.
//! Set DATABASE_URL or use the default test fixture URL.

use marginalia_db::test_fixtures::{create_test_annotation, TEST_LOCATOR_PREFIX};
use marginalia_db::{AnnotationRepository, Database, Error};

async fn test_db() -> Database {
    dotenvy::dotenv().ok();
    Database::connect_for_tests()
        .await
        .expect("test database should be reachable")
}

fn unique_locator(name: &str) -> String {
    format!(
        "{}/{}-{}",
        TEST_LOCATOR_PREFIX,
        name,
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    )
}

#[tokio::test]
#[ignore] // Requires database connection
async fn test_create_and_list_round_trip() {
    let db = test_db().await;
    let locator = unique_locator("round-trip");

    let id = db
        .annotations
        .create(&locator, "the quick brown fox", "classic pangram")
        .await
        .unwrap();
    assert!(id > 0);

    let listed = db.annotations.list(&locator).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].quote, "the quick brown fox");
    assert_eq!(listed[0].comment, "classic pangram");
    assert_eq!(listed[0].locator, locator);

    db.annotations.delete(id).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires database connection
async fn test_list_is_scoped_and_newest_first() {
    let db = test_db().await;
    let locator_a = unique_locator("scope-a");
    let locator_b = unique_locator("scope-b");

    let first = db
        .annotations
        .create(&locator_a, "older quote", "c")
        .await
        .unwrap();
    let second = db
        .annotations
        .create(&locator_a, "newer quote", "c")
        .await
        .unwrap();
    let other = db
        .annotations
        .create(&locator_b, "unrelated", "c")
        .await
        .unwrap();

    let listed = db.annotations.list(&locator_a).await.unwrap();
    assert_eq!(listed.len(), 2);
    // Same-second inserts fall back to id ordering, still newest first.
    assert_eq!(listed[0].id, second);
    assert_eq!(listed[1].id, first);
    assert!(listed.iter().all(|a| a.locator == locator_a));

    for id in [first, second, other] {
        db.annotations.delete(id).await.unwrap();
    }
}

#[tokio::test]
#[ignore] // Requires database connection
async fn test_create_rejects_empty_fields() {
    let db = test_db().await;
    let locator = unique_locator("validation");

    let err = db.annotations.create(&locator, "", "comment").await;
    assert!(matches!(err, Err(Error::Validation(_))));

    let err = db.annotations.create(&locator, "quote", "   ").await;
    assert!(matches!(err, Err(Error::Validation(_))));

    assert!(db.annotations.list(&locator).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore] // Requires database connection
async fn test_delete_unknown_id_is_not_found() {
    let db = test_db().await;
    match db.annotations.delete(i64::MAX).await {
        Err(Error::AnnotationNotFound(id)) => assert_eq!(id, i64::MAX),
        other => panic!("Expected AnnotationNotFound, got {:?}", other),
    }
}

#[tokio::test]
#[ignore] // Requires database connection
async fn test_fixture_helper_returns_stored_record() {
    let db = test_db().await;
    let ann = create_test_annotation(&db.annotations, "/fixture", "fixture quote")
        .await
        .unwrap();
    assert_eq!(ann.quote, "fixture quote");
    assert!(ann.locator.starts_with(TEST_LOCATOR_PREFIX));

    db.annotations.delete(ann.id).await.unwrap();
}
