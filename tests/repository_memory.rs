mod common;

use alias_registry::domain::entities::NewAlias;
use alias_registry::domain::repositories::AliasRepository;
use alias_registry::error::{RegistryError, RequestError, ValidationError};
use alias_registry::infrastructure::persistence::MemoryAliasRepository;
use chrono::Duration;

use common::start_time;

fn new_alias(code: &str, minutes: u32) -> NewAlias {
    NewAlias::new(
        code.to_string(),
        format!("https://example.com/{code}"),
        minutes,
        start_time(),
    )
}

#[tokio::test]
async fn test_create_batch_assigns_sequential_ids() {
    let repo = MemoryAliasRepository::new();

    let first = repo.create_batch(vec![new_alias("aaa111", 30)]).await.unwrap();
    let second = repo
        .create_batch(vec![new_alias("bbb222", 30), new_alias("ccc333", 30)])
        .await
        .unwrap();

    assert_eq!(first[0].id, 1);
    assert_eq!(second[0].id, 2);
    assert_eq!(second[1].id, 3);
}

#[tokio::test]
async fn test_create_batch_rejects_occupied_code() {
    let repo = MemoryAliasRepository::new();
    repo.create_batch(vec![new_alias("taken1", 30)]).await.unwrap();

    let err = repo
        .create_batch(vec![new_alias("fresh1", 30), new_alias("taken1", 30)])
        .await
        .unwrap_err();

    assert_eq!(
        err,
        RegistryError::Validation(vec![RequestError::new(
            1,
            ValidationError::CodeAlreadyInUse
        )])
    );

    // All or nothing: the fresh code was not inserted either.
    assert!(repo.find_by_code("fresh1").await.unwrap().is_none());
    assert!(!repo.code_occupied("fresh1").await.unwrap());
}

#[tokio::test]
async fn test_create_batch_rejects_duplicate_within_batch() {
    let repo = MemoryAliasRepository::new();

    let err = repo
        .create_batch(vec![new_alias("same11", 30), new_alias("same11", 30)])
        .await
        .unwrap_err();

    assert_eq!(
        err,
        RegistryError::Validation(vec![RequestError::new(
            1,
            ValidationError::CodeAlreadyInUse
        )])
    );
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_find_by_code_is_time_blind() {
    let repo = MemoryAliasRepository::new();
    repo.create_batch(vec![new_alias("stale1", 1)]).await.unwrap();

    // Long past expiry, but the store has not been asked to purge.
    let found = repo.find_by_code("stale1").await.unwrap();
    assert!(found.is_some());
    assert!(found.unwrap().is_expired_at(start_time() + Duration::hours(1)));
}

#[tokio::test]
async fn test_list_newest_first_with_insertion_tiebreak() {
    let repo = MemoryAliasRepository::new();

    let older = NewAlias::new(
        "older1".to_string(),
        "https://example.com/older".to_string(),
        30,
        start_time() - Duration::minutes(10),
    );
    // Two records sharing a timestamp keep their insertion order.
    repo.create_batch(vec![new_alias("tied01", 30), new_alias("tied02", 30), older])
        .await
        .unwrap();

    let listed = repo.list().await.unwrap();
    let codes: Vec<&str> = listed.iter().map(|a| a.code.as_str()).collect();

    assert_eq!(codes, vec!["tied01", "tied02", "older1"]);
}

#[tokio::test]
async fn test_remove_expired_counts_and_frees_codes() {
    let repo = MemoryAliasRepository::new();
    repo.create_batch(vec![
        new_alias("brief1", 1),
        new_alias("brief2", 2),
        new_alias("steady", 60),
    ])
    .await
    .unwrap();

    let removed = repo
        .remove_expired(start_time() + Duration::minutes(5))
        .await
        .unwrap();

    assert_eq!(removed, 2);
    assert!(!repo.code_occupied("brief1").await.unwrap());
    assert!(!repo.code_occupied("brief2").await.unwrap());
    assert!(repo.code_occupied("steady").await.unwrap());

    let again = repo
        .remove_expired(start_time() + Duration::minutes(5))
        .await
        .unwrap();
    assert_eq!(again, 0);
}

#[tokio::test]
async fn test_clear_empties_store() {
    let repo = MemoryAliasRepository::new();
    repo.create_batch(vec![new_alias("abc123", 30), new_alias("def456", 30)])
        .await
        .unwrap();

    repo.clear().await.unwrap();

    assert!(repo.list().await.unwrap().is_empty());
    assert!(!repo.code_occupied("abc123").await.unwrap());

    // The id sequence keeps counting across a clear.
    let created = repo.create_batch(vec![new_alias("abc123", 30)]).await.unwrap();
    assert_eq!(created[0].id, 3);
}
