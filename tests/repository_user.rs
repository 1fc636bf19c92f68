//! PostgreSQL repository tests.
//!
//! These need a running PostgreSQL server reachable through `DATABASE_URL`;
//! run them with `cargo test -- --ignored`.

use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;
use user_registry::domain::entities::NewUser;
use user_registry::domain::repositories::UserRepository;
use user_registry::error::AppError;
use user_registry::infrastructure::persistence::PgUserRepository;

fn repo(pool: PgPool) -> PgUserRepository {
    PgUserRepository::new(Arc::new(pool))
}

fn new_user(cin: &str) -> NewUser {
    NewUser {
        name: "Integration User".to_string(),
        cin: cin.to_string(),
        cin_release_date: NaiveDate::from_ymd_opt(2022, 5, 10).unwrap(),
        is_married: true,
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_assigns_id(pool: PgPool) {
    let repo = repo(pool);

    let user = repo.create(new_user("12345678")).await.unwrap();

    assert!(user.id > 0);
    assert_eq!(user.name, "Integration User");
    assert_eq!(user.cin, "12345678");
    assert_eq!(
        user.cin_release_date,
        NaiveDate::from_ymd_opt(2022, 5, 10).unwrap()
    );
    assert!(user.is_married);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_unique_constraint_maps_to_conflict(pool: PgPool) {
    let repo = repo(pool);

    repo.create(new_user("12345678")).await.unwrap();
    let result = repo.create(new_user("12345678")).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_cin(pool: PgPool) {
    let repo = repo(pool);

    let created = repo.create(new_user("11112222")).await.unwrap();

    let found = repo.find_by_cin("11112222").await.unwrap();
    assert_eq!(found, Some(created));

    assert!(repo.find_by_cin("99998888").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_cin_and_release_date(pool: PgPool) {
    let repo = repo(pool);

    let created = repo.create(new_user("11112222")).await.unwrap();

    let found = repo
        .find_by_cin_and_release_date("11112222", NaiveDate::from_ymd_opt(2022, 5, 10).unwrap())
        .await
        .unwrap();
    assert_eq!(found, Some(created));

    let other_date = repo
        .find_by_cin_and_release_date("11112222", NaiveDate::from_ymd_opt(2021, 5, 10).unwrap())
        .await
        .unwrap();
    assert!(other_date.is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_count(pool: PgPool) {
    let repo = repo(pool);

    assert_eq!(repo.count().await.unwrap(), 0);

    repo.create(new_user("11111111")).await.unwrap();
    repo.create(new_user("22222222")).await.unwrap();

    assert_eq!(repo.count().await.unwrap(), 2);
}
