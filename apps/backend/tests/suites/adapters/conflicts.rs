use portal_backend::adapters::events_sea;
use portal_backend::errors::domain::{ConflictKind, DomainError};
use portal_backend::infra::db_errors::map_db_err;
use portal_backend::repos::exchange_rates::{self, RateUpsert};
use portal_backend::repos::profiles::{self, ProfileCreate};
use portal_backend::repos::users::{self, UserCreate};

use crate::support::factory::{seed_event, seed_rate, seed_user};
use crate::support::test_state::memory_state;

fn conflict_kind(err: DomainError) -> ConflictKind {
    match err {
        DomainError::Conflict(kind, _) => kind,
        other => panic!("expected a conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn duplicate_registration_maps_to_already_registered() {
    let state = memory_state().await;
    let db = state.db().unwrap();
    let event = seed_event(db, "AGM", 3, None).await;

    events_sea::insert_registration(db, &event.id, "user-1").await.unwrap();
    let err = events_sea::insert_registration(db, &event.id, "user-1")
        .await
        .unwrap_err();
    assert_eq!(conflict_kind(map_db_err(err)), ConflictKind::AlreadyRegistered);
}

#[tokio::test]
async fn duplicate_profile_maps_to_profile_exists() {
    let state = memory_state().await;
    let db = state.db().unwrap();
    let dto = ProfileCreate {
        user_id: "user-1".into(),
        full_name: "Abebe Kebede".into(),
        phone: None,
        address: None,
        city: None,
        country: None,
    };

    profiles::create(db, dto.clone()).await.unwrap();
    let err = profiles::create(db, dto).await.unwrap_err();
    assert_eq!(conflict_kind(err), ConflictKind::ProfileExists);
}

#[tokio::test]
async fn duplicate_email_maps_to_unique_email() {
    let state = memory_state().await;
    let db = state.db().unwrap();
    seed_user(db, "user-a", "same@example.com", "pw-one").await;

    let err = users::create(
        db,
        UserCreate {
            id: "user-b".into(),
            email: "same@example.com".into(),
            name: "Other".into(),
            password_hash: "x".into(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(conflict_kind(err), ConflictKind::UniqueEmail);
}

#[tokio::test]
async fn ensuring_an_existing_user_is_a_no_op() {
    let state = memory_state().await;
    let db = state.db().unwrap();
    let dto = UserCreate {
        id: "user-9".into(),
        email: "nine@example.com".into(),
        name: "Nine".into(),
        password_hash: "hash".into(),
    };

    assert!(users::ensure(db, dto.clone()).await.unwrap());
    assert!(!users::ensure(db, dto).await.unwrap());
}

#[tokio::test]
async fn upsert_overwrites_by_currency_code() {
    let state = memory_state().await;
    let db = state.db().unwrap();
    seed_rate(db, "usd", 55.0).await;

    let updated = exchange_rates::upsert(
        db,
        RateUpsert {
            currency_code: "USD".into(),
            currency_name: "US Dollar".into(),
            buying_rate: 57.25,
            selling_rate: 58.4,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.currency_code, "USD");
    assert_eq!(updated.buying_rate, 57.25);

    let page = exchange_rates::page(db, portal_backend::PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.items[0].currency_name, "US Dollar");
}
