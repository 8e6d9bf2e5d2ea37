use portal_backend::errors::ErrorCode;
use portal_backend::repos::shares::{self as shares_repo, ShareCreate};
use portal_backend::services::notifications::{self, NewNotification, NotificationPatch};
use portal_backend::services::profiles::{self, NewProfile, ProfilePatch};
use portal_backend::services::shares::{self, NewShare, MAX_QUANTITY};
use portal_backend::PageRequest;
use time::OffsetDateTime;

use crate::support::test_state::memory_state;

fn holding(quantity: i64, unit_price: f64) -> NewShare {
    NewShare {
        share_type: Some("ordinary".into()),
        quantity: Some(quantity),
        unit_price: Some(unit_price),
        ..NewShare::default()
    }
}

#[tokio::test]
async fn summaries_are_per_user() {
    let state = memory_state().await;
    shares::create(&state, "user-1", holding(10, 5.0)).await.unwrap();
    shares::create(&state, "user-1", holding(2, 7.5)).await.unwrap();
    shares::create(&state, "user-2", holding(100, 1.0)).await.unwrap();

    let mine = shares::summary(&state, "user-1").await.unwrap();
    assert_eq!(mine.holdings, 2);
    assert_eq!(mine.total_quantity, 12);
    assert_eq!(mine.total_value, 65.0);
    assert!(!mine.degraded);

    let theirs = shares::list(&state, "user-2", PageRequest::default()).await.unwrap();
    assert_eq!(theirs.pagination.total, 1);
    assert_eq!(theirs.items[0].user_id, "user-2");
}

#[tokio::test]
async fn oversized_quantities_are_rejected() {
    let state = memory_state().await;
    let err = shares::create(&state, "user-1", holding(i64::MAX, 1.0)).await.unwrap_err();
    assert_eq!(err.status().as_u16(), 400);
    assert_eq!(err.code(), ErrorCode::ValidationError);

    shares::create(&state, "user-1", holding(MAX_QUANTITY, 1.0)).await.unwrap();
    shares::create(&state, "user-1", holding(MAX_QUANTITY, 1.0)).await.unwrap();
    let summary = shares::summary(&state, "user-1").await.unwrap();
    assert_eq!(summary.total_quantity, 2 * MAX_QUANTITY);
}

#[tokio::test]
async fn summary_of_overflowing_rows_is_an_error_not_a_panic() {
    let state = memory_state().await;
    let db = state.db().unwrap().clone();
    for _ in 0..2 {
        shares_repo::create(
            &db,
            ShareCreate {
                user_id: "user-1".into(),
                share_type: "ordinary".into(),
                quantity: i64::MAX,
                unit_price: 1.0,
                certificate_number: None,
                acquired_at: OffsetDateTime::now_utc(),
            },
        )
        .await
        .unwrap();
    }

    let err = shares::summary(&state, "user-1").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::DataCorruption);
    assert_eq!(err.status().as_u16(), 500);
}

#[tokio::test]
async fn one_profile_per_user() {
    let state = memory_state().await;
    let input = || NewProfile {
        full_name: Some("Abebe Kebede".into()),
        ..NewProfile::default()
    };

    profiles::create(&state, "user-1", input()).await.unwrap();
    let err = profiles::create(&state, "user-1", input()).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::ProfileExists);

    // Another user is unaffected.
    profiles::create(&state, "user-2", input()).await.unwrap();

    let updated = profiles::update(
        &state,
        "user-1",
        ProfilePatch {
            city: Some(Some("Gondar".into())),
            ..ProfilePatch::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.city.as_deref(), Some("Gondar"));
    assert_eq!(updated.full_name, "Abebe Kebede");
    assert!(updated.updated_at >= updated.created_at);
}

#[tokio::test]
async fn notifications_stay_with_their_owner() {
    let state = memory_state().await;
    let created = notifications::create(
        &state,
        "user-1",
        NewNotification {
            title: Some("Dividend".into()),
            message: Some("Your dividend was paid".into()),
            kind: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(created.kind, "info");

    let err = notifications::update(
        &state,
        "user-2",
        &created.id,
        NotificationPatch {
            is_read: Some(true),
            ..NotificationPatch::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotificationNotFound);

    let err = notifications::delete(&state, "user-2", &created.id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotificationNotFound);

    assert_eq!(notifications::unread_count(&state, "user-1").await.unwrap().count, 1);
    assert_eq!(notifications::mark_all_read(&state, "user-1").await.unwrap(), 1);
    assert_eq!(notifications::mark_all_read(&state, "user-1").await.unwrap(), 0);
}
