use portal_backend::errors::ErrorCode;
use portal_backend::repos::events as events_repo;
use portal_backend::services::events;
use tempfile::TempDir;

use crate::support::factory::seed_event;
use crate::support::test_state::{file_state, memory_state};

#[tokio::test]
async fn concurrent_registrations_admit_exactly_one() {
    let state = memory_state().await;
    let db = state.db().unwrap().clone();
    let event = seed_event(&db, "Shareholder briefing", 5, None).await;

    let (first, second) = tokio::join!(
        events::register(&state, "user-1", &event.id),
        events::register(&state, "user-1", &event.id),
    );

    let outcomes = [first, second];
    let ok = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(ok, 1);
    let err = outcomes
        .into_iter()
        .find_map(Result::err)
        .expect("one attempt fails");
    assert_eq!(err.code(), ErrorCode::AlreadyRegistered);
    assert_eq!(err.status().as_u16(), 409);

    assert_eq!(events_repo::registration_count(&db, &event.id).await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_registrations_on_a_file_store_conflict_cleanly() {
    // Separate pooled connections, so attempts interleave inside SQLite.
    let dir = TempDir::new().expect("temp dir");
    let state = file_state(&dir.path().join("portal.db")).await;
    let db = state.db().unwrap().clone();

    for round in 0..10 {
        let event = seed_event(&db, &format!("General meeting {round}"), 7, None).await;

        let attempts: Vec<_> = (0..4)
            .map(|_| {
                let state = state.clone();
                let event_id = event.id.clone();
                tokio::spawn(async move { events::register(&state, "user-1", &event_id).await })
            })
            .collect();

        let mut ok = 0;
        for attempt in attempts {
            match attempt.await.expect("task") {
                Ok(_) => ok += 1,
                Err(err) => assert_eq!(
                    err.code(),
                    ErrorCode::AlreadyRegistered,
                    "round {round}: {err:?}"
                ),
            }
        }
        assert_eq!(ok, 1, "round {round}");
        assert_eq!(events_repo::registration_count(&db, &event.id).await.unwrap(), 1);
    }
}

#[tokio::test]
async fn capacity_is_enforced_across_users() {
    let state = memory_state().await;
    let db = state.db().unwrap().clone();
    let event = seed_event(&db, "Branch opening", 2, Some(2)).await;

    for user in ["user-1", "user-2"] {
        events::register(&state, user, &event.id).await.unwrap();
    }
    let err = events::register(&state, "user-3", &event.id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::EventFull);

    events::cancel(&state, "user-2", &event.id).await.unwrap();
    events::register(&state, "user-3", &event.id).await.unwrap();
    assert_eq!(events_repo::registration_count(&db, &event.id).await.unwrap(), 2);
}

#[tokio::test]
async fn zero_capacity_admits_nobody() {
    let state = memory_state().await;
    let db = state.db().unwrap().clone();
    let event = seed_event(&db, "Closed session", 1, Some(0)).await;

    let err = events::register(&state, "user-1", &event.id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::EventFull);
}

#[tokio::test]
async fn failed_registration_leaves_nothing_behind() {
    let state = memory_state().await;
    let db = state.db().unwrap().clone();
    let event = seed_event(&db, "Seminar", 1, Some(1)).await;

    events::register(&state, "user-1", &event.id).await.unwrap();
    events::register(&state, "user-2", &event.id).await.unwrap_err();

    let view = events::get(&state, &event.id, Some("user-2")).await.unwrap();
    assert_eq!(view.registration_count, 1);
    assert_eq!(view.is_registered, Some(false));
}
