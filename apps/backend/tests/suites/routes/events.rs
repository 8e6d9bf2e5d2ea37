use actix_web::test;

use crate::common::{assert_problem, json_body};
use crate::support::create_test_app;
use crate::support::factory::{seed_event, seed_user};
use crate::support::test_state::{bearer, memory_state_with_db_credentials};

#[actix_web::test]
async fn registration_flow() {
    let state = memory_state_with_db_credentials().await;
    let db = state.db().unwrap().clone();
    let alice = seed_user(&db, "user-a", "alice@example.com", "alice-pass").await;
    let bob = seed_user(&db, "user-b", "bob@example.com", "bob-pass").await;
    let agm = seed_event(&db, "Annual General Meeting", 7, Some(1)).await;
    let alice_auth = bearer(&state, &alice);
    let bob_auth = bearer(&state, &bob);
    let app = create_test_app(state).with_prod_routes().build().await;

    let register_uri = format!("/api/events/{}/register", agm.id);

    let req = test::TestRequest::post()
        .uri(&register_uri)
        .insert_header(alice_auth.clone())
        .to_request();
    let registration = json_body(test::call_service(&app, req).await, 201).await;
    assert_eq!(registration["event_id"], agm.id.as_str());
    assert_eq!(registration["user_id"], "user-a");
    assert_eq!(registration["event"]["title"], "Annual General Meeting");

    let req = test::TestRequest::post()
        .uri(&register_uri)
        .insert_header(alice_auth.clone())
        .to_request();
    assert_problem(test::call_service(&app, req).await, 409, "ALREADY_REGISTERED").await;

    let req = test::TestRequest::post()
        .uri(&register_uri)
        .insert_header(bob_auth.clone())
        .to_request();
    assert_problem(test::call_service(&app, req).await, 409, "EVENT_FULL").await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/events/{}", agm.id))
        .insert_header(alice_auth.clone())
        .to_request();
    let view = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(view["registration_count"], 1);
    assert_eq!(view["is_registered"], true);

    let req = test::TestRequest::get()
        .uri(&format!("/api/events/{}", agm.id))
        .to_request();
    let view = json_body(test::call_service(&app, req).await, 200).await;
    assert!(view.get("is_registered").is_none());

    let req = test::TestRequest::get()
        .uri("/api/events/registrations")
        .insert_header(alice_auth.clone())
        .to_request();
    let mine = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(mine["pagination"]["total"], 1);

    let req = test::TestRequest::delete()
        .uri(&register_uri)
        .insert_header(alice_auth.clone())
        .to_request();
    json_body(test::call_service(&app, req).await, 200).await;

    let req = test::TestRequest::delete()
        .uri(&register_uri)
        .insert_header(alice_auth)
        .to_request();
    assert_problem(test::call_service(&app, req).await, 404, "NOT_REGISTERED").await;

    // The freed seat is available again.
    let req = test::TestRequest::post()
        .uri(&register_uri)
        .insert_header(bob_auth)
        .to_request();
    json_body(test::call_service(&app, req).await, 201).await;
}

#[actix_web::test]
async fn listing_filters_upcoming_events() {
    let state = memory_state_with_db_credentials().await;
    let db = state.db().unwrap().clone();
    seed_event(&db, "Past briefing", -3, None).await;
    seed_event(&db, "Next AGM", 10, None).await;
    seed_event(&db, "Investor day", 3, None).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/events").to_request();
    let all = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(all["pagination"]["total"], 3);

    let req = test::TestRequest::get()
        .uri("/api/events?upcoming=true")
        .to_request();
    let upcoming = json_body(test::call_service(&app, req).await, 200).await;
    let titles: Vec<&str> = upcoming["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Investor day", "Next AGM"]);
}

#[actix_web::test]
async fn unknown_events_are_not_found() {
    let state = memory_state_with_db_credentials().await;
    let alice = seed_user(state.db().unwrap(), "user-a", "alice@example.com", "pw-alice").await;
    let auth = bearer(&state, &alice);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/events/nope").to_request();
    assert_problem(test::call_service(&app, req).await, 404, "EVENT_NOT_FOUND").await;

    let req = test::TestRequest::post()
        .uri("/api/events/nope/register")
        .insert_header(auth)
        .to_request();
    assert_problem(test::call_service(&app, req).await, 404, "EVENT_NOT_FOUND").await;
}
