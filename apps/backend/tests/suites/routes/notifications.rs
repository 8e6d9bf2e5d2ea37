use actix_web::test;
use serde_json::{json, Value};

use crate::common::{assert_problem, json_body};
use crate::support::create_test_app;
use crate::support::test_state::{bearer, demo_identity, memory_state};

#[actix_web::test]
async fn notification_flow() {
    let state = memory_state().await;
    let auth = bearer(&state, &demo_identity());
    let app = create_test_app(state).with_prod_routes().build().await;

    let mut ids = Vec::new();
    for (title, kind) in [
        ("Dividend paid", Value::Null),
        ("AGM", json!("Warning")),
        ("Reminder", json!("success")),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/notifications")
            .insert_header(auth.clone())
            .set_json(json!({ "title": title, "message": format!("{title} body"), "kind": kind }))
            .to_request();
        let created = json_body(test::call_service(&app, req).await, 201).await;
        assert_eq!(created["is_read"], false);
        ids.push(created["id"].as_str().unwrap().to_string());
    }

    let req = test::TestRequest::post()
        .uri("/api/notifications")
        .insert_header(auth.clone())
        .set_json(json!({ "title": "x", "message": "y", "kind": "urgent" }))
        .to_request();
    assert_problem(test::call_service(&app, req).await, 400, "VALIDATION_ERROR").await;

    let unread = |app_auth: (&'static str, String)| {
        test::TestRequest::get()
            .uri("/api/notifications/unread-count")
            .insert_header(app_auth)
            .to_request()
    };
    let body = json_body(test::call_service(&app, unread(auth.clone())).await, 200).await;
    assert_eq!(body, json!({ "count": 3, "degraded": false }));

    let req = test::TestRequest::patch()
        .uri(&format!("/api/notifications/{}", ids[0]))
        .insert_header(auth.clone())
        .set_json(json!({ "is_read": true }))
        .to_request();
    let updated = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(updated["is_read"], true);
    assert_eq!(updated["kind"], "info");

    let req = test::TestRequest::get()
        .uri("/api/notifications?unread_only=true")
        .insert_header(auth.clone())
        .to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body["pagination"]["total"], 2);
    assert!(body["items"]
        .as_array()
        .unwrap()
        .iter()
        .all(|n| n["is_read"] == false));

    let req = test::TestRequest::post()
        .uri("/api/notifications/read-all")
        .insert_header(auth.clone())
        .to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body, json!({ "success": true, "updated": 2 }));

    let body = json_body(test::call_service(&app, unread(auth.clone())).await, 200).await;
    assert_eq!(body["count"], 0);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/notifications/{}", ids[1]))
        .insert_header(auth.clone())
        .to_request();
    json_body(test::call_service(&app, req).await, 200).await;

    let req = test::TestRequest::get()
        .uri("/api/notifications")
        .insert_header(auth.clone())
        .to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body["pagination"]["total"], 2);

    let req = test::TestRequest::delete()
        .uri("/api/notifications/does-not-exist")
        .insert_header(auth)
        .to_request();
    assert_problem(test::call_service(&app, req).await, 404, "NOTIFICATION_NOT_FOUND").await;
}
