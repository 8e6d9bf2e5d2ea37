use actix_web::test;
use serde_json::json;

use crate::common::{assert_problem, json_body};
use crate::support::create_test_app;
use crate::support::test_state::{bearer, demo_identity, memory_state};

#[actix_web::test]
async fn profile_lifecycle() {
    let state = memory_state().await;
    let auth = bearer(&state, &demo_identity());
    let app = create_test_app(state).with_prod_routes().build().await;

    let get = || {
        test::TestRequest::get()
            .uri("/api/profile")
            .insert_header(auth.clone())
            .to_request()
    };

    let body = json_body(test::call_service(&app, get()).await, 200).await;
    assert_eq!(body, json!({ "profile": null, "degraded": false }));

    let req = test::TestRequest::post()
        .uri("/api/profile")
        .insert_header(auth.clone())
        .set_json(json!({ "phone": "+251 911 000000" }))
        .to_request();
    assert_problem(test::call_service(&app, req).await, 400, "VALIDATION_ERROR").await;

    let req = test::TestRequest::post()
        .uri("/api/profile")
        .insert_header(auth.clone())
        .set_json(json!({
            "full_name": "Abebe Kebede",
            "phone": "+251 911 000000",
            "city": "Addis Ababa",
            "country": "  "
        }))
        .to_request();
    let created = json_body(test::call_service(&app, req).await, 201).await;
    assert_eq!(created["user_id"], "user-1");
    assert_eq!(created["full_name"], "Abebe Kebede");
    assert_eq!(created["country"], serde_json::Value::Null);

    let req = test::TestRequest::post()
        .uri("/api/profile")
        .insert_header(auth.clone())
        .set_json(json!({ "full_name": "Again" }))
        .to_request();
    assert_problem(test::call_service(&app, req).await, 409, "PROFILE_EXISTS").await;

    // Absent fields are kept, null clears.
    let req = test::TestRequest::patch()
        .uri("/api/profile")
        .insert_header(auth.clone())
        .set_json(json!({ "phone": null, "address": "Bole Road" }))
        .to_request();
    let updated = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(updated["phone"], serde_json::Value::Null);
    assert_eq!(updated["address"], "Bole Road");
    assert_eq!(updated["city"], "Addis Ababa");
    assert_eq!(updated["id"], created["id"]);

    let req = test::TestRequest::patch()
        .uri("/api/profile")
        .insert_header(auth.clone())
        .set_json(json!({ "full_name": "   " }))
        .to_request();
    assert_problem(test::call_service(&app, req).await, 400, "VALIDATION_ERROR").await;

    let body = json_body(test::call_service(&app, get()).await, 200).await;
    assert_eq!(body["profile"]["address"], "Bole Road");

    let req = test::TestRequest::delete()
        .uri("/api/profile")
        .insert_header(auth.clone())
        .to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body, json!({ "success": true }));

    let req = test::TestRequest::delete()
        .uri("/api/profile")
        .insert_header(auth.clone())
        .to_request();
    assert_problem(test::call_service(&app, req).await, 404, "PROFILE_NOT_FOUND").await;

    let req = test::TestRequest::patch()
        .uri("/api/profile")
        .insert_header(auth.clone())
        .set_json(json!({ "city": "Hawassa" }))
        .to_request();
    assert_problem(test::call_service(&app, req).await, 404, "PROFILE_NOT_FOUND").await;
}

#[actix_web::test]
async fn profile_requires_a_session() {
    let app = create_test_app(memory_state().await).with_prod_routes().build().await;
    let req = test::TestRequest::get().uri("/api/profile").to_request();
    assert_problem(test::call_service(&app, req).await, 401, "UNAUTHORIZED").await;
}
