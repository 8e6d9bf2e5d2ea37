use actix_web::test;
use serde_json::json;

use crate::common::{assert_problem, json_body};
use crate::support::create_test_app;
use crate::support::test_state::{bearer, demo_identity, memory_state};

#[actix_web::test]
async fn holdings_are_paginated() {
    let state = memory_state().await;
    let auth = bearer(&state, &demo_identity());
    let app = create_test_app(state).with_prod_routes().build().await;

    for i in 1..=15 {
        let req = test::TestRequest::post()
            .uri("/api/shares")
            .insert_header(auth.clone())
            .set_json(json!({ "share_type": "ordinary", "quantity": i, "unit_price": 100.0 }))
            .to_request();
        json_body(test::call_service(&app, req).await, 201).await;
    }

    let req = test::TestRequest::get()
        .uri("/api/shares?page=2&limit=10")
        .insert_header(auth.clone())
        .to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 5);
    assert_eq!(
        body["pagination"],
        json!({ "total": 15, "totalPages": 2, "currentPage": 2, "limit": 10 })
    );
    assert_eq!(body["degraded"], false);

    let req = test::TestRequest::get()
        .uri("/api/shares?page=3&limit=10")
        .insert_header(auth.clone())
        .to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert!(body["items"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["total"], 15);

    let req = test::TestRequest::get()
        .uri("/api/shares")
        .insert_header(auth)
        .to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 10);
    assert_eq!(body["pagination"]["currentPage"], 1);
}

#[actix_web::test]
async fn create_update_summarise_and_delete() {
    let state = memory_state().await;
    let auth = bearer(&state, &demo_identity());
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/shares")
        .insert_header(auth.clone())
        .set_json(json!({
            "share_type": "Preferred",
            "quantity": 10,
            "unit_price": 250.5,
            "certificate_number": "CERT-001",
            "acquired_at": "2024-03-01T09:00:00Z"
        }))
        .to_request();
    let share = json_body(test::call_service(&app, req).await, 201).await;
    assert_eq!(share["share_type"], "preferred");
    assert_eq!(share["acquired_at"], "2024-03-01T09:00:00Z");
    let id = share["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/shares")
        .insert_header(auth.clone())
        .set_json(json!({ "share_type": "ordinary", "quantity": 4, "unit_price": 100.0 }))
        .to_request();
    json_body(test::call_service(&app, req).await, 201).await;

    let req = test::TestRequest::get()
        .uri("/api/shares/summary")
        .insert_header(auth.clone())
        .to_request();
    let summary = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(summary["holdings"], 2);
    assert_eq!(summary["total_quantity"], 14);
    assert_eq!(summary["total_value"], 2905.0);
    assert_eq!(summary["degraded"], false);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/shares/{id}"))
        .insert_header(auth.clone())
        .set_json(json!({ "quantity": 12, "certificate_number": null }))
        .to_request();
    let updated = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(updated["quantity"], 12);
    assert_eq!(updated["certificate_number"], serde_json::Value::Null);
    assert_eq!(updated["share_type"], "preferred");

    let req = test::TestRequest::patch()
        .uri(&format!("/api/shares/{id}"))
        .insert_header(auth.clone())
        .set_json(json!({ "share_type": "golden" }))
        .to_request();
    assert_problem(test::call_service(&app, req).await, 400, "VALIDATION_ERROR").await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/shares/{id}"))
        .insert_header(auth.clone())
        .to_request();
    assert_eq!(
        json_body(test::call_service(&app, req).await, 200).await,
        json!({ "success": true })
    );

    let req = test::TestRequest::delete()
        .uri(&format!("/api/shares/{id}"))
        .insert_header(auth)
        .to_request();
    assert_problem(test::call_service(&app, req).await, 404, "SHARE_NOT_FOUND").await;
}

#[actix_web::test]
async fn invalid_holdings_are_rejected() {
    let state = memory_state().await;
    let auth = bearer(&state, &demo_identity());
    let app = create_test_app(state).with_prod_routes().build().await;

    for body in [
        json!({ "quantity": 1, "unit_price": 1.0 }),
        json!({ "share_type": "ordinary", "unit_price": 1.0 }),
        json!({ "share_type": "ordinary", "quantity": -5, "unit_price": 1.0 }),
        json!({ "share_type": "ordinary", "quantity": 5, "unit_price": -1.0 }),
        json!({ "share_type": "ordinary", "quantity": 5 }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/shares")
            .insert_header(auth.clone())
            .set_json(body)
            .to_request();
        assert_problem(test::call_service(&app, req).await, 400, "VALIDATION_ERROR").await;
    }
}
