use actix_web::test;

use crate::common::json_body;
use crate::support::create_test_app;
use crate::support::test_state::{degraded_state, memory_state};

#[actix_web::test]
async fn root_serves_a_plain_banner() {
    let app = create_test_app(memory_state().await).with_prod_routes().build().await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("text/plain")));
    let body = test::read_body(resp).await;
    assert_eq!(body.as_ref(), b"Shareholder Portal API");
}

#[actix_web::test]
async fn health_reports_the_store_and_migration() {
    let app = create_test_app(memory_state().await).with_prod_routes().build().await;
    let req = test::TestRequest::get().uri("/health").to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert!(body["migration"].as_str().is_some_and(|m| m.starts_with('m')));
    assert!(body["time"].as_str().is_some());
}

#[actix_web::test]
async fn health_stays_up_without_a_store() {
    let app = create_test_app(degraded_state().await).with_prod_routes().build().await;
    let req = test::TestRequest::get().uri("/health").to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;

    assert_eq!(body["status"], "degraded");
    assert_eq!(body["db"], "unavailable");
    assert!(body.get("migration").is_none());
}
