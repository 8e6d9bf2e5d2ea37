use actix_web::http::header::SET_COOKIE;
use actix_web::test;
use serde_json::json;

use crate::common::{assert_problem, json_body};
use crate::support::create_test_app;
use crate::support::factory::seed_user;
use crate::support::test_state::{memory_state, memory_state_with_db_credentials};

fn set_cookies(resp: &actix_web::dev::ServiceResponse) -> Vec<String> {
    resp.headers()
        .get_all(SET_COOKIE)
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

#[actix_web::test]
async fn demo_login_sets_both_cookies() {
    let app = create_test_app(memory_state().await).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "abebe@gmail.com", "password": "password123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let cookies = set_cookies(&resp);
    let session = cookies
        .iter()
        .find(|c| c.starts_with("auth-token="))
        .expect("session cookie");
    assert!(session.contains("HttpOnly"));
    assert!(session.contains("SameSite=Lax"));
    assert!(session.contains("Path=/"));
    assert!(session.contains("Max-Age=86400"));
    let marker = cookies
        .iter()
        .find(|c| c.starts_with("is-authenticated=true"))
        .expect("marker cookie");
    assert!(!marker.contains("HttpOnly"));

    let body = json_body(resp, 200).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["id"], "user-1");
    assert_eq!(body["user"]["email"], "abebe@gmail.com");
    assert_eq!(body["user"]["name"], "Abebe Kebede");
}

#[actix_web::test]
async fn email_is_matched_case_insensitively() {
    let app = create_test_app(memory_state().await).with_prod_routes().build().await;
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "  Abebe@Gmail.com ", "password": "password123" }))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body["user"]["id"], "user-1");
}

#[actix_web::test]
async fn wrong_credentials_are_rejected() {
    let app = create_test_app(memory_state().await).with_prod_routes().build().await;

    for (email, password) in [
        ("x", "y"),
        ("abebe@gmail.com", "password124"),
        ("someone@else.com", "password123"),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(set_cookies(&resp).is_empty());
        let problem = assert_problem(resp, 401, "INVALID_CREDENTIALS").await;
        assert_eq!(problem.error, "Invalid email or password");
        assert!(!problem.success);
    }
}

#[actix_web::test]
async fn missing_fields_are_a_bad_request() {
    let app = create_test_app(memory_state().await).with_prod_routes().build().await;

    for body in [
        json!({}),
        json!({ "email": "abebe@gmail.com" }),
        json!({ "password": "password123" }),
        json!({ "email": "  ", "password": "password123" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(body)
            .to_request();
        assert_problem(test::call_service(&app, req).await, 400, "MISSING_CREDENTIALS").await;
    }

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    assert_problem(test::call_service(&app, req).await, 400, "BAD_REQUEST").await;
}

#[actix_web::test]
async fn logout_clears_both_cookies() {
    let app = create_test_app(memory_state().await).with_prod_routes().build().await;
    let req = test::TestRequest::post().uri("/api/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;

    let cookies = set_cookies(&resp);
    assert_eq!(cookies.len(), 2);
    for cookie in &cookies {
        assert!(
            cookie.starts_with("auth-token=;") || cookie.starts_with("is-authenticated=;"),
            "{cookie}"
        );
        assert!(cookie.contains("Max-Age=0"), "{cookie}");
    }
    assert_eq!(json_body(resp, 200).await, json!({ "success": true }));
}

#[actix_web::test]
async fn me_reports_the_session_or_anonymous() {
    let app = create_test_app(memory_state().await).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/auth/me").to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body, json!({ "user": null, "authenticated": false }));

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body["authenticated"], false);

    let login = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "abebe@gmail.com", "password": "password123" }))
        .to_request();
    let resp = test::call_service(&app, login).await;
    let session = resp
        .response()
        .cookies()
        .find(|c| c.name() == "auth-token")
        .expect("session cookie")
        .into_owned();

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .cookie(session)
        .to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["id"], "user-1");
}

#[actix_web::test]
async fn database_store_logs_in_seeded_users() {
    let state = memory_state_with_db_credentials().await;
    seed_user(state.db().unwrap(), "user-2", "tigist@example.com", "s3cret-pass").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "tigist@example.com", "password": "s3cret-pass" }))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body["user"]["id"], "user-2");

    // The demo account is seeded too.
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "abebe@gmail.com", "password": "password123" }))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body["user"]["id"], "user-1");
}
