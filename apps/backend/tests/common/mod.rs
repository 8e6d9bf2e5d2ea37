#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::{assert_problem_details_from_parts, ProblemDetailsLike};
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Consume a problem response and check the error contract.
pub async fn assert_problem(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
) -> ProblemDetailsLike {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        expected_code,
        StatusCode::from_u16(expected_status).expect("valid status"),
        None,
    )
}

/// Read a JSON body after asserting the status.
pub async fn json_body(resp: ServiceResponse<BoxBody>, expected_status: u16) -> Value {
    assert_eq!(resp.status().as_u16(), expected_status, "unexpected status");
    test::read_body_json(resp).await
}
