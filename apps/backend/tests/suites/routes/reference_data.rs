use actix_web::test;

use crate::common::{assert_problem, json_body};
use crate::support::create_test_app;
use crate::support::factory::{seed_entry, seed_rate};
use crate::support::test_state::memory_state;

#[actix_web::test]
async fn exchange_rates_are_public() {
    let state = memory_state().await;
    let db = state.db().unwrap().clone();
    seed_rate(&db, "USD", 56.5).await;
    seed_rate(&db, "eur", 61.0).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/exchange-rates").to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    let codes: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["currency_code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, ["EUR", "USD"]);

    let req = test::TestRequest::get().uri("/api/exchange-rates/usd").to_request();
    let rate = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(rate["currency_code"], "USD");
    assert_eq!(rate["buying_rate"], 56.5);

    let req = test::TestRequest::get().uri("/api/exchange-rates/JPY").to_request();
    assert_problem(test::call_service(&app, req).await, 404, "EXCHANGE_RATE_NOT_FOUND").await;
}

#[actix_web::test]
async fn knowledge_search_matches_every_term() {
    let state = memory_state().await;
    let db = state.db().unwrap().clone();
    let dividends = seed_entry(
        &db,
        "Dividend policy",
        "Dividends are paid annually after the AGM.",
        "dividend,payout",
        Some("shares"),
    )
    .await;
    seed_entry(
        &db,
        "Opening hours",
        "Branches open at 8:00.",
        "branch,hours",
        Some("banking"),
    )
    .await;
    seed_entry(
        &db,
        "Share transfer",
        "Transfers require a signed form. No dividend is paid on pending transfers.",
        "transfer",
        Some("shares"),
    )
    .await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/knowledge?q=DIVIDEND")
        .to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body["pagination"]["total"], 2);
    assert_eq!(body["items"][0]["topic"], "Dividend policy");

    let req = test::TestRequest::get()
        .uri("/api/knowledge?q=dividend%20agm")
        .to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body["pagination"]["total"], 1);

    let req = test::TestRequest::get()
        .uri("/api/knowledge?category=Banking")
        .to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["items"][0]["topic"], "Opening hours");

    let req = test::TestRequest::get().uri("/api/knowledge").to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body["pagination"]["total"], 3);

    let req = test::TestRequest::get()
        .uri(&format!("/api/knowledge/{}", dividends.id))
        .to_request();
    let entry = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(entry["keywords"], "dividend,payout");

    let req = test::TestRequest::get().uri("/api/knowledge/missing").to_request();
    assert_problem(test::call_service(&app, req).await, 404, "KNOWLEDGE_ENTRY_NOT_FOUND").await;
}
