//! End-to-end HTTP tests over the in-memory adapters.
//!
//! The real router, middleware and services run; only storage is swapped for
//! the process-local store.

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use bookstore::Trace;
use bookstore::inbound::http::configure_api;
use bookstore::inbound::http::orders::OrderBody;
use serde_json::{Value, json};

mod support;

use support::memory_state;

const EMAIL: &str = "user123@example.com";

#[actix_web::test]
async fn documented_scenario_places_and_reads_back_an_order() {
    let (state, store) = memory_state();
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .configure(configure_api),
    )
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/accounts")
        .set_json(json!({ "email": EMAIL, "password": "correct horse" }))
        .to_request();
    let account: Value = actix_test::call_and_read_body_json(&app, request).await;
    let user_id = account["userId"].as_str().expect("userId").to_owned();

    let books: Vec<Value> = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/books")
            .to_request(),
    )
    .await;

    let request = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/orders?email={EMAIL}"))
        .set_json(json!({
            "items": [
                { "bookId": "1", "quantity": 2 },
                { "bookId": "2", "quantity": 1 }
            ]
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().contains_key("trace-id"));
    let placed: Value = actix_test::read_body_json(response).await;

    let history_request = || {
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/orders?email={EMAIL}"))
            .to_request()
    };
    let history: Vec<OrderBody> = actix_test::call_and_read_body_json(&app, history_request()).await;

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, placed["orderId"].as_str().expect("orderId"));
    assert_eq!(history[0].user_id, user_id);
    let items: Vec<(String, i32, String)> = history[0]
        .items
        .iter()
        .map(|item| (item.book_id.clone(), item.quantity, item.title.clone()))
        .collect();
    assert_eq!(
        items,
        vec![
            ("1".to_owned(), 2, books[0]["title"].as_str().expect("title").to_owned()),
            ("2".to_owned(), 1, books[1]["title"].as_str().expect("title").to_owned()),
        ]
    );

    let again: Vec<OrderBody> = actix_test::call_and_read_body_json(&app, history_request()).await;
    assert_eq!(history, again);
    assert_eq!(store.order_count(), 1);
    assert_eq!(store.line_count(), 2);
}

#[actix_web::test]
async fn failed_line_insert_leaves_no_visible_order() {
    let (state, store) = memory_state();
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .configure(configure_api),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/accounts")
        .set_json(json!({ "email": EMAIL, "password": "correct horse" }))
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, request).await.status(),
        StatusCode::CREATED
    );
    store.fail_line_insert_at(Some(1));

    let request = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/orders?email={EMAIL}"))
        .set_json(json!({
            "items": [
                { "bookId": "1", "quantity": 1 },
                { "bookId": "2", "quantity": 1 },
                { "bookId": "3", "quantity": 1 }
            ]
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Internal server error");

    let history: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/orders?email={EMAIL}"))
            .to_request(),
    )
    .await;
    assert_eq!(history, json!([]));
}
