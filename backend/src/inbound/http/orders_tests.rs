//! Tests for order HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockOrderQuery, OrderHistoryResponse};
use crate::domain::{Error, OrderId, Quantity, TRACE_ID_HEADER, UserId, starter_catalogue};
use crate::inbound::http::test_utils::{memory_state, test_app};

const EMAIL: &str = "user123@example.com";

async fn register(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    email: &str,
) -> String {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/accounts")
        .set_json(json!({ "email": email, "password": "correct horse" }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    body["userId"].as_str().expect("userId").to_owned()
}

fn place_request(email: &str, items: Value) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri(&format!("/api/v1/orders?email={email}"))
        .set_json(json!({ "items": items }))
        .to_request()
}

fn history_request(email: &str) -> actix_http::Request {
    actix_test::TestRequest::get()
        .uri(&format!("/api/v1/orders?email={email}"))
        .to_request()
}

#[rstest]
#[actix_web::test]
async fn placed_order_appears_in_history_with_titles() {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;
    let user_id = register(&app, EMAIL).await;
    let titles: Vec<String> = starter_catalogue()
        .into_iter()
        .map(|book| book.title)
        .collect();

    let response = actix_test::call_service(
        &app,
        place_request(
            EMAIL,
            json!([
                { "bookId": "1", "quantity": 2 },
                { "bookId": "2", "quantity": 1 }
            ]),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let placed: PlaceOrderResponseBody = actix_test::read_body_json(response).await;

    let response = actix_test::call_service(&app, history_request(EMAIL)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let history: Vec<OrderBody> = actix_test::read_body_json(response).await;

    assert_eq!(history.len(), 1);
    let order = &history[0];
    assert_eq!(order.id, placed.order_id);
    assert_eq!(order.user_id, user_id);
    assert_eq!(
        order.items,
        vec![
            OrderedBookBody {
                book_id: "1".to_owned(),
                quantity: 2,
                title: titles[0].clone(),
            },
            OrderedBookBody {
                book_id: "2".to_owned(),
                quantity: 1,
                title: titles[1].clone(),
            },
        ]
    );
}

#[rstest]
#[actix_web::test]
async fn history_is_empty_array_for_customer_without_orders() {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;
    register(&app, EMAIL).await;

    let response = actix_test::call_service(&app, history_request(EMAIL)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!([]));
}

#[rstest]
#[actix_web::test]
async fn repeated_history_reads_are_equal() {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;
    register(&app, EMAIL).await;
    for book in ["1", "2", "3"] {
        let response = actix_test::call_service(
            &app,
            place_request(EMAIL, json!([{ "bookId": book, "quantity": 1 }])),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let first: Vec<OrderBody> =
        actix_test::read_body_json(actix_test::call_service(&app, history_request(EMAIL)).await)
            .await;
    let second: Vec<OrderBody> =
        actix_test::read_body_json(actix_test::call_service(&app, history_request(EMAIL)).await)
            .await;

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}

#[rstest]
#[actix_web::test]
async fn unknown_email_is_not_found_and_writes_nothing() {
    let (state, store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let response = actix_test::call_service(
        &app,
        place_request("ghost@example.com", json!([{ "bookId": "1", "quantity": 1 }])),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.order_count(), 0);

    let response = actix_test::call_service(&app, history_request("ghost@example.com")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case::empty_items(json!([]), "items", "empty_items", None)]
#[case::zero_quantity(
    json!([{ "bookId": "1", "quantity": 1 }, { "bookId": "2", "quantity": 0 }]),
    "quantity",
    "invalid_quantity",
    Some(1)
)]
#[case::bad_book_id(
    json!([{ "bookId": "one", "quantity": 1 }]),
    "bookId",
    "invalid_book_id",
    Some(0)
)]
#[case::unknown_book(
    json!([{ "bookId": "999", "quantity": 1 }]),
    "bookId",
    "unknown_book",
    None
)]
#[actix_web::test]
async fn invalid_items_are_rejected(
    #[case] items: Value,
    #[case] field: &str,
    #[case] code: &str,
    #[case] index: Option<u64>,
) {
    let (state, store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;
    register(&app, EMAIL).await;

    let response = actix_test::call_service(&app, place_request(EMAIL, items)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
    assert_eq!(body["details"]["index"].as_u64(), index);
    assert_eq!(store.order_count(), 0);
}

#[rstest]
#[actix_web::test]
async fn missing_email_is_rejected() {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/orders")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], "email");
    assert_eq!(body["details"]["code"], "missing_field");
}

#[rstest]
#[actix_web::test]
async fn malformed_body_is_rejected_as_invalid_json() {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/orders?email={EMAIL}"))
        .set_json(json!({ "lines": [] }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], "body");
    assert_eq!(body["details"]["code"], "invalid_json");
}

fn order(id: i64) -> Order {
    Order {
        id: OrderId::new(id).expect("order id"),
        user_id: UserId::new(1).expect("user id"),
        placed_at: Utc
            .with_ymd_and_hms(2026, 10, 1, 12, 0, 0)
            .single()
            .expect("timestamp"),
        items: vec![OrderedBook {
            book_id: crate::domain::BookId::new(1).expect("book id"),
            quantity: Quantity::new(1).expect("quantity"),
            title: "Title".to_owned(),
        }],
    }
}

fn state_with_history(query: MockOrderQuery) -> HttpState {
    let (state, _store) = memory_state();
    HttpState {
        orders_query: Arc::new(query),
        ..state
    }
}

#[rstest]
#[actix_web::test]
async fn history_is_sorted_by_order_id_at_the_boundary() {
    let mut query = MockOrderQuery::new();
    query.expect_order_history().times(1).return_once(|_| {
        Ok(OrderHistoryResponse {
            orders: vec![order(3), order(1), order(2)],
        })
    });
    let app = actix_test::init_service(test_app(state_with_history(query))).await;

    let history: Vec<OrderBody> =
        actix_test::read_body_json(actix_test::call_service(&app, history_request(EMAIL)).await)
            .await;

    let ids: Vec<&str> = history.iter().map(|order| order.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(history[0].placed_at, "2026-10-01T12:00:00+00:00");
}

#[rstest]
#[actix_web::test]
async fn read_failures_surface_as_redacted_errors() {
    let mut query = MockOrderQuery::new();
    query
        .expect_order_history()
        .times(1)
        .returning(|_| Err(Error::internal("order store error: relation missing")));
    let app = actix_test::init_service(test_app(state_with_history(query))).await;

    let response = actix_test::call_service(&app, history_request(EMAIL)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace-id header");
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Internal server error");
    assert_eq!(body["traceId"], header.as_str());
}
