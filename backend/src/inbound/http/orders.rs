//! Order HTTP handlers.
//!
//! ```text
//! POST /api/v1/orders?email=reader@example.com
//! GET  /api/v1/orders?email=reader@example.com
//! ```
//!
//! Customers are identified by the `email` query parameter. History is
//! returned sorted by order id; the domain makes no ordering promise.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{OrderHistoryRequest, PlaceOrderRequest};
use crate::domain::{Order, OrderLineDraft, OrderedBook};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::EmailQuery;

/// One requested line.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineBody {
    #[schema(example = "1")]
    pub book_id: String,
    #[schema(example = 2, minimum = 1)]
    pub quantity: i64,
}

/// Request payload for placing an order.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequestBody {
    pub items: Vec<OrderLineBody>,
}

/// Response payload for a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponseBody {
    #[schema(example = "7")]
    pub order_id: String,
}

/// Ordered book in a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderedBookBody {
    pub book_id: String,
    pub quantity: i32,
    pub title: String,
}

/// One order in a customer's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderBody {
    pub id: String,
    pub user_id: String,
    #[schema(format = "date-time")]
    pub placed_at: String,
    pub items: Vec<OrderedBookBody>,
}

impl From<OrderLineBody> for OrderLineDraft {
    fn from(value: OrderLineBody) -> Self {
        Self {
            book_id: value.book_id,
            quantity: value.quantity,
        }
    }
}

impl From<OrderedBook> for OrderedBookBody {
    fn from(value: OrderedBook) -> Self {
        Self {
            book_id: value.book_id.to_string(),
            quantity: value.quantity.get(),
            title: value.title,
        }
    }
}

impl From<Order> for OrderBody {
    fn from(value: Order) -> Self {
        Self {
            id: value.id.to_string(),
            user_id: value.user_id.to_string(),
            placed_at: value.placed_at.to_rfc3339(),
            items: value.items.into_iter().map(OrderedBookBody::from).collect(),
        }
    }
}

/// Place an order for the customer identified by `email`.
///
/// # Examples
/// ```no_run
/// use actix_web::{HttpResponse, web};
/// use bookstore::inbound::http::ApiResult;
/// use bookstore::inbound::http::orders::{OrderLineBody, PlaceOrderRequestBody, place_order};
/// use bookstore::inbound::http::state::HttpState;
/// use bookstore::inbound::http::users::EmailQuery;
///
/// async fn call_handler(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
///     let query = web::Query(EmailQuery {
///         email: Some("reader@example.com".to_owned()),
///     });
///     let payload = web::Json(PlaceOrderRequestBody {
///         items: vec![OrderLineBody {
///             book_id: "1".to_owned(),
///             quantity: 2,
///         }],
///     });
///     place_order(state, query, payload).await
/// }
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    params(EmailQuery),
    request_body = PlaceOrderRequestBody,
    responses(
        (status = 201, description = "Order placed", body = PlaceOrderResponseBody),
        (status = 400, description = "Invalid items or email", body = ErrorSchema),
        (status = 404, description = "No user with that email", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "placeOrder"
)]
#[post("/orders")]
pub async fn place_order(
    state: web::Data<HttpState>,
    query: web::Query<EmailQuery>,
    payload: web::Json<PlaceOrderRequestBody>,
) -> ApiResult<HttpResponse> {
    let email = query.into_inner().require_email()?;
    let items = payload
        .into_inner()
        .items
        .into_iter()
        .map(OrderLineDraft::from)
        .collect();

    let response = state
        .orders
        .place_order(PlaceOrderRequest { email, items })
        .await?;

    Ok(HttpResponse::Created().json(PlaceOrderResponseBody {
        order_id: response.order_id.to_string(),
    }))
}

/// List every order placed by the customer identified by `email`.
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    params(EmailQuery),
    responses(
        (status = 200, description = "Order history, oldest first", body = [OrderBody]),
        (status = 400, description = "Missing or malformed email", body = ErrorSchema),
        (status = 404, description = "No user with that email", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "orderHistory"
)]
#[get("/orders")]
pub async fn order_history(
    state: web::Data<HttpState>,
    query: web::Query<EmailQuery>,
) -> ApiResult<web::Json<Vec<OrderBody>>> {
    let email = query.into_inner().require_email()?;
    let mut orders = state
        .orders_query
        .order_history(OrderHistoryRequest { email })
        .await?
        .orders;
    orders.sort_by_key(|order| order.id);

    Ok(web::Json(orders.into_iter().map(OrderBody::from).collect()))
}

#[cfg(test)]
#[path = "orders_tests.rs"]
mod tests;
