//! Driving port for placing orders.
//!
//! Callers identify the customer by email; the service resolves it to a
//! storage id before the store is touched.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, OrderId, OrderLineDraft};

/// Request to place an order on behalf of `email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub email: String,
    pub items: Vec<OrderLineDraft>,
}

/// Response carrying the id allocated for the new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub order_id: OrderId,
}

/// Driving port for order writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderCommand: Send + Sync {
    /// Validate the items, resolve the email and persist the order
    /// atomically.
    ///
    /// Fails with `invalid_request` for malformed input, `not_found` when the
    /// email is not registered, and `service_unavailable` or `internal` when
    /// the store fails. On failure nothing is persisted.
    async fn place_order(&self, request: PlaceOrderRequest) -> Result<PlaceOrderResponse, Error>;
}
