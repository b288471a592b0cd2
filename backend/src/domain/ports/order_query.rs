//! Driving port for order history reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Order};

/// Request for every order placed by `email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHistoryRequest {
    pub email: String,
}

/// Orders in no particular order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHistoryResponse {
    pub orders: Vec<Order>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderQuery: Send + Sync {
    /// Load the order history for an email.
    ///
    /// An unknown email is `not_found`; a known user with no orders gets an
    /// empty list.
    async fn order_history(
        &self,
        request: OrderHistoryRequest,
    ) -> Result<OrderHistoryResponse, Error>;
}
