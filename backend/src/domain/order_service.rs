//! Order placement and history orchestration.
//!
//! The service translates caller-facing emails into storage user ids and
//! delegates to the order store. It holds no state of its own.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    OrderCommand, OrderHistoryRequest, OrderHistoryResponse, OrderQuery, OrderStore,
    OrderStoreError, PlaceOrderRequest, PlaceOrderResponse, UserResolver, UserResolverError,
};
use crate::domain::{EmailAddress, Error, OrderItems, OrderItemsValidationError, UserId};

fn map_store_error(error: OrderStoreError) -> Error {
    match error {
        OrderStoreError::Connection { message } => {
            Error::service_unavailable(format!("order store unavailable: {message}"))
        }
        OrderStoreError::Query { message } => {
            Error::internal(format!("order store error: {message}"))
        }
        OrderStoreError::UnknownBook { message } => Error::invalid_request(format!(
            "order references an unknown book: {message}"
        ))
        .with_details(json!({ "field": "bookId", "code": "unknown_book" })),
    }
}

pub(crate) fn map_resolver_error(error: UserResolverError) -> Error {
    match error {
        UserResolverError::NotFound { email } => {
            Error::not_found(format!("no user registered for {email}"))
        }
        UserResolverError::Connection { message } => {
            Error::service_unavailable(format!("user resolver unavailable: {message}"))
        }
        UserResolverError::Query { message } => {
            Error::internal(format!("user resolver error: {message}"))
        }
    }
}

fn map_items_error(error: &OrderItemsValidationError) -> Error {
    let mut details = json!({ "field": error.field(), "code": error.code() });
    if let (Some(index), Some(map)) = (error.index(), details.as_object_mut()) {
        map.insert("index".to_owned(), json!(index));
    }
    Error::invalid_request(error.to_string()).with_details(details)
}

pub(crate) fn parse_email(raw: &str) -> Result<EmailAddress, Error> {
    EmailAddress::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "email", "code": "invalid_email" }))
    })
}

/// Order service implementing the order driving ports.
#[derive(Clone)]
pub struct OrderService<S, U> {
    store: Arc<S>,
    users: Arc<U>,
}

impl<S, U> OrderService<S, U> {
    /// Create a service over an order store and a user resolver.
    pub fn new(store: Arc<S>, users: Arc<U>) -> Self {
        Self { store, users }
    }
}

impl<S, U> OrderService<S, U>
where
    U: UserResolver,
{
    async fn resolve(&self, raw_email: &str) -> Result<UserId, Error> {
        let email = parse_email(raw_email)?;
        self.users
            .resolve(&email)
            .await
            .map_err(map_resolver_error)
    }
}

#[async_trait]
impl<S, U> OrderCommand for OrderService<S, U>
where
    S: OrderStore,
    U: UserResolver,
{
    async fn place_order(&self, request: PlaceOrderRequest) -> Result<PlaceOrderResponse, Error> {
        // Items are checked first so malformed input never reaches storage.
        let items = OrderItems::from_drafts(&request.items).map_err(|err| map_items_error(&err))?;
        let user_id = self.resolve(&request.email).await?;

        let order_id = self
            .store
            .place_order(user_id, &items)
            .await
            .map_err(map_store_error)?;

        Ok(PlaceOrderResponse { order_id })
    }
}

#[async_trait]
impl<S, U> OrderQuery for OrderService<S, U>
where
    S: OrderStore,
    U: UserResolver,
{
    async fn order_history(
        &self,
        request: OrderHistoryRequest,
    ) -> Result<OrderHistoryResponse, Error> {
        let user_id = self.resolve(&request.email).await?;
        let orders = self
            .store
            .order_history(user_id)
            .await
            .map_err(map_store_error)?;

        Ok(OrderHistoryResponse { orders })
    }
}

#[cfg(test)]
#[path = "order_service_tests.rs"]
mod tests;
