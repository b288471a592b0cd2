//! Port for order persistence: atomic placement and history reads.

use async_trait::async_trait;

use crate::domain::{Order, OrderId, OrderItems, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by order store adapters.
    pub enum OrderStoreError {
        /// Store connection could not be established or was lost.
        Connection { message: String } =>
            "order store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "order store query failed: {message}",
        /// A line referenced a book that does not exist.
        UnknownBook { message: String } =>
            "order references an unknown book: {message}",
    }
}

/// Port owning order headers and order lines.
///
/// `place_order` is all-or-nothing: on any error no header and no line of
/// the order may be observable afterwards.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist one header owned by `user_id` and one line per item.
    async fn place_order(
        &self,
        user_id: UserId,
        items: &OrderItems,
    ) -> Result<OrderId, OrderStoreError>;

    /// Every order owned by `user_id`, items enriched with book titles.
    ///
    /// The order of the returned orders is unspecified. A user with no
    /// orders yields an empty vector.
    async fn order_history(&self, user_id: UserId) -> Result<Vec<Order>, OrderStoreError>;
}
