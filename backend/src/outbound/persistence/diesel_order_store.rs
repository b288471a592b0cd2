//! PostgreSQL-backed order store.
//!
//! Writes run in a single transaction: one header insert returning the new
//! id, then one insert per line. Reads run a single
//! `orders ⋈ order_items ⋈ books` join and fold the rows with
//! [`group_order_rows`].

use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::{debug, info};

use crate::domain::ports::{OrderStore, OrderStoreError};
use crate::domain::{Order, OrderHistoryRow, OrderId, OrderItems, UserId, group_order_rows};

use super::diesel_basic_error_mapping::{
    DieselFailure, classify_diesel_error, pool_error_message, with_deadline,
};
use super::models::{NewOrderItemRow, NewOrderRow, OrderHistoryRecord};
use super::pool::{DbPool, PoolError};
use super::schema::{books, order_items, orders};

/// Default deadline applied to each store operation.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Diesel-backed implementation of [`OrderStore`].
#[derive(Clone)]
pub struct DieselOrderStore {
    pool: DbPool,
    operation_timeout: Duration,
}

impl DieselOrderStore {
    /// Create a store over the pool with the default operation timeout.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use std::time::Duration;
    /// use bookstore::outbound::persistence::{DbPool, DieselOrderStore, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/bookstore")).await?;
    /// let store = DieselOrderStore::new(pool).with_operation_timeout(Duration::from_secs(2));
    /// # let _ = store;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    async fn insert_order(
        &self,
        user_id: UserId,
        items: &OrderItems,
    ) -> Result<OrderId, OrderStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let header = NewOrderRow {
            user_id: user_id.get(),
        };
        let lines: Vec<(i64, i32)> = items
            .lines()
            .iter()
            .map(|line| (line.book_id.get(), line.quantity.get()))
            .collect();

        let raw_id = conn
            .transaction(|conn| {
                async move {
                    let order_id: i64 = diesel::insert_into(orders::table)
                        .values(&header)
                        .returning(orders::id)
                        .get_result(conn)
                        .await?;

                    for (book_id, quantity) in lines {
                        diesel::insert_into(order_items::table)
                            .values(&NewOrderItemRow {
                                order_id,
                                book_id,
                                quantity,
                            })
                            .execute(conn)
                            .await?;
                    }

                    Ok::<_, diesel::result::Error>(order_id)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_diesel_error(err, "place order"))?;

        OrderId::new(raw_id).map_err(|err| OrderStoreError::query(err.to_string()))
    }

    async fn load_history(&self, user_id: UserId) -> Result<Vec<Order>, OrderStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let records: Vec<OrderHistoryRecord> = order_items::table
            .inner_join(orders::table)
            .inner_join(books::table)
            .filter(orders::user_id.eq(user_id.get()))
            .order((orders::id.asc(), order_items::id.asc()))
            .select((
                orders::id,
                orders::user_id,
                orders::created_at,
                order_items::book_id,
                order_items::quantity,
                books::title,
            ))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "load order history"))?;

        let rows = records
            .into_iter()
            .map(OrderHistoryRow::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(OrderStoreError::query)?;

        Ok(group_order_rows(rows))
    }
}

fn map_pool_error(error: PoolError) -> OrderStoreError {
    OrderStoreError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> OrderStoreError {
    map_failure(classify_diesel_error(error, operation))
}

fn map_failure(failure: DieselFailure) -> OrderStoreError {
    match failure {
        DieselFailure::Connection(message) => OrderStoreError::connection(message),
        DieselFailure::ForeignKey {
            constraint,
            message,
        } if constraint
            .as_deref()
            .is_some_and(|name| name.contains("book_id")) =>
        {
            OrderStoreError::unknown_book(message)
        }
        DieselFailure::ForeignKey { message, .. }
        | DieselFailure::Unique { message, .. }
        | DieselFailure::Query(message) => OrderStoreError::query(message),
    }
}

#[async_trait]
impl OrderStore for DieselOrderStore {
    async fn place_order(
        &self,
        user_id: UserId,
        items: &OrderItems,
    ) -> Result<OrderId, OrderStoreError> {
        let order_id = with_deadline(
            self.operation_timeout,
            "place order",
            self.insert_order(user_id, items),
            OrderStoreError::connection,
        )
        .await?;
        info!(%user_id, %order_id, lines = items.len(), "order placed");
        Ok(order_id)
    }

    async fn order_history(&self, user_id: UserId) -> Result<Vec<Order>, OrderStoreError> {
        let orders = with_deadline(
            self.operation_timeout,
            "load order history",
            self.load_history(user_id),
            OrderStoreError::connection,
        )
        .await?;
        debug!(%user_id, orders = orders.len(), "order history loaded");
        Ok(orders)
    }
}
