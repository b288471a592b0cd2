//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Book, BookId, IdValidationError, OrderHistoryRow, OrderId, Quantity, UserId,
};

use super::schema::{books, order_items, orders, users};

/// Insertable struct for new accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the books table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price_cents: i64,
}

impl TryFrom<BookRow> for Book {
    type Error = IdValidationError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BookId::new(row.id)?,
            title: row.title,
            author: row.author,
            description: row.description,
            price_cents: row.price_cents,
        })
    }
}

/// Insertable struct for catalogue seeding.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = books)]
pub(crate) struct NewBookRow<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub description: &'a str,
    pub price_cents: i64,
}

/// Insertable struct for order headers. `id` and `created_at` are defaulted.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = orders)]
pub(crate) struct NewOrderRow {
    pub user_id: i64,
}

/// Insertable struct for order lines.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = order_items)]
pub(crate) struct NewOrderItemRow {
    pub order_id: i64,
    pub book_id: i64,
    pub quantity: i32,
}

/// One row of the history join, in select order.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct OrderHistoryRecord {
    pub order_id: i64,
    pub user_id: i64,
    pub placed_at: DateTime<Utc>,
    pub book_id: i64,
    pub quantity: i32,
    pub title: String,
}

impl TryFrom<OrderHistoryRecord> for OrderHistoryRow {
    type Error = String;

    fn try_from(record: OrderHistoryRecord) -> Result<Self, Self::Error> {
        let quantity = Quantity::new(i64::from(record.quantity)).ok_or_else(|| {
            format!(
                "order {} holds non-positive quantity {}",
                record.order_id, record.quantity
            )
        })?;
        Ok(Self {
            order_id: OrderId::new(record.order_id).map_err(|err| err.to_string())?,
            user_id: UserId::new(record.user_id).map_err(|err| err.to_string())?,
            placed_at: record.placed_at,
            book_id: BookId::new(record.book_id).map_err(|err| err.to_string())?,
            quantity,
            title: record.title,
        })
    }
}
