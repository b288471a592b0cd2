//! Orders, line items and the history reconstruction fold.
//!
//! An order is written once as a header plus at least one line and never
//! mutated afterwards. Reads come back as flat join rows
//! ([`OrderHistoryRow`]) which [`group_order_rows`] folds into nested
//! [`Order`] views.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, IdValidationError, OrderId, UserId};

/// Validation errors raised while building [`OrderItems`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderItemsValidationError {
    #[error("an order needs at least one item")]
    Empty,
    #[error("item {index}: {source}")]
    InvalidBookId {
        index: usize,
        source: IdValidationError,
    },
    #[error("item {index}: quantity must be a positive 32-bit integer")]
    InvalidQuantity { index: usize },
}

impl OrderItemsValidationError {
    /// Field name reported to clients.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty => "items",
            Self::InvalidBookId { .. } => "bookId",
            Self::InvalidQuantity { .. } => "quantity",
        }
    }

    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty => "empty_items",
            Self::InvalidBookId { .. } => "invalid_book_id",
            Self::InvalidQuantity { .. } => "invalid_quantity",
        }
    }

    /// Zero-based position of the offending item, when one applies.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::InvalidBookId { index, .. } | Self::InvalidQuantity { index } => Some(*index),
        }
    }
}

/// Number of copies on a line. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
pub struct Quantity(i32);

impl Quantity {
    /// Accepts values in `1..=i32::MAX`.
    pub fn new(value: i64) -> Option<Self> {
        i32::try_from(value).ok().filter(|v| *v > 0).map(Self)
    }

    /// Raw count as stored.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for Quantity {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("quantity {value} is out of range"))
    }
}

impl From<Quantity> for i32 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

/// One requested (book, quantity) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub book_id: BookId,
    pub quantity: Quantity,
}

/// Unvalidated line as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineDraft {
    pub book_id: String,
    pub quantity: i64,
}

/// Non-empty, ordered list of order lines.
///
/// Duplicate book ids are kept as separate lines in the order given.
///
/// # Examples
/// ```
/// use bookstore::domain::{OrderItems, OrderLineDraft};
///
/// let items = OrderItems::from_drafts(&[
///     OrderLineDraft { book_id: "1".to_owned(), quantity: 2 },
///     OrderLineDraft { book_id: "2".to_owned(), quantity: 1 },
/// ])
/// .expect("valid items");
/// assert_eq!(items.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItems(Vec<OrderLine>);

impl OrderItems {
    /// Build from already-typed lines.
    pub fn new(lines: Vec<OrderLine>) -> Result<Self, OrderItemsValidationError> {
        if lines.is_empty() {
            return Err(OrderItemsValidationError::Empty);
        }
        Ok(Self(lines))
    }

    /// Validate raw drafts, reporting the first offending index.
    pub fn from_drafts(drafts: &[OrderLineDraft]) -> Result<Self, OrderItemsValidationError> {
        let lines = drafts
            .iter()
            .enumerate()
            .map(|(index, draft)| {
                let book_id = BookId::parse(&draft.book_id)
                    .map_err(|source| OrderItemsValidationError::InvalidBookId { index, source })?;
                let quantity = Quantity::new(draft.quantity)
                    .ok_or(OrderItemsValidationError::InvalidQuantity { index })?;
                Ok(OrderLine { book_id, quantity })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(lines)
    }

    /// Lines in request order.
    pub fn lines(&self) -> &[OrderLine] {
        self.0.as_slice()
    }

    /// Number of lines. Never zero.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Line item in an order view, enriched with the book title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedBook {
    pub book_id: BookId,
    pub quantity: Quantity,
    pub title: String,
}

/// Reconstructed order: header fields plus its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<OrderedBook>,
}

/// One row of the `orders ⋈ order_items ⋈ books` join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderHistoryRow {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub placed_at: DateTime<Utc>,
    pub book_id: BookId,
    pub quantity: Quantity,
    pub title: String,
}

/// Fold flat join rows into orders.
///
/// The first row seen for an order id creates the header; every row appends
/// one item. Items keep row arrival order within their order. The order of
/// the returned orders is unspecified.
pub fn group_order_rows<I>(rows: I) -> Vec<Order>
where
    I: IntoIterator<Item = OrderHistoryRow>,
{
    let mut grouped: HashMap<OrderId, Order> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.order_id)
            .or_insert_with(|| Order {
                id: row.order_id,
                user_id: row.user_id,
                placed_at: row.placed_at,
                items: Vec::new(),
            })
            .items
            .push(OrderedBook {
                book_id: row.book_id,
                quantity: row.quantity,
                title: row.title,
            });
    }
    grouped.into_values().collect()
}

#[cfg(test)]
#[path = "order_tests.rs"]
mod tests;
