//! Tests for order items validation and history grouping.

use chrono::{TimeZone, Utc};
use rstest::rstest;

use super::*;

fn draft(book_id: &str, quantity: i64) -> OrderLineDraft {
    OrderLineDraft {
        book_id: book_id.to_owned(),
        quantity,
    }
}

fn row(order: i64, book: i64, quantity: i64) -> OrderHistoryRow {
    OrderHistoryRow {
        order_id: OrderId::new(order).expect("order id"),
        user_id: UserId::new(7).expect("user id"),
        placed_at: Utc
            .with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
            .single()
            .expect("timestamp"),
        book_id: BookId::new(book).expect("book id"),
        quantity: Quantity::new(quantity).expect("quantity"),
        title: format!("Book {book}"),
    }
}

fn sorted(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by_key(|order| order.id);
    orders
}

#[test]
fn drafts_preserve_order_and_duplicates() {
    let items = OrderItems::from_drafts(&[draft("1", 2), draft("2", 1), draft("1", 5)])
        .expect("valid items");

    let pairs: Vec<(i64, i32)> = items
        .lines()
        .iter()
        .map(|line| (line.book_id.get(), line.quantity.get()))
        .collect();
    assert_eq!(pairs, vec![(1, 2), (2, 1), (1, 5)]);
}

#[test]
fn empty_drafts_are_rejected() {
    assert_eq!(
        OrderItems::from_drafts(&[]),
        Err(OrderItemsValidationError::Empty)
    );
}

#[rstest]
#[case(vec![draft("1", 0)], 0, "invalid_quantity")]
#[case(vec![draft("1", 1), draft("2", -3)], 1, "invalid_quantity")]
#[case(vec![draft("1", 1), draft("2", 1), draft("3", i64::from(i32::MAX) + 1)], 2, "invalid_quantity")]
#[case(vec![draft("1", 1), draft("abc", 1)], 1, "invalid_book_id")]
#[case(vec![draft("0", 1)], 0, "invalid_book_id")]
fn invalid_drafts_name_the_index(
    #[case] drafts: Vec<OrderLineDraft>,
    #[case] index: usize,
    #[case] code: &str,
) {
    let err = OrderItems::from_drafts(&drafts).expect_err("invalid items");
    assert_eq!(err.index(), Some(index));
    assert_eq!(err.code(), code);
}

#[test]
fn quantity_accepts_i32_max() {
    let quantity = Quantity::new(i64::from(i32::MAX)).expect("in range");
    assert_eq!(quantity.get(), i32::MAX);
}

#[test]
fn grouping_empty_rows_yields_no_orders() {
    assert!(group_order_rows(Vec::new()).is_empty());
}

#[test]
fn grouping_keeps_items_in_arrival_order() {
    let orders = group_order_rows(vec![row(1, 3, 1), row(1, 1, 2), row(1, 2, 4)]);

    assert_eq!(orders.len(), 1);
    let books: Vec<i64> = orders[0]
        .items
        .iter()
        .map(|item| item.book_id.get())
        .collect();
    assert_eq!(books, vec![3, 1, 2]);
    assert_eq!(orders[0].items[1].title, "Book 1");
}

#[test]
fn grouping_is_independent_of_row_interleaving() {
    // Three orders of two items each, rows interleaved across orders.
    let interleaved = vec![
        row(2, 20, 1),
        row(1, 10, 1),
        row(3, 30, 1),
        row(1, 11, 2),
        row(3, 31, 2),
        row(2, 21, 2),
    ];
    let contiguous = vec![
        row(1, 10, 1),
        row(1, 11, 2),
        row(2, 20, 1),
        row(2, 21, 2),
        row(3, 30, 1),
        row(3, 31, 2),
    ];

    let from_interleaved = sorted(group_order_rows(interleaved));
    let from_contiguous = sorted(group_order_rows(contiguous));

    assert_eq!(from_interleaved, from_contiguous);
    assert_eq!(from_interleaved.len(), 3);
    for order in &from_interleaved {
        assert_eq!(order.items.len(), 2);
        assert!(
            order
                .items
                .iter()
                .all(|item| item.book_id.get() / 10 == order.id.get()),
            "items leaked across orders: {order:?}"
        );
    }
}

#[rstest]
#[case(1, 1)]
#[case(4, 3)]
#[case(6, 5)]
fn grouping_yields_n_orders_of_m_items(#[case] n: i64, #[case] m: i64) {
    let mut rows = Vec::new();
    for item in 0..m {
        for order in 1..=n {
            rows.push(row(order, order * 100 + item + 1, item + 1));
        }
    }

    let orders = group_order_rows(rows);

    assert_eq!(orders.len(), usize::try_from(n).expect("small n"));
    for order in orders {
        assert_eq!(order.items.len(), usize::try_from(m).expect("small m"));
    }
}

#[test]
fn order_serialises_with_string_ids() {
    let orders = group_order_rows(vec![row(5, 1, 2)]);
    let value = serde_json::to_value(&orders[0]).expect("serialise");

    assert_eq!(value["id"], "5");
    assert_eq!(value["userId"], "7");
    assert_eq!(value["items"][0]["bookId"], "1");
    assert_eq!(value["items"][0]["quantity"], 2);
    assert_eq!(value["items"][0]["title"], "Book 1");
}
