//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. The
//! `diesel print-schema` command can regenerate them from a live database.

diesel::table! {
    /// Registered accounts. `email` is unique and stored lower-cased.
    users (id) {
        id -> Int8,
        email -> Text,
        /// Argon2id PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Catalogue entries.
    books (id) {
        id -> Int8,
        title -> Text,
        author -> Text,
        description -> Text,
        /// Price in minor currency units.
        price_cents -> Int8,
    }
}

diesel::table! {
    /// Order headers, one per placed order.
    orders (id) {
        id -> Int8,
        user_id -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Order lines. `id` preserves insertion order within an order.
    order_items (id) {
        id -> Int8,
        order_id -> Int8,
        book_id -> Int8,
        quantity -> Int4,
    }
}

diesel::joinable!(orders -> users (user_id));
diesel::joinable!(order_items -> orders (order_id));
diesel::joinable!(order_items -> books (book_id));

diesel::allow_tables_to_appear_in_same_query!(users, books, orders, order_items);
