//! Shared helpers for integration tests.
#![allow(dead_code, reason = "each test binary uses a subset of the helpers")]

use std::sync::Arc;

use bookstore::domain::{AccountService, CatalogueService, OrderService, starter_catalogue};
use bookstore::inbound::http::state::HttpState;
use bookstore::outbound::memory::InMemoryBookstore;
use uuid::Uuid;

/// Environment variable naming the PostgreSQL database used by Diesel tests.
pub const TEST_DATABASE_URL_VAR: &str = "BOOKSTORE_TEST_DATABASE_URL";

/// Returns the test database URL, or prints a skip marker and returns `None`
/// when it is not configured.
#[allow(clippy::print_stderr, reason = "skip marker is read by CI logs")]
pub fn test_database_url() -> Option<String> {
    match std::env::var(TEST_DATABASE_URL_VAR) {
        Ok(url) if !url.is_empty() => Some(url),
        _ => {
            eprintln!("SKIP-TEST-DATABASE: {TEST_DATABASE_URL_VAR} is not set");
            None
        }
    }
}

/// An email address no other test run will use.
pub fn unique_email() -> String {
    format!("reader-{}@example.com", Uuid::new_v4().simple())
}

/// HTTP state over an in-memory store seeded with the starter catalogue.
pub fn memory_state() -> (HttpState, Arc<InMemoryBookstore>) {
    let store = Arc::new(InMemoryBookstore::new());
    store.seed_books(starter_catalogue());
    let state = HttpState::from_services(
        Arc::new(OrderService::new(store.clone(), store.clone())),
        Arc::new(CatalogueService::new(store.clone())),
        Arc::new(AccountService::new(store.clone(), store.clone())),
    );
    (state, store)
}
