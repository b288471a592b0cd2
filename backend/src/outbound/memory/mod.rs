//! Process-local adapters for every driven port.
//!
//! [`InMemoryBookstore`] keeps users, books, order headers and order lines
//! in tables shaped like the PostgreSQL schema and answers history reads by
//! joining them and folding with [`group_order_rows`], so it behaves like
//! the Diesel adapters from the domain's point of view. It serves local runs
//! without a database and doubles as a fault-injecting fake in tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, BookCatalogue, BookCatalogueError, OrderStore,
    OrderStoreError, UserResolver, UserResolverError,
};
use crate::domain::{
    Book, BookId, EmailAddress, IdValidationError, NewBook, Order, OrderHistoryRow, OrderId,
    OrderItems, PasswordHash, Quantity, UserId, group_order_rows,
};

#[derive(Debug, Clone)]
struct OrderHeader {
    id: OrderId,
    user_id: UserId,
    placed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
struct OrderLineRecord {
    order_id: OrderId,
    book_id: BookId,
    quantity: Quantity,
}

#[derive(Debug, Default)]
struct Faults {
    fail_line_insert_at: Option<usize>,
    read_failure: Option<OrderStoreError>,
}

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<EmailAddress, (UserId, PasswordHash)>,
    books: BTreeMap<BookId, Book>,
    orders: Vec<OrderHeader>,
    order_items: Vec<OrderLineRecord>,
    last_user_id: i64,
    last_book_id: i64,
    last_order_id: i64,
    faults: Faults,
}

fn next_id<T>(
    counter: &mut i64,
    make: impl FnOnce(i64) -> Result<T, IdValidationError>,
) -> Result<T, String> {
    let value = counter
        .checked_add(1)
        .ok_or_else(|| "identifier space exhausted".to_owned())?;
    let id = make(value).map_err(|err| err.to_string())?;
    *counter = value;
    Ok(id)
}

/// In-memory implementation of the order store, user resolver, book
/// catalogue and account repository ports.
///
/// # Examples
/// ```
/// use bookstore::outbound::memory::InMemoryBookstore;
/// use bookstore::domain::starter_catalogue;
///
/// let store = InMemoryBookstore::new();
/// let books = store.seed_books(starter_catalogue());
/// assert_eq!(books.len(), 3);
/// assert_eq!(store.order_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBookstore {
    tables: Mutex<Tables>,
}

impl InMemoryBookstore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        // Writes commit in one step, so a poisoned lock holds consistent data.
        self.tables.lock().unwrap_or_else(|err| err.into_inner())
    }

    /// Add books to the catalogue, returning them with assigned ids.
    pub fn seed_books(&self, books: impl IntoIterator<Item = NewBook>) -> Vec<Book> {
        let mut tables = self.tables();
        let mut seeded = Vec::new();
        for book in books {
            let Ok(id) = next_id(&mut tables.last_book_id, BookId::new) else {
                break;
            };
            let book = book.with_id(id);
            tables.books.insert(id, book.clone());
            seeded.push(book);
        }
        seeded
    }

    /// Make the `index`-th line insert of subsequent orders fail, or clear
    /// the fault with `None`.
    pub fn fail_line_insert_at(&self, index: Option<usize>) {
        self.tables().faults.fail_line_insert_at = index;
    }

    /// Make subsequent history reads fail with `error`, or clear the fault
    /// with `None`.
    pub fn fail_reads_with(&self, error: Option<OrderStoreError>) {
        self.tables().faults.read_failure = error;
    }

    /// Number of committed order headers.
    pub fn order_count(&self) -> usize {
        self.tables().orders.len()
    }

    /// Number of committed order lines.
    pub fn line_count(&self) -> usize {
        self.tables().order_items.len()
    }
}

#[async_trait]
impl OrderStore for InMemoryBookstore {
    async fn place_order(
        &self,
        user_id: UserId,
        items: &OrderItems,
    ) -> Result<OrderId, OrderStoreError> {
        let mut tables = self.tables();
        if !tables.users.values().any(|(id, _)| *id == user_id) {
            return Err(OrderStoreError::query(format!(
                "user {user_id} does not exist"
            )));
        }

        // Stage the header and every line; nothing is visible until commit.
        let mut order_counter = tables.last_order_id;
        let order_id =
            next_id(&mut order_counter, OrderId::new).map_err(OrderStoreError::query)?;
        let header = OrderHeader {
            id: order_id,
            user_id,
            placed_at: Utc::now(),
        };

        let mut staged = Vec::with_capacity(items.len());
        for (index, line) in items.lines().iter().enumerate() {
            if tables.faults.fail_line_insert_at == Some(index) {
                debug!(%order_id, index, "injected line insert failure");
                return Err(OrderStoreError::query(format!(
                    "injected failure inserting line {index}"
                )));
            }
            if !tables.books.contains_key(&line.book_id) {
                return Err(OrderStoreError::unknown_book(format!(
                    "book {} does not exist",
                    line.book_id
                )));
            }
            staged.push(OrderLineRecord {
                order_id,
                book_id: line.book_id,
                quantity: line.quantity,
            });
        }

        tables.last_order_id = order_counter;
        tables.orders.push(header);
        tables.order_items.extend(staged);
        info!(%user_id, %order_id, lines = items.len(), "order placed");
        Ok(order_id)
    }

    async fn order_history(&self, user_id: UserId) -> Result<Vec<Order>, OrderStoreError> {
        let tables = self.tables();
        if let Some(error) = tables.faults.read_failure.clone() {
            return Err(error);
        }

        let headers: HashMap<OrderId, &OrderHeader> = tables
            .orders
            .iter()
            .filter(|header| header.user_id == user_id)
            .map(|header| (header.id, header))
            .collect();

        let mut rows = Vec::new();
        for line in &tables.order_items {
            let Some(header) = headers.get(&line.order_id) else {
                continue;
            };
            let book = tables.books.get(&line.book_id).ok_or_else(|| {
                OrderStoreError::query(format!("book {} vanished", line.book_id))
            })?;
            rows.push(OrderHistoryRow {
                order_id: header.id,
                user_id: header.user_id,
                placed_at: header.placed_at,
                book_id: line.book_id,
                quantity: line.quantity,
                title: book.title.clone(),
            });
        }

        Ok(group_order_rows(rows))
    }
}

#[async_trait]
impl UserResolver for InMemoryBookstore {
    async fn resolve(&self, email: &EmailAddress) -> Result<UserId, UserResolverError> {
        self.tables()
            .users
            .get(email)
            .map(|(id, _)| *id)
            .ok_or_else(|| UserResolverError::not_found(email.to_string()))
    }
}

#[async_trait]
impl BookCatalogue for InMemoryBookstore {
    async fn list_books(&self) -> Result<Vec<Book>, BookCatalogueError> {
        Ok(self.tables().books.values().cloned().collect())
    }

    async fn find_book(&self, id: BookId) -> Result<Option<Book>, BookCatalogueError> {
        Ok(self.tables().books.get(&id).cloned())
    }
}

#[async_trait]
impl AccountRepository for InMemoryBookstore {
    async fn create_account(
        &self,
        email: &EmailAddress,
        password_hash: &PasswordHash,
    ) -> Result<UserId, AccountRepositoryError> {
        let mut tables = self.tables();
        if tables.users.contains_key(email) {
            return Err(AccountRepositoryError::duplicate_email(email.to_string()));
        }
        let user_id =
            next_id(&mut tables.last_user_id, UserId::new).map_err(AccountRepositoryError::query)?;
        tables
            .users
            .insert(email.clone(), (user_id, password_hash.clone()));
        Ok(user_id)
    }
}
