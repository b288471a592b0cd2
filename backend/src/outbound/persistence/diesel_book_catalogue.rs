//! PostgreSQL-backed book catalogue.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::info;

use crate::domain::ports::{BookCatalogue, BookCatalogueError};
use crate::domain::{Book, BookId, NewBook};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{BookRow, NewBookRow};
use super::pool::{DbPool, PoolError};
use super::schema::books;

/// Diesel-backed implementation of [`BookCatalogue`].
#[derive(Clone)]
pub struct DieselBookCatalogue {
    pool: DbPool,
}

fn map_pool_error(error: PoolError) -> BookCatalogueError {
    BookCatalogueError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> BookCatalogueError {
    match classify_diesel_error(error, "book catalogue") {
        DieselFailure::Connection(message) => BookCatalogueError::connection(message),
        DieselFailure::ForeignKey { message, .. }
        | DieselFailure::Unique { message, .. }
        | DieselFailure::Query(message) => BookCatalogueError::query(message),
    }
}

fn into_book(row: BookRow) -> Result<Book, BookCatalogueError> {
    Book::try_from(row).map_err(|err| BookCatalogueError::query(err.to_string()))
}

impl DieselBookCatalogue {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert `books` when the catalogue is empty. Returns how many rows
    /// were written.
    pub async fn seed_if_empty(&self, seed: &[NewBook]) -> Result<usize, BookCatalogueError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let existing: i64 = books::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if existing > 0 {
            return Ok(0);
        }

        let rows: Vec<NewBookRow<'_>> = seed
            .iter()
            .map(|book| NewBookRow {
                title: book.title.as_str(),
                author: book.author.as_str(),
                description: book.description.as_str(),
                price_cents: book.price_cents,
            })
            .collect();
        let inserted = diesel::insert_into(books::table)
            .values(&rows)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        info!(inserted, "seeded book catalogue");
        Ok(inserted)
    }
}

#[async_trait]
impl BookCatalogue for DieselBookCatalogue {
    async fn list_books(&self) -> Result<Vec<Book>, BookCatalogueError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<BookRow> = books::table
            .select(BookRow::as_select())
            .order_by(books::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(into_book).collect()
    }

    async fn find_book(&self, id: BookId) -> Result<Option<Book>, BookCatalogueError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<BookRow> = books::table
            .filter(books::id.eq(id.get()))
            .select(BookRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(into_book).transpose()
    }
}
