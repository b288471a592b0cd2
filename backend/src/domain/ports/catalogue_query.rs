//! Driving port for catalogue reads.

use async_trait::async_trait;

use crate::domain::{Book, BookId, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueQuery: Send + Sync {
    /// Every book in the catalogue.
    async fn list_books(&self) -> Result<Vec<Book>, Error>;

    /// One book; `not_found` when the id is unknown.
    async fn get_book(&self, id: BookId) -> Result<Book, Error>;
}
