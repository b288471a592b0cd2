//! Port for read-only catalogue access.

use async_trait::async_trait;

use crate::domain::{Book, BookId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalogue adapters.
    pub enum BookCatalogueError {
        /// Catalogue connection could not be established.
        Connection { message: String } =>
            "book catalogue connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "book catalogue query failed: {message}",
    }
}

/// Port for listing and looking up books.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookCatalogue: Send + Sync {
    /// All books, ordered by id.
    async fn list_books(&self) -> Result<Vec<Book>, BookCatalogueError>;

    /// One book, or `None` when the id is unknown.
    async fn find_book(&self, id: BookId) -> Result<Option<Book>, BookCatalogueError>;
}
