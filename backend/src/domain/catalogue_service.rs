//! Catalogue read service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{BookCatalogue, BookCatalogueError, CatalogueQuery};
use crate::domain::{Book, BookId, Error};

fn map_catalogue_error(error: BookCatalogueError) -> Error {
    match error {
        BookCatalogueError::Connection { message } => {
            Error::service_unavailable(format!("book catalogue unavailable: {message}"))
        }
        BookCatalogueError::Query { message } => {
            Error::internal(format!("book catalogue error: {message}"))
        }
    }
}

/// Catalogue service implementing [`CatalogueQuery`].
#[derive(Clone)]
pub struct CatalogueService<B> {
    books: Arc<B>,
}

impl<B> CatalogueService<B> {
    pub fn new(books: Arc<B>) -> Self {
        Self { books }
    }
}

#[async_trait]
impl<B> CatalogueQuery for CatalogueService<B>
where
    B: BookCatalogue,
{
    async fn list_books(&self) -> Result<Vec<Book>, Error> {
        self.books.list_books().await.map_err(map_catalogue_error)
    }

    async fn get_book(&self, id: BookId) -> Result<Book, Error> {
        self.books
            .find_book(id)
            .await
            .map_err(map_catalogue_error)?
            .ok_or_else(|| Error::not_found(format!("book {id} not found")))
    }
}
