//! Catalogue HTTP handlers.
//!
//! ```text
//! GET /api/v1/books
//! GET /api/v1/books/{id}
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Book, BookId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Catalogue entry as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookBody {
    #[schema(example = "1")]
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    /// Price in minor currency units.
    #[schema(example = 3999)]
    pub price_cents: i64,
}

impl From<Book> for BookBody {
    fn from(value: Book) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            author: value.author,
            description: value.description,
            price_cents: value.price_cents,
        }
    }
}

/// List the catalogue in identifier order.
#[utoipa::path(
    get,
    path = "/api/v1/books",
    responses(
        (status = 200, description = "Catalogue", body = [BookBody]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "listBooks"
)]
#[get("/books")]
pub async fn list_books(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<BookBody>>> {
    let books = state.catalogue.list_books().await?;
    Ok(web::Json(books.into_iter().map(BookBody::from).collect()))
}

/// Fetch one book by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/books/{id}",
    params(("id" = String, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "Book", body = BookBody),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "No such book", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "getBook"
)]
#[get("/books/{id}")]
pub async fn get_book(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<BookBody>> {
    let id = parse_id(&path.into_inner(), FieldName::new("id"), BookId::parse)?;
    let book = state.catalogue.get_book(id).await?;
    Ok(web::Json(BookBody::from(book)))
}
