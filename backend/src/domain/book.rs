//! Catalogue entries.

use serde::{Deserialize, Serialize};

use super::BookId;

/// A book offered by the store.
///
/// `price_cents` is expressed in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price_cents: i64,
}

/// Catalogue entry prior to id assignment, used for seeding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: String,
    pub price_cents: i64,
}

impl NewBook {
    /// Attach a storage-assigned identifier.
    pub fn with_id(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            description: self.description,
            price_cents: self.price_cents,
        }
    }
}

/// A small starter catalogue loaded on demand at startup.
pub fn starter_catalogue() -> Vec<NewBook> {
    [
        (
            "The Rust Programming Language",
            "Steve Klabnik and Carol Nichols",
            "The official introduction to Rust.",
            3999,
        ),
        (
            "Designing Data-Intensive Applications",
            "Martin Kleppmann",
            "Reliable, scalable and maintainable systems.",
            4599,
        ),
        (
            "Structure and Interpretation of Computer Programs",
            "Harold Abelson and Gerald Jay Sussman",
            "Classic text on computation and abstraction.",
            3500,
        ),
    ]
    .into_iter()
    .map(|(title, author, description, price_cents)| NewBook {
        title: title.to_owned(),
        author: author.to_owned(),
        description: description.to_owned(),
        price_cents,
    })
    .collect()
}
