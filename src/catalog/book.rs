use std::fmt;

use serde::{Deserialize, Serialize};

/// Book identifiers are opaque; the server hands out numbers or strings
/// depending on how the record was seeded.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum BookId {
    Number(i64),
    Text(String),
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookId::Number(id) => write!(f, "{}", id),
            BookId::Text(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Book {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub place: Option<String>,
    pub available: bool,
}

/// The collection as of the last successful fetch. The view is always
/// derived from this in full, never patched record by record.
#[derive(Deserialize, Default, Debug, Clone)]
pub struct Catalog {
    pub books: Vec<Book>,
}
