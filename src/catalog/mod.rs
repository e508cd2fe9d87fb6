pub mod book;
pub mod client;
pub mod error;

pub use book::{Book, BookId, Catalog};
pub use client::{BorrowRequest, LibraryClient, ReturnRequest};
pub use error::ApiError;
