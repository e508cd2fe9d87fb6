pub mod catalog;
pub mod settings;
pub mod tui;

pub use crate::catalog::{Book, BookId, BorrowRequest, Catalog, LibraryClient, ReturnRequest};
pub use crate::settings::Settings;
