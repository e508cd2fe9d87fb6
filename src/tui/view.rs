use crate::catalog::{Book, BookId};

pub const PLACEHOLDER_OPTION: &str = "Select a Book";
pub const STATUS_PRESENT: &str = "Present";
pub const STATUS_BORROWED: &str = "Borrowed";

pub const TABLE_HEADER: [&str; 9] = [
    "ID",
    "Title",
    "Author",
    "Publisher",
    "Genre",
    "Borrower",
    "Start Date",
    "Return Date",
    "Status",
];

#[derive(Debug, Clone)]
pub struct BookOption {
    pub id: BookId,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct TableRow {
    pub cells: [String; 9],
}

/// Everything the desk screen draws, derived from the last fetched
/// collection. Kept free of widget types so it can be checked without a
/// terminal.
#[derive(Default, Debug)]
pub struct DeskView {
    pub rows: Vec<TableRow>,
    pub borrow_options: Vec<BookOption>,
    pub return_options: Vec<BookOption>,
}

impl DeskView {
    /// Replaces the whole view with rows and options derived from `books`.
    /// Nothing carries over from a previous load.
    pub fn rebuild(&mut self, books: &[Book]) {
        self.clear();

        for book in books {
            let status = if book.available {
                STATUS_PRESENT
            } else {
                STATUS_BORROWED
            };
            // Borrower and date columns have no data source yet; borrowed
            // rows show a dash, present rows stay blank.
            let filler = if book.available { "" } else { "—" };

            self.rows.push(TableRow {
                cells: [
                    book.book_id.to_string(),
                    book.title.clone(),
                    book.author.clone(),
                    book.publisher.clone().unwrap_or_default(),
                    book.genre.clone().unwrap_or_default(),
                    filler.to_owned(),
                    filler.to_owned(),
                    filler.to_owned(),
                    status.to_owned(),
                ],
            });

            let option = BookOption {
                id: book.book_id.clone(),
                label: format!("{} — {}", book.book_id, book.title),
            };
            if book.available {
                self.borrow_options.push(option);
            } else {
                self.return_options.push(option);
            }
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.borrow_options.clear();
        self.return_options.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: i64, title: &str, available: bool) -> Book {
        Book {
            book_id: BookId::Number(id),
            title: title.to_owned(),
            author: "Herbert".to_owned(),
            publisher: None,
            genre: None,
            quantity: None,
            place: None,
            available,
        }
    }

    #[test]
    fn available_book_lands_in_the_borrow_selector_only() {
        let mut view = DeskView::default();
        view.rebuild(&[book(1, "Dune", true)]);

        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].cells[8], STATUS_PRESENT);
        assert_eq!(view.borrow_options.len(), 1);
        assert_eq!(view.borrow_options[0].label, "1 — Dune");
        assert!(view.return_options.is_empty());
    }

    #[test]
    fn borrowed_book_lands_in_the_return_selector_only() {
        let mut view = DeskView::default();
        view.rebuild(&[book(2, "Emma", false)]);

        assert_eq!(view.rows[0].cells[8], STATUS_BORROWED);
        assert_eq!(view.rows[0].cells[5], "—");
        assert!(view.borrow_options.is_empty());
        assert_eq!(view.return_options[0].label, "2 — Emma");
    }

    #[test]
    fn every_book_appears_in_exactly_one_selector() {
        let books: Vec<Book> = (0..10).map(|n| book(n, "Title", n % 2 == 0)).collect();
        let mut view = DeskView::default();
        view.rebuild(&books);

        assert_eq!(view.rows.len(), books.len());
        assert_eq!(
            view.borrow_options.len() + view.return_options.len(),
            books.len()
        );
        for b in &books {
            let in_borrow = view.borrow_options.iter().any(|o| o.id == b.book_id);
            let in_return = view.return_options.iter().any(|o| o.id == b.book_id);
            assert_eq!(in_borrow, b.available);
            assert_eq!(in_return, !b.available);
        }
    }

    #[test]
    fn repeated_rebuilds_never_accumulate() {
        let books = vec![book(1, "Dune", true), book(2, "Emma", false)];
        let mut view = DeskView::default();
        view.rebuild(&books);
        view.rebuild(&books);
        view.rebuild(&books);

        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.borrow_options.len(), 1);
        assert_eq!(view.return_options.len(), 1);
    }

    #[test]
    fn missing_display_fields_render_blank() {
        let mut view = DeskView::default();
        view.rebuild(&[book(1, "Dune", true)]);

        assert_eq!(view.rows[0].cells[3], "");
        assert_eq!(view.rows[0].cells[4], "");
        assert_eq!(view.rows[0].cells[5], "");
    }

    #[test]
    fn clear_empties_the_view() {
        let mut view = DeskView::default();
        view.rebuild(&[book(1, "Dune", true)]);
        view.clear();

        assert!(view.rows.is_empty());
        assert!(view.borrow_options.is_empty());
        assert!(view.return_options.is_empty());
    }
}
