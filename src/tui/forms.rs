use chrono::Local;
use crossterm::event::KeyCode;

use crate::catalog::{BorrowRequest, ReturnRequest};

use super::view::BookOption;

pub const MISSING_FIELDS: &str = "Please fill in all fields.";

pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Selector position, where `None` is the placeholder entry. Cycling runs
/// placeholder -> first option -> ... -> last option -> placeholder.
pub(crate) fn cycle_next(selected: Option<usize>, count: usize) -> Option<usize> {
    match (selected, count) {
        (_, 0) => None,
        (None, _) => Some(0),
        (Some(index), _) if index + 1 < count => Some(index + 1),
        (Some(_), _) => None,
    }
}

pub(crate) fn cycle_prev(selected: Option<usize>, count: usize) -> Option<usize> {
    match (selected, count) {
        (_, 0) => None,
        (None, _) => Some(count - 1),
        (Some(0), _) => None,
        (Some(index), _) => Some(index - 1),
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BorrowField {
    #[default]
    Book,
    Email,
    Date,
}

#[derive(Debug, Default)]
pub struct BorrowForm {
    pub selected: Option<usize>,
    pub email: String,
    pub date: String,
    pub focus: BorrowField,
}

impl BorrowForm {
    /// A blank form with the date prefilled to today.
    pub fn fresh() -> BorrowForm {
        BorrowForm {
            date: today(),
            ..BorrowForm::default()
        }
    }

    pub fn reset(&mut self) {
        *self = BorrowForm::fresh();
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            BorrowField::Book => BorrowField::Email,
            BorrowField::Email => BorrowField::Date,
            BorrowField::Date => BorrowField::Book,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            BorrowField::Book => BorrowField::Date,
            BorrowField::Email => BorrowField::Book,
            BorrowField::Date => BorrowField::Email,
        };
    }

    pub fn input(&mut self, code: KeyCode, option_count: usize) {
        match (self.focus, code) {
            (BorrowField::Book, KeyCode::Down | KeyCode::Char('j')) => {
                self.selected = cycle_next(self.selected, option_count);
            }
            (BorrowField::Book, KeyCode::Up | KeyCode::Char('k')) => {
                self.selected = cycle_prev(self.selected, option_count);
            }
            (BorrowField::Email, KeyCode::Char(char)) => self.email.push(char),
            (BorrowField::Email, KeyCode::Backspace) => {
                let _ = self.email.pop();
            }
            (BorrowField::Date, KeyCode::Char(char)) => self.date.push(char),
            (BorrowField::Date, KeyCode::Backspace) => {
                let _ = self.date.pop();
            }
            _ => (),
        }
    }

    /// Presence check only; anything beyond that is the server's call.
    pub fn validate(&self, options: &[BookOption]) -> Result<BorrowRequest, &'static str> {
        let book = self.selected.and_then(|index| options.get(index));
        let email = self.email.trim();
        let date = self.date.trim();

        match (book, email.is_empty(), date.is_empty()) {
            (Some(book), false, false) => Ok(BorrowRequest::new(
                book.id.clone(),
                email.to_owned(),
                date.to_owned(),
            )),
            _ => Err(MISSING_FIELDS),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ReturnField {
    #[default]
    Book,
    Date,
}

#[derive(Debug, Default)]
pub struct ReturnForm {
    pub selected: Option<usize>,
    pub date: String,
    pub focus: ReturnField,
}

impl ReturnForm {
    pub fn fresh() -> ReturnForm {
        ReturnForm {
            date: today(),
            ..ReturnForm::default()
        }
    }

    pub fn reset(&mut self) {
        *self = ReturnForm::fresh();
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            ReturnField::Book => ReturnField::Date,
            ReturnField::Date => ReturnField::Book,
        };
    }

    pub fn input(&mut self, code: KeyCode, option_count: usize) {
        match (self.focus, code) {
            (ReturnField::Book, KeyCode::Down | KeyCode::Char('j')) => {
                self.selected = cycle_next(self.selected, option_count);
            }
            (ReturnField::Book, KeyCode::Up | KeyCode::Char('k')) => {
                self.selected = cycle_prev(self.selected, option_count);
            }
            (ReturnField::Date, KeyCode::Char(char)) => self.date.push(char),
            (ReturnField::Date, KeyCode::Backspace) => {
                let _ = self.date.pop();
            }
            _ => (),
        }
    }

    pub fn validate(&self, options: &[BookOption]) -> Result<ReturnRequest, &'static str> {
        let book = self.selected.and_then(|index| options.get(index));
        let date = self.date.trim();

        match (book, date.is_empty()) {
            (Some(book), false) => Ok(ReturnRequest {
                book_id: book.id.clone(),
                return_date: date.to_owned(),
            }),
            _ => Err(MISSING_FIELDS),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::BookId;

    use super::*;

    fn options() -> Vec<BookOption> {
        vec![BookOption {
            id: BookId::Number(1),
            label: "1 — Dune".to_owned(),
        }]
    }

    #[test]
    fn borrow_rejects_missing_book_selection() {
        let form = BorrowForm {
            email: "a@b.com".to_owned(),
            date: "2024-01-01".to_owned(),
            ..BorrowForm::default()
        };
        assert_eq!(form.validate(&options()), Err(MISSING_FIELDS));
    }

    #[test]
    fn borrow_rejects_blank_email() {
        let form = BorrowForm {
            selected: Some(0),
            email: "   ".to_owned(),
            date: "2024-01-01".to_owned(),
            ..BorrowForm::default()
        };
        assert_eq!(form.validate(&options()), Err(MISSING_FIELDS));
    }

    #[test]
    fn borrow_rejects_missing_date() {
        let form = BorrowForm {
            selected: Some(0),
            email: "a@b.com".to_owned(),
            ..BorrowForm::default()
        };
        assert_eq!(form.validate(&options()), Err(MISSING_FIELDS));
    }

    #[test]
    fn complete_borrow_form_builds_the_request() {
        let form = BorrowForm {
            selected: Some(0),
            email: "  a@b.com  ".to_owned(),
            date: "2024-01-01".to_owned(),
            ..BorrowForm::default()
        };

        let request = form.validate(&options()).unwrap();
        assert_eq!(request.book_id, BookId::Number(1));
        assert_eq!(request.borrower_email, "a@b.com");
        assert_eq!(request.start_date, "2024-01-01");
        assert_eq!(request.return_date, "2024-01-01");
    }

    #[test]
    fn return_requires_both_fields() {
        let no_book = ReturnForm {
            date: "2024-02-02".to_owned(),
            ..ReturnForm::default()
        };
        assert_eq!(no_book.validate(&options()), Err(MISSING_FIELDS));

        let no_date = ReturnForm {
            selected: Some(0),
            ..ReturnForm::default()
        };
        assert_eq!(no_date.validate(&options()), Err(MISSING_FIELDS));

        let complete = ReturnForm {
            selected: Some(0),
            date: "2024-02-02".to_owned(),
            ..ReturnForm::default()
        };
        assert!(complete.validate(&options()).is_ok());
    }

    #[test]
    fn stale_selection_fails_validation() {
        let form = BorrowForm {
            selected: Some(5),
            email: "a@b.com".to_owned(),
            date: "2024-01-01".to_owned(),
            ..BorrowForm::default()
        };
        assert_eq!(form.validate(&options()), Err(MISSING_FIELDS));
    }

    #[test]
    fn selector_cycles_through_the_placeholder() {
        assert_eq!(cycle_next(None, 2), Some(0));
        assert_eq!(cycle_next(Some(0), 2), Some(1));
        assert_eq!(cycle_next(Some(1), 2), None);

        assert_eq!(cycle_prev(None, 2), Some(1));
        assert_eq!(cycle_prev(Some(1), 2), Some(0));
        assert_eq!(cycle_prev(Some(0), 2), None);

        assert_eq!(cycle_next(None, 0), None);
        assert_eq!(cycle_prev(None, 0), None);
    }
}
