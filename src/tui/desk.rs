use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::catalog::{Book, Catalog};

use super::forms::{BorrowField, BorrowForm, ReturnField, ReturnForm};
use super::prompt::Action;
use super::view::{DeskView, PLACEHOLDER_OPTION, STATUS_BORROWED, STATUS_PRESENT, TABLE_HEADER};

const TABLE_WIDTHS: [Constraint; 9] = [
    Constraint::Length(8),
    Constraint::Percentage(20),
    Constraint::Percentage(15),
    Constraint::Percentage(12),
    Constraint::Percentage(10),
    Constraint::Percentage(12),
    Constraint::Length(11),
    Constraint::Length(11),
    Constraint::Length(9),
];

/// What a key press asked the app shell to do next.
#[derive(Debug)]
pub enum Submission {
    Confirm { message: String, action: Action },
    Invalid { message: String },
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    #[default]
    Normal,
    Browse,
    Borrow,
    Return,
}

/// The borrowing desk screen: the book table, the two partitioned
/// selectors with their forms, and the clear-all shortcut.
pub struct Desk {
    catalog: Catalog,
    view: DeskView,
    borrow_form: BorrowForm,
    return_form: ReturnForm,
    table_state: TableState,
    mode: Mode,
}

impl Default for Desk {
    fn default() -> Desk {
        Desk {
            catalog: Catalog::default(),
            view: DeskView::default(),
            borrow_form: BorrowForm::fresh(),
            return_form: ReturnForm::fresh(),
            table_state: TableState::default(),
            mode: Mode::default(),
        }
    }
}

impl Desk {
    /// Swaps in a freshly fetched collection and rebuilds the view from it.
    /// Both selectors fall back to their placeholder, as a rebuilt dropdown
    /// would.
    pub fn rebuild(&mut self, books: Vec<Book>) {
        self.catalog = Catalog { books };
        self.view.rebuild(&self.catalog.books);
        self.borrow_form.selected = None;
        self.return_form.selected = None;
        if self
            .table_state
            .selected()
            .map_or(false, |index| index >= self.view.rows.len())
        {
            self.table_state.select(None);
        }
    }

    /// Empties the view; used when a load fails so stale rows never linger.
    pub fn clear_view(&mut self) {
        self.catalog.books.clear();
        self.view.clear();
        self.table_state.select(None);
    }

    pub fn after_success(&mut self) {
        self.borrow_form.reset();
        self.return_form.reset();
        self.mode = Mode::Normal;
    }

    pub fn in_normal_mode(&self) -> bool {
        self.mode == Mode::Normal
    }

    pub fn new_event(&mut self, normal_mode: &mut bool, event: KeyEvent) -> Option<Submission> {
        match (self.mode, event.code) {
            (Mode::Normal, KeyCode::Char('b')) => {
                self.mode = Mode::Borrow;
                *normal_mode = false;
                None
            }

            (Mode::Normal, KeyCode::Char('r')) => {
                self.mode = Mode::Return;
                *normal_mode = false;
                None
            }

            (Mode::Normal, KeyCode::Char('x')) => Some(Submission::Confirm {
                message: "Clear all borrowing data? This cannot be undone.".to_owned(),
                action: Action::Clear,
            }),

            (Mode::Normal, KeyCode::Char('l')) => {
                if !self.view.rows.is_empty() {
                    self.table_state.select(Some(0));
                    self.mode = Mode::Browse;
                    *normal_mode = false;
                }
                None
            }

            (Mode::Browse, KeyCode::Char('j') | KeyCode::Down) => {
                let count = self.view.rows.len();
                if let (Some(selected), true) = (self.table_state.selected(), count > 0) {
                    self.table_state.select(Some((selected + 1) % count));
                }
                None
            }

            (Mode::Browse, KeyCode::Char('k') | KeyCode::Up) => {
                let count = self.view.rows.len();
                if let (Some(selected), true) = (self.table_state.selected(), count > 0) {
                    let previous = if selected >= 1 { selected - 1 } else { count - 1 };
                    self.table_state.select(Some(previous));
                }
                None
            }

            (Mode::Browse, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('l')) => {
                self.table_state.select(None);
                self.mode = Mode::Normal;
                *normal_mode = true;
                None
            }

            (Mode::Borrow | Mode::Return, KeyCode::Esc) => {
                self.mode = Mode::Normal;
                *normal_mode = true;
                None
            }

            (Mode::Borrow, KeyCode::Enter) => Some(self.submit_borrow()),
            (Mode::Borrow, KeyCode::Tab) => {
                self.borrow_form.focus_next();
                None
            }
            (Mode::Borrow, KeyCode::BackTab) => {
                self.borrow_form.focus_prev();
                None
            }
            (Mode::Borrow, code) => {
                self.borrow_form.input(code, self.view.borrow_options.len());
                None
            }

            (Mode::Return, KeyCode::Enter) => Some(self.submit_return()),
            (Mode::Return, KeyCode::Tab | KeyCode::BackTab) => {
                self.return_form.focus_next();
                None
            }
            (Mode::Return, code) => {
                self.return_form.input(code, self.view.return_options.len());
                None
            }

            _ => None,
        }
    }

    fn submit_borrow(&mut self) -> Submission {
        match self.borrow_form.validate(&self.view.borrow_options) {
            Ok(request) => Submission::Confirm {
                message: format!("Borrow book {}?", request.book_id),
                action: Action::Borrow(request),
            },
            Err(message) => Submission::Invalid {
                message: message.to_owned(),
            },
        }
    }

    fn submit_return(&mut self) -> Submission {
        match self.return_form.validate(&self.view.return_options) {
            Ok(request) => Submission::Confirm {
                message: format!("Return book {}?", request.book_id),
                action: Action::Return(request),
            },
            Err(message) => Submission::Invalid {
                message: message.to_owned(),
            },
        }
    }

    pub fn render<B>(&mut self, frame: &mut Frame<B>)
    where
        B: Backend,
    {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Min(7),
                    Constraint::Length(7),
                    Constraint::Length(1),
                ]
                .as_ref(),
            )
            .split(frame.size());

        self.render_table(frame, chunks[0]);

        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(
                [
                    Constraint::Percentage(34),
                    Constraint::Percentage(33),
                    Constraint::Percentage(33),
                ]
                .as_ref(),
            )
            .split(chunks[1]);

        self.render_borrow(frame, panels[0]);
        self.render_return(frame, panels[1]);
        self.render_info(frame, panels[2]);

        self.render_hints(frame, chunks[2]);
    }

    fn render_table<B>(&mut self, frame: &mut Frame<B>, area: Rect)
    where
        B: Backend,
    {
        let header = Row::new(TABLE_HEADER.iter().map(|title| Cell::from(*title)))
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = self
            .view
            .rows
            .iter()
            .map(|row| Row::new(row.cells.iter().cloned()));

        let block = Block::default()
            .title(format!("Books ({}) (l)", self.view.rows.len()))
            .borders(Borders::ALL);

        let table = Table::new(rows)
            .header(header)
            .block(block)
            .widths(&TABLE_WIDTHS)
            .column_spacing(1)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_borrow<B>(&self, frame: &mut Frame<B>, area: Rect)
    where
        B: Backend,
    {
        let focused = self.mode == Mode::Borrow;
        let field_style = |field: BorrowField| {
            if focused && self.borrow_form.focus == field {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            }
        };

        let book = self
            .borrow_form
            .selected
            .and_then(|index| self.view.borrow_options.get(index))
            .map(|option| option.label.clone())
            .unwrap_or_else(|| PLACEHOLDER_OPTION.to_owned());

        let text = vec![
            Spans::from(vec![
                Span::raw("Book:  "),
                Span::styled(book, field_style(BorrowField::Book)),
            ]),
            Spans::from(vec![
                Span::raw("Email: "),
                Span::styled(self.borrow_form.email.clone(), field_style(BorrowField::Email)),
            ]),
            Spans::from(vec![
                Span::raw("Date:  "),
                Span::styled(self.borrow_form.date.clone(), field_style(BorrowField::Date)),
            ]),
        ];

        let block = Block::default()
            .title("Borrow (b)")
            .borders(Borders::ALL)
            .border_style(border_style(focused));
        frame.render_widget(Paragraph::new(text).block(block), area);
    }

    fn render_return<B>(&self, frame: &mut Frame<B>, area: Rect)
    where
        B: Backend,
    {
        let focused = self.mode == Mode::Return;
        let field_style = |field: ReturnField| {
            if focused && self.return_form.focus == field {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            }
        };

        let book = self
            .return_form
            .selected
            .and_then(|index| self.view.return_options.get(index))
            .map(|option| option.label.clone())
            .unwrap_or_else(|| PLACEHOLDER_OPTION.to_owned());

        let text = vec![
            Spans::from(vec![
                Span::raw("Book: "),
                Span::styled(book, field_style(ReturnField::Book)),
            ]),
            Spans::from(vec![
                Span::raw("Date: "),
                Span::styled(self.return_form.date.clone(), field_style(ReturnField::Date)),
            ]),
        ];

        let block = Block::default()
            .title("Return (r)")
            .borders(Borders::ALL)
            .border_style(border_style(focused));
        frame.render_widget(Paragraph::new(text).block(block), area);
    }

    fn render_info<B>(&self, frame: &mut Frame<B>, area: Rect)
    where
        B: Backend,
    {
        let block = Block::default().title("Book Info").borders(Borders::ALL);

        let text: Vec<Spans> = match self
            .table_state
            .selected()
            .and_then(|index| self.catalog.books.get(index))
        {
            Some(book) => {
                let status = if book.available {
                    STATUS_PRESENT
                } else {
                    STATUS_BORROWED
                };
                let line = |name: &str, value: String| {
                    Spans::from(vec![
                        Span::styled(
                            format!("{} ", name),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(value),
                    ])
                };

                vec![
                    line("Title:", book.title.clone()),
                    line("Author:", book.author.clone()),
                    line("Publisher:", book.publisher.clone().unwrap_or_default()),
                    line("Genre:", book.genre.clone().unwrap_or_default()),
                    line(
                        "Copies:",
                        book.quantity.map(|n| n.to_string()).unwrap_or_default(),
                    ),
                    line("Shelf:", book.place.clone().unwrap_or_default()),
                    line("Status:", status.to_owned()),
                ]
            }
            None => Vec::default(),
        };

        frame.render_widget(
            Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
            area,
        );
    }

    fn render_hints<B>(&self, frame: &mut Frame<B>, area: Rect)
    where
        B: Backend,
    {
        let hints = match self.mode {
            Mode::Normal => "l: browse   b: borrow   r: return   x: clear all   q: quit",
            Mode::Browse => "j/k: move   Esc: back",
            Mode::Borrow | Mode::Return => {
                "Tab: next field   j/k: choose book   Enter: submit   Esc: cancel"
            }
        };

        frame.render_widget(
            Paragraph::new(Span::styled(
                hints,
                Style::default().add_modifier(Modifier::DIM),
            )),
            area,
        );
    }
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}
