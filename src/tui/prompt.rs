use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::catalog::{BorrowRequest, ReturnRequest};

/// A mutating request the user has asked for but not yet confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Borrow(BorrowRequest),
    Return(ReturnRequest),
    Clear,
}

#[derive(Debug)]
pub enum Modal {
    Confirm { message: String, action: Action },
    Alert { message: String },
}

pub enum Verdict {
    Keep(Modal),
    Close,
    Confirm(Action),
}

impl Modal {
    pub fn confirm(message: impl Into<String>, action: Action) -> Modal {
        Modal::Confirm {
            message: message.into(),
            action,
        }
    }

    pub fn alert(message: impl Into<String>) -> Modal {
        Modal::Alert {
            message: message.into(),
        }
    }

    pub fn new_event(self, event: KeyEvent) -> Verdict {
        match (self, event.code) {
            (Modal::Confirm { action, .. }, KeyCode::Char('y') | KeyCode::Enter) => {
                Verdict::Confirm(action)
            }
            (Modal::Confirm { .. }, KeyCode::Char('n') | KeyCode::Esc) => Verdict::Close,
            (Modal::Alert { .. }, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) => {
                Verdict::Close
            }
            (modal, _) => Verdict::Keep(modal),
        }
    }

    pub fn render<B>(&self, frame: &mut Frame<B>)
    where
        B: Backend,
    {
        let (title, message, hint) = match self {
            Modal::Confirm { message, .. } => ("Confirm", message, "y: yes   n: no"),
            Modal::Alert { message } => ("Notice", message, "Enter: dismiss"),
        };

        let area = centered_rect(50, 6, frame.size());
        let block = Block::default().title(title).borders(Borders::ALL);

        let text = vec![
            Spans::from(vec![Span::raw(message.clone())]),
            Spans::from(""),
            Spans::from(vec![Span::styled(
                hint,
                Style::default().add_modifier(Modifier::DIM),
            )]),
        ];

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
            area,
        );
    }
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage(40),
                Constraint::Length(height),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(vertical[1]);

    horizontal[1]
}
