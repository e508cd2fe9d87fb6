use crossterm::event::KeyEvent;
use log::error;
use ratatui::{backend::Backend, Frame};

use crate::catalog::{ApiError, LibraryClient};

use super::desk::{Desk, Submission};
use super::prompt::{Action, Modal, Verdict};

pub const LOAD_FAILED: &str = "Failed to load book data.";

/// Ties the desk screen to the client. Key events only mutate state; the
/// awaited work (actions and reloads) all happens in [`App::prerender`]
/// between frames, one request at a time.
pub struct App {
    client: LibraryClient,
    desk: Desk,
    modal: Option<Modal>,
    pending: Option<Action>,
    needs_reload: bool,
}

impl App {
    pub fn new(client: LibraryClient) -> App {
        App {
            client,
            desk: Desk::default(),
            modal: None,
            pending: None,
            needs_reload: true,
        }
    }

    pub async fn prerender(&mut self) -> anyhow::Result<()> {
        if let Some(action) = self.pending.take() {
            match self.run(action).await {
                Ok(message) => {
                    // One reload per confirmed action, then back to idle.
                    self.desk.after_success();
                    self.needs_reload = true;
                    self.modal = Some(Modal::alert(message));
                }
                Err(err) => {
                    error!("action failed: {}", err);
                    self.modal = Some(Modal::alert(err.to_string()));
                }
            }
        }

        if self.needs_reload {
            self.needs_reload = false;
            match self.client.books().await {
                Ok(books) => self.desk.rebuild(books),
                Err(err) => {
                    error!("error loading books: {}", err);
                    self.desk.clear_view();
                    self.modal = Some(Modal::alert(LOAD_FAILED));
                }
            }
        }

        Ok(())
    }

    async fn run(&self, action: Action) -> Result<String, ApiError> {
        match action {
            Action::Borrow(request) => self.client.borrow(&request).await,
            Action::Return(request) => self.client.return_book(&request).await,
            Action::Clear => self.client.clear_borrowings().await,
        }
    }

    pub fn render<B>(&mut self, frame: &mut Frame<B>)
    where
        B: Backend,
    {
        self.desk.render(frame);
        if let Some(modal) = &self.modal {
            modal.render(frame);
        }
    }

    pub fn new_event(&mut self, normal_mode: &mut bool, event: KeyEvent) -> bool {
        if let Some(modal) = self.modal.take() {
            match modal.new_event(event) {
                Verdict::Keep(modal) => self.modal = Some(modal),
                Verdict::Close => *normal_mode = self.desk.in_normal_mode(),
                Verdict::Confirm(action) => {
                    self.pending = Some(action);
                    *normal_mode = self.desk.in_normal_mode();
                }
            }
            return true;
        }

        match self.desk.new_event(normal_mode, event) {
            Some(Submission::Confirm { message, action }) => {
                *normal_mode = false;
                self.modal = Some(Modal::confirm(message, action));
                true
            }
            Some(Submission::Invalid { message }) => {
                *normal_mode = false;
                self.modal = Some(Modal::alert(message));
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use crate::tui::forms::MISSING_FIELDS;

    use super::*;

    fn app() -> App {
        App::new(LibraryClient::new("http://localhost:5000"))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn clear_asks_for_confirmation_before_queueing_the_request() {
        let mut app = app();
        let mut normal_mode = true;

        app.new_event(&mut normal_mode, key(KeyCode::Char('x')));
        assert!(matches!(app.modal, Some(Modal::Confirm { .. })));
        assert!(app.pending.is_none());

        app.new_event(&mut normal_mode, key(KeyCode::Char('y')));
        assert_eq!(app.pending, Some(Action::Clear));
    }

    #[test]
    fn declining_the_confirmation_queues_nothing() {
        let mut app = app();
        let mut normal_mode = true;

        app.new_event(&mut normal_mode, key(KeyCode::Char('x')));
        app.new_event(&mut normal_mode, key(KeyCode::Char('n')));

        assert!(app.pending.is_none());
        assert!(app.modal.is_none());
        assert!(normal_mode);
    }

    #[test]
    fn empty_borrow_form_alerts_without_queueing_a_request() {
        let mut app = app();
        let mut normal_mode = true;

        app.new_event(&mut normal_mode, key(KeyCode::Char('b')));
        app.new_event(&mut normal_mode, key(KeyCode::Enter));

        match &app.modal {
            Some(Modal::Alert { message }) => assert_eq!(message, MISSING_FIELDS),
            other => panic!("unexpected modal: {:?}", other),
        }
        assert!(app.pending.is_none());
    }

    #[test]
    fn dismissing_a_form_alert_stays_in_the_form() {
        let mut app = app();
        let mut normal_mode = true;

        app.new_event(&mut normal_mode, key(KeyCode::Char('b')));
        app.new_event(&mut normal_mode, key(KeyCode::Enter));
        app.new_event(&mut normal_mode, key(KeyCode::Enter));

        assert!(app.modal.is_none());
        assert!(!normal_mode);
    }
}
