use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::time::Duration;

use crate::app::keymap::KeyAction;
use crate::app::{AddField, AppState, CatalogueView, InputMode, ModalState};
use crate::ui;

/// Draw and dispatch key presses until a quit action.
pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key) {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Apply one key press. Returns `true` when the dashboard should exit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    match app.input_mode {
        InputMode::Normal => match app.keymap.resolve(&key) {
            Some(action) => apply_action(app, action),
            None => false,
        },
        InputMode::Modal if key.modifiers.contains(KeyModifiers::CONTROL) => {
            // Control chords never reach text fields.
            app.keymap.resolve(&key) == Some(KeyAction::Quit)
        }
        InputMode::Modal => {
            handle_modal_key(app, key.code);
            false
        }
    }
}

fn apply_action(app: &mut AppState, action: KeyAction) -> bool {
    match action {
        KeyAction::Quit => return true,
        KeyAction::AddBook => app.open_modal(ModalState::new_add_form()),
        KeyAction::BorrowSelected => lend_selected(app, true),
        KeyAction::ReturnSelected => lend_selected(app, false),
        KeyAction::ToggleView => {
            app.view = match app.view {
                CatalogueView::All => CatalogueView::AvailableOnly,
                CatalogueView::AvailableOnly => CatalogueView::All,
            };
            app.refresh();
        }
        KeyAction::ToggleHelp => app.show_help = !app.show_help,
        KeyAction::MoveUp => app.selected_index = app.selected_index.saturating_sub(1),
        KeyAction::MoveDown => {
            if app.selected_index + 1 < app.rows.len() {
                app.selected_index += 1;
            }
        }
        KeyAction::PageUp => {
            app.selected_index = app.selected_index.saturating_sub(app.rows_per_page.max(1));
        }
        KeyAction::PageDown => {
            let new_idx = app.selected_index.saturating_add(app.rows_per_page.max(1));
            app.selected_index = new_idx.min(app.rows.len().saturating_sub(1));
        }
        KeyAction::Ignore => {}
    }
    false
}

fn lend_selected(app: &mut AppState, borrow: bool) {
    let Some(id) = app.selected().map(|b| b.id().to_string()) else {
        app.status = Some("No book selected".to_string());
        return;
    };
    let result = if borrow { app.inventory.borrow_book(&id) } else { app.inventory.return_book(&id) };
    match result {
        Ok(book) => {
            app.status = Some(if borrow {
                format!("Borrowed: {}", book.title())
            } else {
                format!("Returned: {}", book.title())
            });
            app.refresh();
            app.select_id(&id);
        }
        Err(err) => {
            tracing::debug!(code = err.code(), kind = err.kind(), "operation rejected");
            app.status = Some(format!("Error: {err}"));
            app.open_modal(ModalState::Info { message: err.to_string() });
        }
    }
}

fn handle_modal_key(app: &mut AppState, code: KeyCode) {
    match &mut app.modal {
        Some(ModalState::Info { .. }) => {
            if matches!(code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                app.close_modal();
            }
        }
        Some(ModalState::AddBook { field, id, title, author, .. }) => match code {
            KeyCode::Esc => app.close_modal(),
            KeyCode::Tab | KeyCode::Down => *field = field.next(),
            KeyCode::BackTab | KeyCode::Up => *field = field.prev(),
            KeyCode::Backspace | KeyCode::Char(_) => {
                let buf = match field {
                    AddField::Id => id,
                    AddField::Title => title,
                    AddField::Author => author,
                };
                match code {
                    KeyCode::Char(c) => buf.push(c),
                    _ => {
                        buf.pop();
                    }
                }
            }
            KeyCode::Enter => {
                let (new_id, new_title, new_author) = (id.clone(), title.clone(), author.clone());
                submit_add_form(app, &new_id, &new_title, &new_author);
            }
            _ => {}
        },
        None => app.close_modal(),
    }
}

fn submit_add_form(app: &mut AppState, id: &str, title: &str, author: &str) {
    match app.inventory.add_book(id, title, author) {
        Ok(book) => {
            app.status = Some(format!("Added: {}", book.title()));
            app.close_modal();
            app.refresh();
            app.select_id(book.id());
        }
        Err(err) => {
            tracing::debug!(code = err.code(), kind = err.kind(), "operation rejected");
            app.status = Some(format!("Error: {err}"));
            if let Some(ModalState::AddBook { error, .. }) = &mut app.modal {
                *error = Some(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::keymap::Keymap;
    use crate::app::Theme;
    use crate::inventory::Inventory;
    use crate::logging::EventSink;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c)));
        }
    }

    fn mk_app() -> AppState {
        let (sink, log) = EventSink::memory();
        let mut inv = Inventory::with_sink(sink);
        inv.add_book("b1", "Dune", "Herbert").unwrap();
        inv.add_book("b2", "Emma", "Austen").unwrap();
        AppState::new(inv, log, Theme::dark(), Keymap::default())
    }

    #[test]
    fn add_form_submits_through_inventory() {
        let mut app = mk_app();
        handle_key(&mut app, key(KeyCode::Char('a')));
        assert_eq!(app.input_mode, InputMode::Modal);
        type_text(&mut app, "b3");
        handle_key(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "Ulysses");
        handle_key(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "Joycx");
        handle_key(&mut app, key(KeyCode::Backspace));
        type_text(&mut app, "e");
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.input_mode, InputMode::Normal);
        let book = app.inventory.get("b3").unwrap();
        assert_eq!(book.author(), "Joyce");
        assert_eq!(app.selected().map(|b| b.id()), Some("b3"));
        assert_eq!(app.activity.len(), 3);
    }

    #[test]
    fn add_form_keeps_open_on_error() {
        let mut app = mk_app();
        handle_key(&mut app, key(KeyCode::Char('n')));
        type_text(&mut app, "b1");
        handle_key(&mut app, key(KeyCode::Enter));
        match &app.modal {
            Some(ModalState::AddBook { error, field, .. }) => {
                assert_eq!(error.as_deref(), Some("Invalid book details provided."));
                assert_eq!(*field, AddField::Id);
            }
            other => panic!("unexpected modal {other:?}"),
        }
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(app.modal.is_none());
        assert_eq!(app.inventory.len(), 2);
    }

    #[test]
    fn ctrl_c_in_add_form_quits_without_typing() {
        let mut app = mk_app();
        handle_key(&mut app, key(KeyCode::Char('a')));
        type_text(&mut app, "b");
        let quit = handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(quit);
        match &app.modal {
            Some(ModalState::AddBook { id, .. }) => assert_eq!(id, "b"),
            other => panic!("unexpected modal {other:?}"),
        }

        let other_chord = handle_key(&mut app, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL));
        assert!(!other_chord);
        assert!(matches!(&app.modal, Some(ModalState::AddBook { id, .. }) if id == "b"));
    }

    #[test]
    fn borrow_and_return_selected() {
        let mut app = mk_app();
        handle_key(&mut app, key(KeyCode::Char('b')));
        assert!(!app.inventory.get("b1").unwrap().is_available());
        assert_eq!(app.status.as_deref(), Some("Borrowed: Dune"));

        handle_key(&mut app, key(KeyCode::Char('b')));
        assert_eq!(
            app.modal,
            Some(ModalState::Info { message: "Book is not available for borrowing.".into() })
        );
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);

        handle_key(&mut app, key(KeyCode::Char('r')));
        assert!(app.inventory.get("b1").unwrap().is_available());
    }

    #[test]
    fn available_view_hides_borrowed_rows() {
        let mut app = mk_app();
        handle_key(&mut app, key(KeyCode::Char('j')));
        handle_key(&mut app, key(KeyCode::Char('b')));
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.view, CatalogueView::AvailableOnly);
        let ids: Vec<_> = app.rows.iter().map(|b| b.id().to_string()).collect();
        assert_eq!(ids, vec!["b1"]);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn navigation_and_quit() {
        let mut app = mk_app();
        handle_key(&mut app, key(KeyCode::Down));
        handle_key(&mut app, key(KeyCode::Down));
        assert_eq!(app.selected_index, 1);
        handle_key(&mut app, key(KeyCode::PageUp));
        assert_eq!(app.selected_index, 0);
        handle_key(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))));
    }

    #[test]
    fn empty_catalogue_reports_no_selection() {
        let mut app = AppState::new(Inventory::new(), Default::default(), Theme::dark(), Keymap::default());
        handle_key(&mut app, key(KeyCode::Char('b')));
        assert_eq!(app.status.as_deref(), Some("No book selected"));
        assert_eq!(app.input_mode, InputMode::Normal);
    }
}
