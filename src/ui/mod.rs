pub mod books;
pub mod components;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, CatalogueView, ModalState};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
        .split(root[1]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(5)].as_ref())
        .split(body[1]);

    let view = match app.view {
        CatalogueView::All => "[All]  Available",
        CatalogueView::AvailableOnly => "All  [Available]",
    };
    let p = Paragraph::new(format!(
        "{view}  books:{}  available:{}  lent:{}",
        app.inventory.len(),
        app.inventory.available_count(),
        app.inventory.len() - app.inventory.available_count(),
    ))
    .block(
        Block::default()
            .title("Library Management System")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, root[0]);

    books::render_books_table(f, body[0], app);
    books::render_book_details(f, right[0], app);
    if app.show_help {
        components::render_keybinds_panel(f, right[1], app);
    } else {
        components::render_activity(f, right[1], app);
    }

    components::render_status_bar(f, root[2], app);

    if app.modal.is_some() {
        let area = f.area();
        render_modal(f, area, app);
    }
}

fn render_modal(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.modal {
        Some(state @ ModalState::AddBook { .. }) => books::render_add_modal(f, area, app, state),
        Some(state @ ModalState::Info { .. }) => components::render_info_modal(f, area, app, state),
        None => {}
    }
}
