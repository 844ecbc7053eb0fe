use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};

use crate::app::{AddField, AppState, CatalogueView, ModalState};
use crate::ui::components::centered_rect;

pub fn render_books_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }

    let start = (app.selected_index / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(app.rows.len());
    let slice = app.rows.get(start..end).unwrap_or_default();

    let rows = slice.iter().enumerate().map(|(i, b)| {
        let absolute_index = start + i;
        let style = if absolute_index == app.selected_index {
            Style::default().fg(app.theme.highlight_fg).bg(app.theme.highlight_bg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        let (status, color) = if b.is_available() {
            ("yes", app.theme.available)
        } else {
            ("lent", app.theme.borrowed)
        };
        Row::new(vec![
            Cell::from(b.id().to_string()),
            Cell::from(b.title().to_string()),
            Cell::from(b.author().to_string()),
            Cell::from(status).style(Style::default().fg(color)),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(10),
        Constraint::Percentage(45),
        Constraint::Percentage(35),
        Constraint::Length(9),
    ];
    let header = Row::new(vec!["ID", "TITLE", "AUTHOR", "AVAILABLE"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));
    let title = match app.view {
        CatalogueView::All => "Catalogue",
        CatalogueView::AvailableOnly => "Available Books",
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)))
        .column_spacing(1);

    f.render_widget(table, area);
}

pub fn render_book_details(f: &mut Frame, area: Rect, app: &AppState) {
    let text = match app.selected() {
        Some(b) => format!(
            "Book ID: {}\nTitle: {}\nAuthor: {}\nAvailable: {}",
            b.id(),
            b.title(),
            b.author(),
            b.is_available()
        ),
        None => "No books yet. Press 'a' to add one.".to_string(),
    };
    let p = Paragraph::new(text).wrap(Wrap { trim: false }).style(Style::default().fg(app.theme.text)).block(
        Block::default().title("Details").borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(p, area);
}

/// Three-field form for a new book; the focused field is marked.
pub fn render_add_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    let ModalState::AddBook { field, id, title, author, error } = state else { return };

    let width = 56u16.min(area.width.saturating_sub(4)).max(40);
    let height = if error.is_some() { 10 } else { 8 };
    let rect = centered_rect(width, height, area);

    let mut lines: Vec<Line> = Vec::new();
    for (kind, value) in [(AddField::Id, id), (AddField::Title, title), (AddField::Author, author)] {
        let focused = kind == *field;
        let marker = if focused { "▶ " } else { "  " };
        let label = format!("{marker}{:<8}: ", kind.label());
        let value_style = if focused {
            Style::default().add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![Span::raw(label), Span::styled(value.clone(), value_style)]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Tab: next field  Enter: add  Esc: cancel",
        Style::default().add_modifier(Modifier::ITALIC),
    )));
    if let Some(err) = error {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(err.clone(), Style::default().fg(app.theme.borrowed))));
    }

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default().title("Add book").borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
