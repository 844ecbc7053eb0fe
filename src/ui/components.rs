//! Shared UI components (status bar, side panes, modal helpers).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode, ModalState};

/// Render the bottom status bar with mode and the last result message.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Modal => "MODAL",
    };
    let msg = match &app.status {
        Some(status) => format!("mode: {mode}  rows/page:{}  {status}", app.rows_per_page),
        None => format!("mode: {mode}  rows/page:{}  ?: keys", app.rows_per_page),
    };
    let p = Paragraph::new(msg).style(Style::default().fg(app.theme.status_fg).bg(app.theme.status_bg));
    f.render_widget(p, area);
}

/// Most recent inventory events, newest at the bottom.
pub fn render_activity(f: &mut Frame, area: Rect, app: &AppState) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .activity
        .tail(visible)
        .into_iter()
        .map(|line| ListItem::new(line).style(Style::default().fg(app.theme.text)))
        .collect();
    let list = List::new(items).block(
        Block::default().title("Activity").borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(list, area);
}

/// Render the keybinds pane from the active keymap.
pub fn render_keybinds_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .title("Keybindings")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);

    let label_w = KeyAction::ALL.iter().map(|a| a.describe().len()).max().unwrap_or(0);
    let row = |label: &str, keys: String| {
        Line::from(vec![
            Span::raw(format!("  {:>width$} │ ", label, width = label_w)),
            Span::styled(keys, Style::default().add_modifier(Modifier::ITALIC)),
        ])
    };

    let mut lines: Vec<Line> = vec![Line::from(Span::styled("Catalogue:", Style::default().add_modifier(Modifier::BOLD)))];
    for action in KeyAction::ALL {
        if action == KeyAction::Ignore {
            continue;
        }
        let keys = app.keymap.keys_for(action);
        if keys.is_empty() {
            continue;
        }
        lines.push(row(action.describe(), keys.join(", ")));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Add form:", Style::default().add_modifier(Modifier::BOLD))));
    for (label, keys) in [("Next field", "Tab, Down"), ("Previous field", "BackTab, Up"), ("Add", "Enter"), ("Cancel", "Esc")] {
        lines.push(row(label, keys.to_string()));
    }

    let p = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(block, area);
    f.render_widget(p, inner);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render a generic informational modal dialog.
pub fn render_info_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    if let ModalState::Info { message } = state {
        let max_w = area.width.saturating_sub(6).max(30);
        let min_w = 44u16.min(max_w);
        let approx_lines = (message.len() as u16 / (min_w.saturating_sub(4).max(10))).max(1);
        let max_h = area.height.saturating_sub(6).max(5);
        let height = (approx_lines + 4).min(max_h).max(5);
        let rect = centered_rect(min_w, height, area);
        let p = Paragraph::new(vec![
            Line::raw(message.clone()),
            Line::raw(""),
            Line::from(Span::styled("Enter / Esc to close", Style::default().add_modifier(Modifier::ITALIC))),
        ])
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("Info")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect { x: 0, y: 0, width: 100, height: 20 };
        let r = centered_rect(40, 10, area);
        assert_eq!((r.x, r.y, r.width, r.height), (30, 5, 40, 10));

        let small = Rect { x: 2, y: 1, width: 10, height: 4 };
        let r = centered_rect(40, 10, small);
        assert_eq!((r.x, r.y, r.width, r.height), (2, 1, 10, 4));
    }
}
