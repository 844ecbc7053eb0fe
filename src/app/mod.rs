//! Dashboard state types and entry glue.
//!
//! Defines the enums and structs that model the dashboard, the color theme,
//! and re-exports the event loop as `run`.
//!
pub mod keymap;
pub mod terminal;
pub mod update;

use ratatui::style::Color;
use std::path::Path;

use crate::inventory::{Book, Inventory};
use crate::logging::EventLog;
use keymap::Keymap;

/// Which books the catalogue table shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CatalogueView {
    All,
    AvailableOnly,
}

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Modal,
}

/// Field focused in the add-book form.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddField {
    Id,
    Title,
    Author,
}

impl AddField {
    pub fn next(self) -> Self {
        match self {
            Self::Id => Self::Title,
            Self::Title => Self::Author,
            Self::Author => Self::Id,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Id => Self::Author,
            Self::Title => Self::Id,
            Self::Author => Self::Title,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "Book ID",
            Self::Title => "Title",
            Self::Author => "Author",
        }
    }
}

/// Modal dialogs drawn over the catalogue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    AddBook {
        field: AddField,
        id: String,
        title: String,
        author: String,
        error: Option<String>,
    },
    Info {
        message: String,
    },
}

impl ModalState {
    pub fn new_add_form() -> Self {
        Self::AddBook {
            field: AddField::Id,
            id: String::new(),
            title: String::new(),
            author: String::new(),
            error: None,
        }
    }
}

/// Color palette for the dashboard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub text: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub available: Color,
    pub borrowed: Color,
}

impl Theme {
    /// Plain ANSI palette.
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            available: Color::Green,
            borrowed: Color::Red,
        }
    }

    /// Catppuccin Mocha palette, the default.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            available: Color::Rgb(0xa6, 0xe3, 0xa1),    // green
            borrowed: Color::Rgb(0xf3, 0x8b, 0xa8),     // red
        }
    }

    /// Load theme from a `key = value` file. Unknown or missing keys fall back to `mocha`.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::mocha();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let key = parts.next().map(|s| s.trim()).unwrap_or("");
            let val = parts.next().map(|s| s.trim()).unwrap_or("");
            if key.is_empty() || val.is_empty() {
                continue;
            }
            let Some(color) = Self::parse_color(val) else { continue };
            match key {
                "text" => theme.text = color,
                "title" => theme.title = color,
                "border" => theme.border = color,
                "header_bg" => theme.header_bg = color,
                "header_fg" => theme.header_fg = color,
                "status_bg" => theme.status_bg = color,
                "status_fg" => theme.status_fg = color,
                "highlight_fg" => theme.highlight_fg = color,
                "highlight_bg" => theme.highlight_bg = color,
                "available" => theme.available = color,
                "borrowed" => theme.borrowed = color,
                _ => {}
            }
        }

        Some(theme)
    }

    /// Parse "#RRGGBB", "RRGGBB" or "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let s = s.trim();
        let hex = match s.strip_prefix('#') {
            Some(hex) => hex,
            None if s.len() == 6 && s.bytes().all(|b| b.is_ascii_hexdigit()) => s,
            // Named and indexed colors, in the form `Color`'s Display writes them.
            None => return s.parse::<Color>().ok(),
        };
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Persist the theme in `key = value` format.
    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# book-inventory theme configuration\n");
        buf.push_str("# Colors: #RRGGBB, a color name such as DarkGray, an index 0-255, or Reset\n\n");

        let entries = [
            ("text", self.text),
            ("title", self.title),
            ("border", self.border),
            ("header_bg", self.header_bg),
            ("header_fg", self.header_fg),
            ("status_bg", self.status_bg),
            ("status_fg", self.status_fg),
            ("highlight_fg", self.highlight_fg),
            ("highlight_bg", self.highlight_bg),
            ("available", self.available),
            ("borrowed", self.borrowed),
        ];
        for (key, color) in entries {
            let _ = writeln!(buf, "{key} = {color}");
        }

        std::fs::write(path, buf)
    }

    /// Load from `path`; if missing, write the default theme there and return it.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        if let Err(err) = t.write_file(path) {
            tracing::warn!(path = %path.display(), error = %err, "cannot write default theme");
        }
        t
    }
}

pub struct AppState {
    pub inventory: Inventory,
    /// Event lines reported by the inventory, shown in the activity pane.
    pub activity: EventLog,
    pub view: CatalogueView,
    /// Rows currently shown in the catalogue table.
    pub rows: Vec<Book>,
    pub selected_index: usize,
    pub rows_per_page: usize,
    pub input_mode: InputMode,
    pub modal: Option<ModalState>,
    pub status: Option<String>,
    pub show_help: bool,
    pub theme: Theme,
    pub keymap: Keymap,
}

impl AppState {
    /// `inventory` should report to the sink that feeds `activity`.
    pub fn new(inventory: Inventory, activity: EventLog, theme: Theme, keymap: Keymap) -> Self {
        let mut app = Self {
            inventory,
            activity,
            view: CatalogueView::All,
            rows: Vec::new(),
            selected_index: 0,
            rows_per_page: 10,
            input_mode: InputMode::Normal,
            modal: None,
            status: None,
            show_help: false,
            theme,
            keymap,
        };
        app.refresh();
        app
    }

    /// Recompute table rows from the inventory and clamp the selection.
    pub fn refresh(&mut self) {
        self.rows = match self.view {
            CatalogueView::All => self.inventory.books(),
            CatalogueView::AvailableOnly => self.inventory.list_available(),
        };
        self.selected_index = self.selected_index.min(self.rows.len().saturating_sub(1));
    }

    pub fn selected(&self) -> Option<&Book> {
        self.rows.get(self.selected_index)
    }

    /// Move the selection onto `id` if it is visible.
    pub fn select_id(&mut self, id: &str) {
        if let Some(idx) = self.rows.iter().position(|b| b.id() == id) {
            self.selected_index = idx;
        }
    }

    pub fn open_modal(&mut self, modal: ModalState) {
        self.modal = Some(modal);
        self.input_mode = InputMode::Modal;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.input_mode = InputMode::Normal;
    }
}

/// Re-export the dashboard event loop entry function.
pub use update::run_app as run;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_colors() {
        assert_eq!(Theme::parse_color("#FF0080"), Some(Color::Rgb(0xff, 0x00, 0x80)));
        assert_eq!(Theme::parse_color("00ff00"), Some(Color::Rgb(0, 0xff, 0)));
        assert_eq!(Theme::parse_color("Reset"), Some(Color::Reset));
        assert_eq!(Theme::parse_color("#12345"), None);
        assert_eq!(Theme::parse_color("zzzzzz"), None);
        assert_eq!(Theme::parse_color("DarkGray"), Some(Color::DarkGray));
        assert_eq!(Theme::parse_color("lightcyan"), Some(Color::LightCyan));
        assert_eq!(Theme::parse_color("208"), Some(Color::Indexed(208)));
    }

    #[test]
    fn dark_theme_survives_write_and_load() {
        let path = std::env::temp_dir().join(format!(
            "book-inventory-dark-theme-{}.conf",
            std::process::id()
        ));
        let dark = Theme::dark();
        dark.write_file(&path).unwrap();
        let loaded = Theme::from_file(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, Some(dark));
    }

    #[test]
    fn add_field_cycles() {
        assert_eq!(AddField::Id.next().next().next(), AddField::Id);
        assert_eq!(AddField::Id.prev(), AddField::Author);
    }

    #[test]
    fn refresh_clamps_selection_in_available_view() {
        let mut inv = Inventory::new();
        inv.add_book("a", "A", "X").unwrap();
        inv.add_book("b", "B", "Y").unwrap();
        let mut app = AppState::new(inv, EventLog::default(), Theme::dark(), Keymap::default());
        app.view = CatalogueView::AvailableOnly;
        app.selected_index = 1;
        app.inventory.borrow_book("b").unwrap();
        app.refresh();
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.selected().map(|b| b.id()), Some("a"));
    }
}
