//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! This module manages keyboard shortcuts for the dashboard. It supports:
//! - Loading custom keybindings from a config file (`keybinds.conf`)
//! - Providing defaults if no config is present
//! - Resolving key presses (with modifiers) to semantic actions
//! - Exporting the current keymap back to a file for customization

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::path::Path;

/// Semantic keyboard actions that can be bound to key combinations.
///
/// Several key combinations may map to the same action (both `j` and the
/// Down arrow move down, for example).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the dashboard.
    Quit,
    /// Open the add-book form.
    AddBook,
    /// Borrow the highlighted book.
    BorrowSelected,
    /// Return the highlighted book.
    ReturnSelected,
    /// Switch between the full catalogue and available books only.
    ToggleView,
    /// Show or hide the keybindings pane.
    ToggleHelp,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    /// Swallow the key.
    Ignore,
}

impl KeyAction {
    pub const ALL: [KeyAction; 11] = [
        KeyAction::Quit,
        KeyAction::AddBook,
        KeyAction::BorrowSelected,
        KeyAction::ReturnSelected,
        KeyAction::ToggleView,
        KeyAction::ToggleHelp,
        KeyAction::MoveUp,
        KeyAction::MoveDown,
        KeyAction::PageUp,
        KeyAction::PageDown,
        KeyAction::Ignore,
    ];

    /// Short label for the help pane.
    pub fn describe(self) -> &'static str {
        match self {
            KeyAction::Quit => "Quit",
            KeyAction::AddBook => "Add book",
            KeyAction::BorrowSelected => "Borrow selected",
            KeyAction::ReturnSelected => "Return selected",
            KeyAction::ToggleView => "All / available only",
            KeyAction::ToggleHelp => "Toggle this pane",
            KeyAction::MoveUp => "Move up",
            KeyAction::MoveDown => "Move down",
            KeyAction::PageUp => "Page up",
            KeyAction::PageDown => "Page down",
            KeyAction::Ignore => "Ignore",
        }
    }
}

/// Maps `(KeyModifiers, KeyCode)` pairs to [`KeyAction`]s.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Default bindings: letters for the lending actions, arrows and vim keys for navigation.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Esc), KeyAction::Ignore);
        bindings.insert((M::NONE, Char('a')), KeyAction::AddBook);
        bindings.insert((M::NONE, Char('n')), KeyAction::AddBook);
        bindings.insert((M::NONE, Char('b')), KeyAction::BorrowSelected);
        bindings.insert((M::NONE, Char('r')), KeyAction::ReturnSelected);
        bindings.insert((M::NONE, Tab), KeyAction::ToggleView);
        bindings.insert((M::NONE, Char('v')), KeyAction::ToggleView);
        bindings.insert((M::NONE, Char('?')), KeyAction::ToggleHelp);
        // Navigation
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);
        bindings.insert((M::NONE, Left), KeyAction::PageUp);
        bindings.insert((M::NONE, Right), KeyAction::PageDown);

        Self { bindings }
    }

    /// Load from `path`, or write the defaults there if it does not exist.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(err) = km.write_file(path) {
            tracing::warn!(path = %path.display(), error = %err, "cannot write default keybinds");
        }
        km
    }

    /// Load a keymap from a configuration file.
    ///
    /// Lines are `<Action> = <KeySpec>`. Starts from defaults and overrides
    /// with each valid line; comments and unknown entries are skipped.
    ///
    /// Returns `None` if the file cannot be read.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let lhs = parts.next().map(|s| s.trim()).unwrap_or("");
            let rhs = parts.next().map(|s| s.trim()).unwrap_or("");
            if lhs.is_empty() || rhs.is_empty() {
                continue;
            }
            match (parse_action(lhs), parse_key(rhs)) {
                (Some(action), Some(key)) => {
                    map.bindings.insert(key, action);
                }
                _ => tracing::debug!(line, "skipping keybind entry"),
            }
        }
        Some(map)
    }

    /// Write every binding to `path`, one `<Action> = <KeySpec>` per line.
    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# book-inventory keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+c, Enter, Esc, Tab, Up, Down, Left, Right, PageUp, PageDown, ?\n");
        buf.push_str("# Actions: Quit, AddBook, BorrowSelected, ReturnSelected, ToggleView, ToggleHelp, MoveUp, MoveDown, PageUp, PageDown, Ignore\n\n");

        let mut lines: Vec<String> = self
            .all_bindings()
            .into_iter()
            .map(|((mods, code), action)| format!("{} = {}", format_action(action), Self::format_key(mods, code)))
            .collect();
        lines.sort();
        for line in lines {
            let _ = writeln!(&mut buf, "{line}");
        }

        std::fs::write(path, buf)
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    pub fn all_bindings(&self) -> Vec<((KeyModifiers, KeyCode), KeyAction)> {
        self.bindings.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Keys bound to `action`, formatted and sorted.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((mods, code), _)| Self::format_key(*mods, *code))
            .collect();
        keys.sort();
        keys
    }

    /// Human-readable spec like "Ctrl+c" or "PageUp".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            BackTab => "BackTab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let (mods, rest) = match s.strip_prefix("Ctrl+") {
        Some(after) => (KeyModifiers::CONTROL, after),
        None => (KeyModifiers::NONE, s),
    };
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    KeyAction::ALL.into_iter().find(|a| format_action(*a) == s.trim())
}

pub fn format_action(a: KeyAction) -> &'static str {
    match a {
        KeyAction::Quit => "Quit",
        KeyAction::AddBook => "AddBook",
        KeyAction::BorrowSelected => "BorrowSelected",
        KeyAction::ReturnSelected => "ReturnSelected",
        KeyAction::ToggleView => "ToggleView",
        KeyAction::ToggleHelp => "ToggleHelp",
        KeyAction::MoveUp => "MoveUp",
        KeyAction::MoveDown => "MoveDown",
        KeyAction::PageUp => "PageUp",
        KeyAction::PageDown => "PageDown",
        KeyAction::Ignore => "Ignore",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn defaults_resolve() {
        let km = Keymap::default();
        assert_eq!(km.resolve(&press(KeyCode::Char('b'))), Some(KeyAction::BorrowSelected));
        assert_eq!(km.resolve(&press(KeyCode::Char('r'))), Some(KeyAction::ReturnSelected));
        assert_eq!(km.resolve(&press(KeyCode::Down)), Some(KeyAction::MoveDown));
        assert_eq!(
            km.resolve(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(km.resolve(&press(KeyCode::Char('z'))), None);
    }

    #[test]
    fn parse_key_specs() {
        assert_eq!(parse_key("Ctrl+q"), Some((KeyModifiers::CONTROL, KeyCode::Char('q'))));
        assert_eq!(parse_key("PageDown"), Some((KeyModifiers::NONE, KeyCode::PageDown)));
        assert_eq!(parse_key("?"), Some((KeyModifiers::NONE, KeyCode::Char('?'))));
        assert_eq!(parse_key("nope"), None);
    }

    #[test]
    fn action_names_roundtrip() {
        for a in KeyAction::ALL {
            assert_eq!(parse_action(format_action(a)), Some(a));
        }
    }

    #[test]
    fn keys_for_lists_all_bindings() {
        let km = Keymap::default();
        assert_eq!(km.keys_for(KeyAction::AddBook), vec!["a".to_string(), "n".to_string()]);
    }
}
