//! Command-line and environment configuration.
//!
//! Flags can also be supplied through `BOOK_INVENTORY_*` environment variables.
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::logging::EventSink;

/// Where inventory events are reported.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum EventsTarget {
    /// `LOG: <line>` on stdout.
    Console,
    /// `tracing` info events.
    Tracing,
    /// Append to `--events-file`.
    File,
    None,
}

#[derive(Debug, Parser)]
#[command(name = "book-inventory", version, about = "Track an in-memory library book inventory")]
pub struct Cli {
    /// Run the full-screen dashboard instead of the numbered menu.
    #[arg(long, env = "BOOK_INVENTORY_TUI")]
    pub tui: bool,

    /// Destination for add/borrow/return events.
    #[arg(long, value_enum, default_value_t = EventsTarget::Console, env = "BOOK_INVENTORY_EVENTS")]
    pub events: EventsTarget,

    /// File used when `--events file` is selected.
    #[arg(long, env = "BOOK_INVENTORY_EVENTS_FILE")]
    pub events_file: Option<PathBuf>,

    /// Diagnostic filter used when RUST_LOG is unset.
    #[arg(long, default_value = "warn", env = "BOOK_INVENTORY_LOG_LEVEL")]
    pub log_level: String,

    /// Write diagnostics to this file instead of stderr.
    #[arg(long, env = "BOOK_INVENTORY_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Directory holding theme.conf and keybinds.conf.
    #[arg(long, env = "BOOK_INVENTORY_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,
}

impl Cli {
    /// Event destination actually used.
    ///
    /// `console` becomes `tracing` in dashboard mode since stdout belongs to
    /// the terminal UI there.
    pub fn events_target(&self) -> EventsTarget {
        match self.events {
            EventsTarget::Console if self.tui => EventsTarget::Tracing,
            other => other,
        }
    }

    /// Build the event sink for [`Cli::events_target`].
    pub fn event_sink(&self) -> anyhow::Result<EventSink> {
        match self.events_target() {
            EventsTarget::Console => Ok(EventSink::console()),
            EventsTarget::Tracing => Ok(EventSink::tracing()),
            EventsTarget::File => {
                let path = self
                    .events_file
                    .as_ref()
                    .ok_or_else(|| anyhow::anyhow!("--events file requires --events-file <PATH>"))?;
                EventSink::file(path)
            }
            EventsTarget::None => Ok(EventSink::silent()),
        }
    }

    /// Resolved configuration directory.
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone().unwrap_or_else(default_config_dir)
    }
}

/// `$XDG_CONFIG_HOME/book-inventory`, else `$HOME/.config/book-inventory`,
/// else the working directory.
pub fn default_config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join("book-inventory");
    }
    if let Some(home) = std::env::var_os("HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(home).join(".config").join("book-inventory");
    }
    PathBuf::from(".")
}

/// Path of `name` inside `dir`, creating `dir` when possible.
pub fn config_file_path(dir: &std::path::Path, name: &str) -> PathBuf {
    if let Err(err) = std::fs::create_dir_all(dir) {
        tracing::warn!(dir = %dir.display(), error = %err, "cannot create config directory");
    }
    dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["book-inventory"]).unwrap();
        assert!(!cli.tui);
        assert_eq!(cli.events, EventsTarget::Console);
        assert_eq!(cli.log_level, "warn");
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn console_events_move_to_tracing_in_dashboard() {
        let shell = Cli::try_parse_from(["book-inventory", "--events", "console"]).unwrap();
        assert_eq!(shell.events_target(), EventsTarget::Console);

        let tui = Cli::try_parse_from(["book-inventory", "--tui", "--events", "console"]).unwrap();
        assert_eq!(tui.events_target(), EventsTarget::Tracing);

        let tui_none = Cli::try_parse_from(["book-inventory", "--tui", "--events", "none"]).unwrap();
        assert_eq!(tui_none.events_target(), EventsTarget::None);
    }

    #[test]
    fn file_events_need_a_path() {
        let cli = Cli::try_parse_from(["book-inventory", "--events", "file"]).unwrap();
        assert!(cli.event_sink().is_err());
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from([
            "book-inventory",
            "--tui",
            "--events",
            "none",
            "--log-level",
            "debug",
            "--config-dir",
            "/tmp/bi",
        ])
        .unwrap();
        assert!(cli.tui);
        assert_eq!(cli.events, EventsTarget::None);
        assert_eq!(cli.log_level, "debug");
        assert_eq!(cli.config_dir(), PathBuf::from("/tmp/bi"));
        assert!(cli.event_sink().is_ok());
    }
}
