//! book-inventory binary entry point.
//!
//! Runs the numbered console menu by default, or the full-screen dashboard
//! with `--tui`. In dashboard mode the terminal is put in raw mode and
//! restored on exit.
//!
use anyhow::{Context, Result};
use book_inventory::app::terminal::{init_terminal, install_panic_hook, restore_terminal};
use book_inventory::app::{self, AppState, Theme, keymap::Keymap};
use book_inventory::config::{Cli, config_file_path};
use book_inventory::logging::{self, EventSink};
use book_inventory::{Inventory, shell::Shell};
use clap::Parser;

fn run_shell(sink: EventSink) -> Result<()> {
    let mut inventory = Inventory::with_sink(sink);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut shell = Shell::new(&mut inventory, stdin.lock(), stdout.lock());
    shell.run()
}

fn run_dashboard(cli: &Cli, sink: EventSink) -> Result<()> {
    let dir = cli.config_dir();
    let theme = Theme::load_or_init(&config_file_path(&dir, "theme.conf"));
    let keymap = Keymap::load_or_init(&config_file_path(&dir, "keybinds.conf"));

    let (memory, activity) = EventSink::memory();
    let inventory = Inventory::with_sink(memory.fanout(sink));
    let mut app = AppState::new(inventory, activity, theme, keymap);

    install_panic_hook();
    let mut terminal = init_terminal().context("init terminal")?;
    let res = app::run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);
    res
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_level, cli.log_file.as_deref(), cli.tui)?;
    let sink = cli.event_sink()?;
    tracing::info!(tui = cli.tui, events = ?cli.events_target(), "starting");

    if cli.tui {
        run_dashboard(&cli, sink)
    } else {
        run_shell(sink)
    }
}
