//! Terminal lifecycle for the dashboard: raw mode, alternate screen, and
//! restoring both on exit, on setup failure, and on panic.
use anyhow::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type CrosstermTerminal = Terminal<CrosstermBackend<std::io::Stdout>>;

/// Run `enter`, then `setup`. If `setup` fails, `undo` runs before the error
/// is returned; if `enter` fails there is nothing to undo.
pub fn enter_then_setup<T>(
    enter: impl FnOnce() -> Result<()>,
    setup: impl FnOnce() -> Result<T>,
    undo: impl FnOnce(),
) -> Result<T> {
    enter()?;
    setup().inspect_err(|_| undo())
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
pub fn init_terminal() -> Result<CrosstermTerminal> {
    enter_then_setup(
        || Ok(enable_raw_mode()?),
        || {
            let mut stdout = std::io::stdout();
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
            Ok(Terminal::new(CrosstermBackend::new(stdout))?)
        },
        reset_terminal_modes,
    )
}

/// Leave raw mode and the alternate screen without a `Terminal` handle.
pub fn reset_terminal_modes() {
    disable_raw_mode().ok();
    execute!(std::io::stdout(), LeaveAlternateScreen, DisableMouseCapture).ok();
}

/// Restore the terminal before the default panic message is printed.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        reset_terminal_modes();
        default_hook(info);
    }));
}

pub fn restore_terminal(terminal: &mut CrosstermTerminal) {
    reset_terminal_modes();
    terminal.show_cursor().ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn failed_setup_is_rolled_back() {
        let undone = Cell::new(false);
        let res: Result<()> = enter_then_setup(
            || Ok(()),
            || Err(anyhow::anyhow!("no tty")),
            || undone.set(true),
        );
        assert!(res.is_err());
        assert!(undone.get());
    }

    #[test]
    fn successful_setup_keeps_modes() {
        let undone = Cell::new(false);
        let res = enter_then_setup(|| Ok(()), || Ok(7), || undone.set(true));
        assert_eq!(res.unwrap(), 7);
        assert!(!undone.get());
    }

    #[test]
    fn failed_enter_skips_setup_and_undo() {
        let ran = Cell::new(0);
        let res: Result<()> = enter_then_setup(
            || Err(anyhow::anyhow!("raw mode")),
            || {
                ran.set(ran.get() + 1);
                Ok(())
            },
            || ran.set(ran.get() + 10),
        );
        assert!(res.is_err());
        assert_eq!(ran.get(), 0);
    }
}
