//! Terminal User Interface for nodescale
//!
//! This module provides an interactive TUI for managing node-pool
//! autoscaling. It features:
//! - A filterable cluster table with autoscale toggles and bound editing
//! - A schedule composer with a hierarchical resource tree
//! - Dual-channel event architecture (priority input, droppable ticks)
//! - Keyboard-driven navigation

pub mod app;
pub mod event;
pub mod runtime;
pub mod theme;
pub mod ui;

use std::io::{self, IsTerminal, stdout};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use crate::models::TuiConfig;
use crate::tui::app::App;
use crate::tui::event::InputEvent;
use crate::tui::runtime::{
    TuiRuntime, create_channels, run_event_loop, spawn_input_task, spawn_tick_task,
};

/// Terminal capability requirements for TUI mode
#[derive(Debug)]
pub struct TerminalCapabilities {
    pub is_tty: bool,
    pub term_type: String,
    pub supports_alternate_screen: bool,
}

impl TerminalCapabilities {
    /// Detect terminal capabilities
    pub fn detect() -> Self {
        Self::from_parts(stdout().is_terminal(), std::env::var("TERM").unwrap_or_default())
    }

    fn from_parts(is_tty: bool, term_type: String) -> Self {
        let supports_alternate_screen = !matches!(term_type.as_str(), "dumb" | "" | "unknown");
        Self {
            is_tty,
            term_type,
            supports_alternate_screen,
        }
    }

    /// Check if terminal is suitable for TUI mode
    pub fn is_suitable(&self) -> bool {
        self.is_tty && self.supports_alternate_screen
    }

    /// Get error message for unsuitable terminal
    pub fn error_message(&self) -> String {
        if !self.is_tty {
            "TUI mode requires an interactive terminal (stdout is not a TTY).\n\
             Hint: Use 'nodescale list' or 'nodescale schedules' instead."
                .to_string()
        } else if !self.supports_alternate_screen {
            format!(
                "Terminal type '{}' may not support TUI mode.\n\
                 Hint: Set TERM to a supported value (e.g., xterm-256color) or use CLI mode.",
                if self.term_type.is_empty() {
                    "(unset)"
                } else {
                    &self.term_type
                }
            )
        } else {
            "Unknown terminal capability issue.".to_string()
        }
    }
}

/// Run the TUI application
pub async fn run_tui() -> Result<()> {
    let capabilities = TerminalCapabilities::detect();
    if !capabilities.is_suitable() {
        bail!("{}", capabilities.error_message());
    }

    let (config, warnings) = TuiConfig::load();
    let tick = Duration::from_millis(config.behavior.tick_millis);
    let mut app = App::new(config, warnings);
    apply_initial_size(&mut app, crossterm::terminal::size());

    let mut terminal = setup_terminal()?;

    let (input_tx, input_rx, data_tx, data_rx) = create_channels();

    let mut runtime = TuiRuntime::new();
    runtime.track(spawn_input_task(input_tx, runtime.cancel_token()));
    runtime.track(spawn_tick_task(data_tx, runtime.cancel_token(), tick));

    tracing::info!("starting TUI");
    let result = run_event_loop(app, input_rx, data_rx, |app| {
        terminal.draw(|frame| ui::render(app, frame))?;
        Ok(())
    })
    .await;

    runtime.shutdown().await;
    restore_terminal(&mut terminal)?;

    result.map(|_| ())
}

/// Size the lists before the first frame; later resizes arrive as events
fn apply_initial_size(app: &mut App, size: io::Result<(u16, u16)>) {
    match size {
        Ok((width, height)) => {
            app.handle_input(InputEvent::Resize(width, height));
        }
        Err(e) => tracing::warn!("could not read terminal size: {}", e),
    }
}

/// Setup the terminal for TUI mode
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI with the tokio runtime (entry point from main)
pub fn run() -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    rt.block_on(run_tui())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities() {
        assert!(TerminalCapabilities::from_parts(true, "xterm-256color".into()).is_suitable());

        let piped = TerminalCapabilities::from_parts(false, "xterm".into());
        assert!(!piped.is_suitable());
        assert!(piped.error_message().contains("not a TTY"));

        let dumb = TerminalCapabilities::from_parts(true, String::new());
        assert!(!dumb.is_suitable());
        assert!(dumb.error_message().contains("(unset)"));
    }

    #[test]
    fn test_initial_size() {
        let mut app = App::new(TuiConfig::default(), Vec::new());
        apply_initial_size(&mut app, Err(io::Error::other("no tty")));
        assert_eq!(app.clusters_view.list_state.visible_count, 0);

        apply_initial_size(&mut app, Ok((100, 30)));
        assert_eq!(app.clusters_view.list_state.visible_count, 20);
    }
}
