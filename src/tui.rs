use std::{io, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::app::App;
use crate::client::AskClient;
use crate::events::handle_event;
use crate::ui::draw_ui;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Leaves raw mode and the alternate screen when dropped, including on early
/// returns while the terminal is still being set up.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste)
            .context("Failed to enter alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::error!("Failed to disable raw mode: {}", e);
        }
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste) {
            tracing::error!("Failed to leave alternate screen: {}", e);
        }
    }
}

/// Runs the full-screen panel until the user quits.
pub async fn run(client: AskClient) -> Result<()> {
    tracing::info!("Starting terminal UI against {}", client.endpoint());

    let guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(client);
    let res = run_app(&mut terminal, &mut app).await;

    drop(guard);
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!("Terminal UI failed: {:?}", err);
    }
    res
}

pub async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.process_replies();
        app.on_tick();

        terminal.draw(|f| draw_ui(f, app))?;

        if event::poll(POLL_INTERVAL)? && handle_event(app, event::read()?) {
            tracing::info!("Quit requested");
            return Ok(());
        }
    }
}
