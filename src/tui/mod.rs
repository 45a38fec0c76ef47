// TUI module - Terminal User Interface
//
// Owns the terminal for the lifetime of the session: raw mode and the
// alternate screen go up here and come down here, and in between the
// event loop multiplexes keyboard input, animation ticks and fetch
// outcomes while driving the page loader from what is on screen.

pub mod app;
pub mod scroll;
pub mod theme;
pub mod ui;

use crate::config::Config;
use crate::gallery::FetchOutcome;
use crate::logging::LogBuffer;
use crate::source::ListingSource;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop until the user quits, and
/// restores the terminal whatever way the loop ended. Restore runs even
/// when the loop returns an error, so a crash doesn't leave the shell in
/// raw mode.
pub async fn run_tui(
    config: Config,
    source: Arc<dyn ListingSource>,
    log_buffer: LogBuffer,
) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Fetch tasks report back over this channel. Capacity is generous:
    // the loader never has more than one page in flight.
    let (outcome_tx, mut outcome_rx) = mpsc::channel::<FetchOutcome>(8);

    let mut app = App::new(source, outcome_tx, &config, log_buffer);
    app.kick_off();

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app, &mut outcome_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Three things can wake an iteration: keyboard or mouse input, the
/// animation tick, and a fetch outcome landing on the channel. They race
/// in a tokio::select! and the frame is redrawn after whichever wins.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    outcome_rx: &mut mpsc::Receiver<FetchOutcome>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(120));

    loop {
        // Work out how many image rows fit this frame, then let the app
        // clamp scrolling and check whether the end of the list is on
        // screen. The same row count feeds the draw below, so the fetch
        // decision always matches what the user actually sees.
        let size = terminal.size().context("Failed to read terminal size")?;
        app.prepare_frame(ui::gallery_rows(size.height, app.show_logs));

        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            // Periodic tick for spinner animation
            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            // A background fetch finished
            Some(outcome) = outcome_rx.recv() => {
                app.on_outcome(outcome);
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Raw mode swallows the usual SIGINT, so Ctrl+C arrives as a key
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Esc => {
            if app.show_help {
                app.toggle_help();
            }
        }
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::PageDown => app.page_down(),
        KeyCode::Home | KeyCode::Char('g') => app.scroll_to_top(),
        KeyCode::End | KeyCode::Char('G') => app.scroll_to_bottom(),
        KeyCode::Char('r') => app.request_retry(),
        KeyCode::Char('l') => app.toggle_logs(),
        KeyCode::Char('t') => app.next_theme(),
        KeyCode::Char('?') => app.toggle_help(),
        _ => {}
    }
}

/// Handle mouse input - the wheel scrolls one image at a time
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::ScrollUp => app.scroll_up(),
        MouseEventKind::ScrollDown => app.scroll_down(),
        _ => {}
    }
}
