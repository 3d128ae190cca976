pub mod app;
mod editor;
pub mod event;
mod page;

use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{self as ct_event, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use log::debug;
use ratatui::prelude::*;

use crate::store::TaskStore;
use crate::watch;
use app::App;
use event::KeyAction;

/// Run the interactive page until the user quits. The visit must already
/// have been recorded; `streak` is shown in the header.
pub fn run(
    db_path: &Path,
    store: &TaskStore,
    today: NaiveDate,
    streak: u32,
    poll_interval: u64,
) -> Result<()> {
    let mut app = App::new(store, today, streak)?;

    bracket(enter_page_mode, leave_page_mode, || {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        run_loop(&mut terminal, &mut app, db_path, store, poll_interval)
    })
}

/// Raw input on the alternate screen.
fn enter_page_mode() -> io::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)
}

/// Back to the normal screen. Both steps run even if the first fails.
fn leave_page_mode() -> io::Result<()> {
    let screen = execute!(io::stdout(), LeaveAlternateScreen);
    let raw = terminal::disable_raw_mode();
    screen.and(raw)
}

/// Runs `body` between `enter` and `leave`. `leave` runs on every exit path,
/// including a failed `enter`; the first error is the one returned.
fn bracket<T>(
    enter: impl FnOnce() -> io::Result<()>,
    leave: impl FnOnce() -> io::Result<()>,
    body: impl FnOnce() -> Result<T>,
) -> Result<T> {
    let result = enter().map_err(anyhow::Error::from).and_then(|()| body());
    let left = leave();
    let value = result?;
    left?;
    Ok(value)
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db_path: &Path,
    store: &TaskStore,
    poll_interval: u64,
) -> Result<()> {
    let poll_duration = Duration::from_millis(poll_interval);

    // Another process may edit the same database (e.g. `taskday add`)
    let (_watcher, rx) = watch::watch_db(db_path)?;

    loop {
        terminal.draw(|frame| page::render(frame, app))?;

        if ct_event::poll(poll_duration)? {
            if let Event::Key(key) = ct_event::read()? {
                if key.kind == KeyEventKind::Press {
                    match event::handle_key(app, key) {
                        KeyAction::Quit => return Ok(()),
                        KeyAction::Submit => app.submit_form(store),
                        KeyAction::ToggleCompleted => app.toggle_selected(store),
                        KeyAction::Delete => app.confirm_delete(store),
                        KeyAction::OpenEditor => {
                            if let Some(form) = app.form.as_mut() {
                                match editor::edit_description(terminal, &form.description) {
                                    Ok(text) => form.set_description(text),
                                    Err(e) => form.error = Some(format!("{e:#}")),
                                }
                            }
                        }
                        KeyAction::Refresh => {
                            app.toast = None;
                            app.error = None;
                            app.reload(store);
                        }
                        KeyAction::Continue => {}
                    }
                }
            }
        }

        // Check for file changes (non-blocking)
        if watch::wait_for_change(&rx, Duration::ZERO) {
            watch::drain_events(&rx);
            debug!("database changed on disk; reloading page");
            app.reload(store);
        }
    }
}
