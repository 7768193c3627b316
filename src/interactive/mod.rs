//! Interactive terminal dashboard
//!
//! Key figures, a category distribution, a daily totals chart and an
//! editable table of records, driven by a synchronous key event loop.

pub mod app;
pub mod daily_chart;
pub mod data_table;
pub mod editor;
pub mod events;
pub mod form;
pub mod form_ui;
pub mod messages;
pub mod summary_chart;
pub mod ui;
pub mod utils;

pub use app::App;
pub use events::{EventHandler, InputEvent};

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{error, info};

use crate::error::StoreError;
use crate::session::Session;

/// Run the interactive dashboard until the user quits
pub fn run_interactive(session: Session, load_error: Option<StoreError>) -> Result<()> {
    info!(path = %session.store().path().display(), "starting dashboard");

    let mut app = App::new(session, load_error);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = EventHandler::new();
    let res = run_app(&mut terminal, &mut app, || event_handler.next());

    // Restore terminal before reporting anything
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match &res {
        Ok(()) => info!("dashboard closed"),
        Err(err) => error!(error = ?err, "dashboard stopped"),
    }
    res
}

/// Main application loop; `next_event` blocks for at most one tick
fn run_app<B, F>(terminal: &mut Terminal<B>, app: &mut App, mut next_event: F) -> Result<()>
where
    B: ratatui::backend::Backend,
    F: FnMut() -> Result<InputEvent>,
{
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        match next_event()? {
            InputEvent::Key(key) => {
                if !app.handle_event(key)? {
                    break;
                }
            }
            InputEvent::Resize | InputEvent::Tick => {}
        }
    }

    Ok(())
}


// Made with Bob
