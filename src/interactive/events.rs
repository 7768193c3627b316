//! Terminal input for the dashboard loop

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::time::Duration;

/// What woke the loop up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// The terminal changed size; the next draw adapts the layout
    Resize,
    /// Nothing happened before the poll timed out
    Tick,
}

/// Polls crossterm for input with a fixed timeout so expiring messages
/// still get redrawn while the user is idle
pub struct EventHandler {
    tick: Duration,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::with_tick(Duration::from_millis(250))
    }

    pub fn with_tick(tick: Duration) -> Self {
        Self { tick }
    }

    /// Wait up to one tick for the next event
    pub fn next(&self) -> Result<InputEvent> {
        if !event::poll(self.tick)? {
            return Ok(InputEvent::Tick);
        }
        Ok(match event::read()? {
            // Windows also reports key releases
            Event::Key(key) if key.kind == KeyEventKind::Press => InputEvent::Key(key),
            Event::Resize(_, _) => InputEvent::Resize,
            _ => InputEvent::Tick,
        })
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
