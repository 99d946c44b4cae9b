//! Terminal input for the game loop.
//!
//! Maps crossterm events onto the two inputs the core knows about. Left
//! mouse button, Space, Enter and Up all count as a click.

use crate::core::game_loop::{InputEvent, InputSource};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::io;
use std::time::Duration;

/// Translate one terminal event. Anything unrecognised maps to `None`.
pub fn map_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse),
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<InputEvent> {
    // Windows reports releases too; only presses count.
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Up => Some(InputEvent::Click),
        _ => None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Option<InputEvent> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::Click),
        _ => None,
    }
}

/// Reads the process terminal through crossterm's global event queue.
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl InputSource for CrosstermInput {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>> {
        let mut timeout = timeout;
        while event::poll(timeout)? {
            if let Some(mapped) = map_event(&event::read()?) {
                return Ok(Some(mapped));
            }
            // Skip ignored events without waiting again.
            timeout = Duration::ZERO;
        }
        Ok(None)
    }
}
