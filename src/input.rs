//! Keyboard mapping
//!
//! Arrow keys and WASD steer, q / Esc / Ctrl+C quit. Everything else is
//! ignored.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    Quit,
    None,
}

/// What the loop gathered from the event queue during one iteration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// Last direction key pressed, if any
    pub direction: Option<Direction>,
    pub quit: bool,
}

impl InputState {
    /// Fold one key action in. Later direction keys win.
    pub fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Steer(dir) => self.direction = Some(dir),
            KeyAction::Quit => self.quit = true,
            KeyAction::None => {}
        }
    }
}

#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Only presses (and held-key repeats) count, not releases
        if key.kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up => KeyAction::Steer(Direction::Up),
            KeyCode::Down => KeyAction::Steer(Direction::Down),
            KeyCode::Left => KeyAction::Steer(Direction::Left),
            KeyCode::Right => KeyAction::Steer(Direction::Right),

            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Steer(Direction::Right),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}
