use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::controller::ControlInput;
use crate::game::{Difficulty, Direction};

/// Decodes terminal events into controller inputs
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Returns `None` for events that are not player input at all
    /// (key releases, mouse moves, resizes, focus changes)
    pub fn handle_event(&self, event: &Event) -> Option<ControlInput> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Some(self.handle_key_event(*key))
            }
            Event::Mouse(mouse) => self.handle_mouse_event(*mouse),
            _ => None,
        }
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> ControlInput {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return ControlInput::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => ControlInput::Turn(Direction::Up),
            KeyCode::Down => ControlInput::Turn(Direction::Down),
            KeyCode::Left => ControlInput::Turn(Direction::Left),
            KeyCode::Right => ControlInput::Turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w' | 'W') => ControlInput::Turn(Direction::Up),
            KeyCode::Char('s' | 'S') => ControlInput::Turn(Direction::Down),
            KeyCode::Char('a' | 'A') => ControlInput::Turn(Direction::Left),
            KeyCode::Char('d' | 'D') => ControlInput::Turn(Direction::Right),

            // Difficulty menu
            KeyCode::Char(c @ '1'..='3') => Difficulty::from_menu_key(c)
                .map(ControlInput::Choose)
                .unwrap_or(ControlInput::Other),

            // Controls
            KeyCode::Char('p' | 'P' | ' ') => ControlInput::TogglePause,
            KeyCode::Char('r' | 'R') => ControlInput::Restart,
            KeyCode::Char('q' | 'Q') => ControlInput::Quit,
            KeyCode::Esc => ControlInput::Forfeit,

            _ => ControlInput::Other,
        }
    }

    /// Only left-button presses count; the position is resolved by the caller
    pub fn handle_mouse_event(&self, mouse: MouseEvent) -> Option<ControlInput> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(ControlInput::Pointer {
                column: mouse.column,
                row: mouse.row,
            }),
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
