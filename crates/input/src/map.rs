//! Keyboard bindings.
//!
//! Arrow keys plus the vim and WASD letter clusters steer the piece. Letter
//! bindings match either case so caps lock never changes the game.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Translates one key event into a game command, if the key is bound.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Left => Some(Command::MoveLeft),
        KeyCode::Right => Some(Command::MoveRight),
        KeyCode::Down => Some(Command::SoftDrop),
        KeyCode::Up => Some(Command::Rotate),
        KeyCode::Char(c) => char_command(c),
        _ => None,
    }
}

fn char_command(c: char) -> Option<Command> {
    let command = match c.to_ascii_lowercase() {
        'h' | 'a' => Command::MoveLeft,
        'l' | 'd' => Command::MoveRight,
        'j' | 's' => Command::SoftDrop,
        'k' | 'w' => Command::Rotate,
        ' ' => Command::HardDrop,
        'c' => Command::Hold,
        'p' => Command::TogglePause,
        'r' => Command::Restart,
        _ => return None,
    };
    Some(command)
}

/// True for the bindings that leave the game entirely (q or ctrl-c).
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
