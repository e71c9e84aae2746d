//! Keyboard state to per-tick intent

use crate::sim::ActorIntent;

/// Logical keys the games react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
    Pause,
    Quit,
}

impl Key {
    /// Default keyboard layout for scripted/headless input
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' | 'h' => Some(Key::Left),
            'd' | 'l' => Some(Key::Right),
            'w' | 'k' | ' ' => Some(Key::Jump),
            'p' => Some(Key::Pause),
            'q' => Some(Key::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(Key),
    Up(Key),
}

/// Held keys plus one-shot presses not yet consumed by a tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    /// Jump pressed since the last tick
    pub jump: bool,
    /// Pause toggle requested
    pub pause: bool,
    pub quit: bool,
}

impl InputState {
    pub fn apply(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Down(Key::Left) => self.left = true,
            KeyEvent::Up(Key::Left) => self.left = false,
            KeyEvent::Down(Key::Right) => self.right = true,
            KeyEvent::Up(Key::Right) => self.right = false,
            KeyEvent::Down(Key::Jump) => self.jump = true,
            KeyEvent::Down(Key::Pause) => self.pause = true,
            KeyEvent::Down(Key::Quit) => self.quit = true,
            KeyEvent::Up(_) => {}
        }
    }

    /// Intent for the next tick
    pub fn intent(&self) -> ActorIntent {
        ActorIntent {
            left: self.left,
            right: self.right,
            jump: self.jump,
        }
    }

    /// Clear one-shot inputs after a tick has processed them
    pub fn end_tick(&mut self) {
        self.jump = false;
        self.pause = false;
    }
}
