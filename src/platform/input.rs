//! Keyboard input mapping
//!
//! Key events arrive between ticks and mutate [`InputState`]; every tick
//! consumes a [`TickInput`] snapshot of it.

use crate::sim::{Direction, DirectionFlags, TickInput};

/// Keys that steer the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    PageUp,
    PageDown,
    End,
    Home,
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
}

impl Key {
    /// Map a DOM `keyCode`
    pub fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            33 => Key::PageUp,
            34 => Key::PageDown,
            35 => Key::End,
            36 => Key::Home,
            37 => Key::ArrowLeft,
            38 => Key::ArrowUp,
            39 => Key::ArrowRight,
            40 => Key::ArrowDown,
            _ => return None,
        })
    }

    /// Map a DOM `KeyboardEvent.key` name
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            "End" => Key::End,
            "Home" => Key::Home,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowDown" | "Down" => Key::ArrowDown,
            _ => return None,
        })
    }

    pub fn direction(&self) -> Direction {
        match self {
            Key::PageUp => Direction::NorthEast,
            Key::PageDown => Direction::SouthEast,
            Key::End => Direction::SouthWest,
            Key::Home => Direction::NorthWest,
            Key::ArrowLeft => Direction::Left,
            Key::ArrowUp => Direction::Up,
            Key::ArrowRight => Direction::Right,
            Key::ArrowDown => Direction::Down,
        }
    }
}

/// Keyboard state shared between event handlers and the tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    flags: DirectionFlags,
    /// Last pressed direction; survives key release
    direction: Option<Direction>,
    idle_mode: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        let direction = key.direction();
        self.flags.set(direction, true);
        self.direction = Some(direction);
    }

    /// Releasing a key clears only its own flag
    pub fn key_up(&mut self, key: Key) {
        self.flags.set(key.direction(), false);
    }

    pub fn idle_mode(&self) -> bool {
        self.idle_mode
    }

    /// Flip idle/demo mode, returning the new state
    pub fn toggle_idle(&mut self) -> bool {
        self.idle_mode = !self.idle_mode;
        log::info!("Idle mode: {}", self.idle_mode);
        self.idle_mode
    }

    pub fn set_idle(&mut self, idle: bool) {
        self.idle_mode = idle;
    }

    pub fn snapshot(&self) -> TickInput {
        TickInput {
            flags: self.flags,
            direction: self.direction,
            idle_mode: self.idle_mode,
        }
    }
}
