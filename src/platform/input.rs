//! Input state written by the host's event handlers
//!
//! Read once per step. Hosts with input on another thread must marshal events
//! onto the simulation thread before touching this.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// A directional key axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// What a bound key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    Shoot,
}

/// Look up a key by its DOM-style name (`"ArrowLeft"`, `"a"`, `" "`)
pub fn key_action(key: &str) -> Option<KeyAction> {
    let action = match key {
        "ArrowLeft" => KeyAction::Move(Direction::Left),
        "ArrowRight" => KeyAction::Move(Direction::Right),
        "ArrowUp" => KeyAction::Move(Direction::Up),
        "ArrowDown" => KeyAction::Move(Direction::Down),
        " " | "Space" | "Spacebar" => KeyAction::Shoot,
        _ => {
            let mut chars = key.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return None;
            };
            match c.to_ascii_lowercase() {
                'a' => KeyAction::Move(Direction::Left),
                'd' => KeyAction::Move(Direction::Right),
                'w' => KeyAction::Move(Direction::Up),
                's' => KeyAction::Move(Direction::Down),
                _ => return None,
            }
        }
    };
    Some(action)
}

/// Held directions plus pointer/touch state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Pointer (mouse button or touch) is down
    pub pointer_active: bool,
    /// Last pointer position in field coordinates
    pub pointer: Vec2,
}

impl InputState {
    /// Press or release a direction. Pressing cancels pointer steering.
    pub fn set_direction(&mut self, direction: Direction, active: bool) {
        match direction {
            Direction::Left => self.left = active,
            Direction::Right => self.right = active,
            Direction::Up => self.up = active,
            Direction::Down => self.down = active,
        }
        if active {
            self.pointer_active = false;
        }
    }

    pub fn set_pointer_target(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    pub fn set_pointer_active(&mut self, active: bool) {
        self.pointer_active = active;
    }

    /// Release everything
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Sample for one step
    pub fn tick_input(&self) -> TickInput {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        TickInput {
            intent: Vec2::new(axis(self.left, self.right), axis(self.up, self.down)),
            pointer: self.pointer_active.then_some(self.pointer),
        }
    }
}
