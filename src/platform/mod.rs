//! Platform abstraction layer
//!
//! Collaborators that sit between the host and the simulation:
//! - Input events (keys, pointer/touch) folded into per-step intent
//! - Frame timestamps turned into clamped deltas

pub mod input;
pub mod time;

pub use input::{Direction, InputState, KeyAction, key_action};
pub use time::FrameClock;
