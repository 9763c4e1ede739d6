//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameCommand`] for the
//! host loop to hand to the controller. Moves are turn based, so there is no
//! auto-repeat handling beyond dropping key-release events.

pub mod map;

pub use tui_sokoban_types as types;

pub use map::{handle_key_event, should_quit};
