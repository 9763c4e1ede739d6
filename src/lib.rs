//! TUI Sokoban (workspace facade crate).
//!
//! Exposes the member crates as `tui_sokoban::{core,input,types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use tui_sokoban_core as core;
pub use tui_sokoban_input as input;
pub use tui_sokoban_types as types;
