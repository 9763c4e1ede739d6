//! Core game logic - levels, move resolution, lifecycle, and events
//!
//! Everything here is synchronous and free of terminal or network I/O. Views
//! attach as listeners and are called before each command returns.
//!
//! # Module Structure
//!
//! - [`level`]: authored level grids and level packs
//! - [`board`]: normalized terrain, crate grid, and player for the active level
//! - [`resolver`]: one directional step with GHOST, STRENGTH, and PULL
//! - [`controller`]: start/advance/reset/stop/pause, lives and score
//! - [`events`]: lifecycle and board-ready listeners and their dispatcher
//! - [`config`]: starting and maximum lives
//! - [`snapshot`]: detached query view of the controller
//!
//! # Rules
//!
//! - Each accepted move scores one point for the current level
//! - A level is solved when every crate rests on a target spot
//! - Solving a level folds its score into the total and loads the next one
//! - Resetting a level costs a life; resetting with none left ends the game
//!
//! # Example
//!
//! ```
//! use tui_sokoban_core::{GameConfig, GameController, Level, LevelPack};
//! use tui_sokoban_types::Direction;
//!
//! let level = Level::from_rows("intro", &["#####", "#@$x#", "#####"]).unwrap();
//! let pack = LevelPack::new("demo", vec![level]);
//!
//! let mut game = GameController::new(GameConfig::default(), pack).unwrap();
//! game.start_game().unwrap();
//!
//! // Pushing the crate onto the only target clears the only level
//! let outcome = game.move_player(Direction::Right).unwrap();
//! assert!(outcome.report().unwrap().solved);
//! assert!(!game.is_running());
//! ```

pub mod board;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod level;
pub mod resolver;
pub mod snapshot;

pub use tui_sokoban_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardState, CrateGrid};
pub use config::GameConfig;
pub use controller::{GameController, LevelAdvance};
pub use error::{ConfigError, GameError, LevelError, ListenerError, Result};
pub use events::{
    BoardListener, BoardReady, EventDispatcher, LifecycleEvent, LifecycleListener, ListenerId,
    TracingListener,
};
pub use level::{Level, LevelPack};
pub use resolver::{collect_pickup, resolve_move, DeltaSet, MoveOutcome, MoveReport, RejectReason};
pub use snapshot::GameSnapshot;
