//! Error types surfaced by the game core.
//!
//! Illegal moves are not errors: they come back as
//! [`MoveOutcome::Rejected`](crate::resolver::MoveOutcome::Rejected). The
//! variants here cover precondition violations, bad configuration, and
//! failures raised by registered listeners.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

/// Boxed error type carried by listener failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to start the game: no levels defined")]
    NoLevels,

    #[error("a game is already running")]
    AlreadyRunning,

    #[error("no game is running")]
    NotRunning,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Listener(#[from] ListenerError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("starting lives must be at least 1")]
    NoStartingLives,

    #[error("max lives ({max}) is below starting lives ({starting})")]
    MaxBelowStarting { starting: u32, max: u32 },

    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("level {name:?}: expected {expected} tiles for {width}x{height}, got {actual}")]
    SizeMismatch {
        name: String,
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("level {name:?}: row {row} has {actual} columns, expected {expected}")]
    RaggedRows {
        name: String,
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("level {name:?}: unknown glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph {
        name: String,
        glyph: char,
        x: usize,
        y: usize,
    },
}

/// A failure raised by a lifecycle or board listener.
///
/// Dispatch stops at the first failing listener and the error reaches the
/// caller of the command that triggered it. Game state is already committed
/// by then.
#[derive(Debug, Error)]
#[error("listener {listener} failed")]
pub struct ListenerError {
    pub listener: &'static str,
    #[source]
    pub source: BoxError,
}

impl ListenerError {
    pub fn new(listener: &'static str, source: impl Into<BoxError>) -> Self {
        Self {
            listener,
            source: source.into(),
        }
    }
}
