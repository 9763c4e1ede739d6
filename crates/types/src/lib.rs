//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with serde derives, usable from the game core,
//! the input mapping, and any view that wants to ship state around.
//!
//! # Coordinates
//!
//! Positions are `(x, y)` pairs where `x` is the column and `y` the row.
//! `y` grows downward, so [`Direction::Up`] is `(0, -1)`.
//!
//! # Tile Glyphs
//!
//! Levels can be written as ASCII rows:
//!
//! | Glyph | Tile |
//! |-------|------|
//! | `.` or space | [`Tile::Floor`] |
//! | `#` | [`Tile::Wall`] |
//! | `$` | [`Tile::Crate`] (spawn marker) |
//! | `x` | [`Tile::TargetSpot`] |
//! | `@` | [`Tile::Player`] (spawn marker) |
//! | `g` | [`Tile::GhostPickup`] |
//! | `s` | [`Tile::StrengthPickup`] |
//! | `p` | [`Tile::PullPickup`] |
//!
//! # Examples
//!
//! ```
//! use tui_sokoban_types::{Direction, GameCommand, Position, PowerUps, Tile};
//!
//! let pos = Position::new(1, 1);
//! assert_eq!(pos.offset(Direction::Right), Position::new(2, 1));
//! assert_eq!(pos.step_back(Direction::Right), Position::new(0, 1));
//!
//! assert_eq!(Tile::from_glyph('#'), Some(Tile::Wall));
//! assert_eq!(Tile::GhostPickup.pickup(), Some(PowerUps::GHOST));
//!
//! let cmd = GameCommand::from_str("moveLeft").unwrap();
//! assert_eq!(cmd, GameCommand::Move(Direction::Left));
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Lives granted when a game starts, unless configured otherwise
pub const DEFAULT_STARTING_LIVES: u32 = 3;

/// Upper bound on lives reported to views, unless configured otherwise
pub const DEFAULT_MAX_LIVES: u32 = 5;

/// Most crates a single move can displace: a STRENGTH push moves two, a PULL one more.
pub const MAX_MOVE_DELTAS: usize = 3;

/// Points awarded per accepted move
pub const POINTS_PER_MOVE: u32 = 1;

/// Level tiles as authored.
///
/// [`Tile::Crate`] and [`Tile::Player`] are spawn markers: once a level is
/// normalized they are replaced by [`Tile::Floor`] and tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tile {
    #[default]
    Floor,
    Wall,
    Crate,
    TargetSpot,
    Player,
    GhostPickup,
    StrengthPickup,
    PullPickup,
}

impl Tile {
    /// Parse a tile from its ASCII glyph
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_sokoban_types::Tile;
    ///
    /// assert_eq!(Tile::from_glyph('.'), Some(Tile::Floor));
    /// assert_eq!(Tile::from_glyph(' '), Some(Tile::Floor));
    /// assert_eq!(Tile::from_glyph('@'), Some(Tile::Player));
    /// assert_eq!(Tile::from_glyph('?'), None);
    /// ```
    pub fn from_glyph(c: char) -> Option<Self> {
        match c {
            '.' | ' ' => Some(Tile::Floor),
            '#' => Some(Tile::Wall),
            '$' => Some(Tile::Crate),
            'x' | 'X' => Some(Tile::TargetSpot),
            '@' => Some(Tile::Player),
            'g' | 'G' => Some(Tile::GhostPickup),
            's' | 'S' => Some(Tile::StrengthPickup),
            'p' | 'P' => Some(Tile::PullPickup),
            _ => None,
        }
    }

    /// Canonical glyph for this tile
    pub fn glyph(&self) -> char {
        match self {
            Tile::Floor => '.',
            Tile::Wall => '#',
            Tile::Crate => '$',
            Tile::TargetSpot => 'x',
            Tile::Player => '@',
            Tile::GhostPickup => 'g',
            Tile::StrengthPickup => 's',
            Tile::PullPickup => 'p',
        }
    }

    /// Whether this tile only marks a spawn point and never survives normalization
    pub fn is_spawn_marker(&self) -> bool {
        matches!(self, Tile::Crate | Tile::Player)
    }

    /// Power-up granted by stepping on this tile, if any
    pub fn pickup(&self) -> Option<PowerUps> {
        match self {
            Tile::GhostPickup => Some(PowerUps::GHOST),
            Tile::StrengthPickup => Some(PowerUps::STRENGTH),
            Tile::PullPickup => Some(PowerUps::PULL),
            _ => None,
        }
    }
}

/// A cell coordinate: `x` is the column, `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// One cell further along `dir`
    pub fn offset(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// One cell against `dir`
    pub fn step_back(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x - dx, self.y - dy)
    }
}

/// Movement of a single crate within one move (used for incremental redraws)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrateDelta {
    pub from: Position,
    pub to: Position,
}

impl CrateDelta {
    pub const fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }
}

/// The four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step `(dx, dy)` for this direction
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_sokoban_types::Direction;
    ///
    /// assert_eq!(Direction::Right.delta(), (1, 0));
    /// assert_eq!(Direction::Left.delta(), (-1, 0));
    /// assert_eq!(Direction::Up.delta(), (0, -1));
    /// assert_eq!(Direction::Down.delta(), (0, 1));
    /// ```
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

bitflags! {
    /// Active one-shot power-ups.
    ///
    /// Each flag applies to the next move that triggers it and is then cleared.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct PowerUps: u8 {
        /// Walk through a wall once
        const GHOST    = 1 << 0;
        /// Push two stacked crates once
        const STRENGTH = 1 << 1;
        /// Drag the crate behind the player once
        const PULL     = 1 << 2;
    }
}

/// Commands accepted by the game controller
///
/// These are issued by whatever input source drives the game, whether a
/// keyboard mapping or a scripted test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameCommand {
    /// Step the player one cell
    Move(Direction),
    /// Pause or resume the running game
    TogglePause,
    /// Restart the current level at the cost of one life
    ResetLevel,
    /// Start a new game from the first level
    Start,
    /// Abandon the running game
    Stop,
}

impl GameCommand {
    /// Parse command from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_sokoban_types::{Direction, GameCommand};
    ///
    /// assert_eq!(GameCommand::from_str("moveUp"), Some(GameCommand::Move(Direction::Up)));
    /// assert_eq!(GameCommand::from_str("pause"), Some(GameCommand::TogglePause));
    /// assert_eq!(GameCommand::from_str("resetLevel"), Some(GameCommand::ResetLevel));
    /// assert_eq!(GameCommand::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveup" => Some(GameCommand::Move(Direction::Up)),
            "movedown" => Some(GameCommand::Move(Direction::Down)),
            "moveleft" => Some(GameCommand::Move(Direction::Left)),
            "moveright" => Some(GameCommand::Move(Direction::Right)),
            "pause" | "togglepause" => Some(GameCommand::TogglePause),
            "reset" | "resetlevel" => Some(GameCommand::ResetLevel),
            "start" => Some(GameCommand::Start),
            "stop" => Some(GameCommand::Stop),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::Move(Direction::Up) => "moveUp",
            GameCommand::Move(Direction::Down) => "moveDown",
            GameCommand::Move(Direction::Left) => "moveLeft",
            GameCommand::Move(Direction::Right) => "moveRight",
            GameCommand::TogglePause => "togglePause",
            GameCommand::ResetLevel => "resetLevel",
            GameCommand::Start => "start",
            GameCommand::Stop => "stop",
        }
    }
}
