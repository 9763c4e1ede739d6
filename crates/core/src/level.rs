//! Levels and level packs.
//!
//! A [`Level`] is read-only authored data: a fixed-size tile grid that still
//! contains the [`Tile::Crate`] and [`Tile::Player`] spawn markers. The
//! playable view is built from it by [`BoardState::from_level`](crate::board::BoardState::from_level).
//!
//! Levels are assumed to be well formed (one player, crates and targets that
//! make sense). Only the grid shape is checked on construction.

use crate::error::LevelError;
use crate::types::{Position, Tile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    name: String,
    width: usize,
    height: usize,
    /// Row-major tiles (y * width + x)
    tiles: Vec<Tile>,
}

impl Level {
    pub fn new(
        name: impl Into<String>,
        width: usize,
        height: usize,
        tiles: Vec<Tile>,
    ) -> Result<Self, LevelError> {
        let name = name.into();
        let expected = width * height;
        if tiles.len() != expected {
            return Err(LevelError::SizeMismatch {
                name,
                width,
                height,
                expected,
                actual: tiles.len(),
            });
        }
        Ok(Self {
            name,
            width,
            height,
            tiles,
        })
    }

    /// Build a level from ASCII rows (see the glyph table in `tui_sokoban_types`).
    ///
    /// ```
    /// use tui_sokoban_core::Level;
    ///
    /// let level = Level::from_rows("intro", &[
    ///     "#####",
    ///     "#@$x#",
    ///     "#####",
    /// ]).unwrap();
    /// assert_eq!((level.width(), level.height()), (5, 3));
    /// ```
    pub fn from_rows(name: impl Into<String>, rows: &[&str]) -> Result<Self, LevelError> {
        let name = name.into();
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut tiles = Vec::with_capacity(width * height);

        for (y, row) in rows.iter().enumerate() {
            let columns = row.chars().count();
            if columns != width {
                return Err(LevelError::RaggedRows {
                    name,
                    row: y,
                    expected: width,
                    actual: columns,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let Some(tile) = Tile::from_glyph(glyph) else {
                    return Err(LevelError::UnknownGlyph { name, glyph, x, y });
                };
                tiles.push(tile);
            }
        }

        Self::new(name, width, height, tiles)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Authored tile at `pos`, or `None` outside the grid
    pub fn tile(&self, pos: Position) -> Option<Tile> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.tiles[y * self.width + x])
    }
}

/// An ordered, 0-indexed sequence of levels played one after another
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelPack {
    name: String,
    levels: Vec<Level>,
}

impl LevelPack {
    pub fn new(name: impl Into<String>, levels: Vec<Level>) -> Self {
        Self {
            name: name.into(),
            levels,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Level> {
        self.levels.iter()
    }
}
