//! Board module - per-level mutable view of a level
//!
//! A level's authored tiles mix terrain with spawn markers. Loading a level
//! splits them apart:
//!
//! - [`Board`]: normalized terrain, never containing `Crate` or `Player`
//! - [`CrateGrid`]: which cells currently hold a crate
//! - the player position
//!
//! The terrain is never mutated after normalization; only the crate grid and
//! the player position change during play. Storage is a flat row-major
//! vector (`y * width + x`) like the rest of the grid code.

use tracing::warn;

use crate::level::Level;
use crate::types::{CrateDelta, Position, Tile};

/// Normalized terrain of the active level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Board {
    /// Calculate flat index from a position, `None` when out of bounds
    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if a position lies inside `[0, width) x [0, height)`
    pub fn in_bounds(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Get tile at position, `None` if out of bounds
    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.index(pos).map(|idx| self.tiles[idx])
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        self.get(pos) == Some(Tile::Wall)
    }

    pub fn is_target(&self, pos: Position) -> bool {
        self.get(pos) == Some(Tile::TargetSpot)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width.max(1))
    }
}

/// Crate occupancy, same dimensions as the [`Board`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrateGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl CrateGrid {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Whether a crate sits at `pos` (false out of bounds)
    pub fn has_crate(&self, pos: Position) -> bool {
        matches!(self.index(pos).map(|idx| self.cells[idx]), Some(true))
    }

    /// Set occupancy at `pos`. Returns false if out of bounds
    fn set(&mut self, pos: Position, occupied: bool) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = occupied;
                true
            }
            None => false,
        }
    }

    /// Number of crates currently on the grid
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Positions of every crate, row-major
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c)
            .map(move |(idx, _)| Position::new((idx % width) as i32, (idx / width) as i32))
    }
}

/// Everything that changes while a level is played
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    board: Board,
    crates: CrateGrid,
    player: Position,
    num_crates: usize,
    num_matched: usize,
}

impl BoardState {
    /// Normalize a level: crate and player markers become floor, crates move
    /// into the crate grid and the player marker becomes the player position.
    pub fn from_level(level: &Level) -> Self {
        let (width, height) = (level.width(), level.height());
        let mut tiles = Vec::with_capacity(width * height);
        let mut crates = CrateGrid::new(width, height);
        let mut player = None;

        for (idx, &tile) in level.tiles().iter().enumerate() {
            let pos = Position::new((idx % width) as i32, (idx / width) as i32);
            match tile {
                Tile::Crate => {
                    crates.set(pos, true);
                    tiles.push(Tile::Floor);
                }
                Tile::Player => {
                    player = Some(pos);
                    tiles.push(Tile::Floor);
                }
                other => tiles.push(other),
            }
        }

        let player = player.unwrap_or_else(|| {
            warn!(level = level.name(), "level has no player spawn, using origin");
            Position::default()
        });

        let board = Board {
            width,
            height,
            tiles,
        };
        let num_crates = crates.count();
        let num_matched = crates.positions().filter(|&p| board.is_target(p)).count();

        Self {
            board,
            crates,
            player,
            num_crates,
            num_matched,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn crates(&self) -> &CrateGrid {
        &self.crates
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub(crate) fn set_player(&mut self, pos: Position) {
        self.player = pos;
    }

    /// Crates in the level, fixed at load
    pub fn num_crates(&self) -> usize {
        self.num_crates
    }

    /// Crates currently resting on a target spot
    pub fn num_matched(&self) -> usize {
        self.num_matched
    }

    pub fn is_solved(&self) -> bool {
        self.num_matched == self.num_crates
    }

    /// Whether a crate could be placed at `pos`: in bounds, not a wall, no crate
    pub fn is_free(&self, pos: Position) -> bool {
        matches!(self.board.get(pos), Some(tile) if tile != Tile::Wall)
            && !self.crates.has_crate(pos)
    }

    /// Move one crate and keep the matched counter in step with the static
    /// terrain under its source and destination.
    pub(crate) fn move_crate(&mut self, from: Position, to: Position) -> CrateDelta {
        self.crates.set(from, false);
        self.crates.set(to, true);

        let was_matched = self.board.is_target(from);
        let now_matched = self.board.is_target(to);
        if now_matched && !was_matched {
            self.num_matched += 1;
        } else if was_matched && !now_matched {
            self.num_matched -= 1;
        }

        CrateDelta::new(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(rows: &[&str]) -> Level {
        Level::from_rows("test", rows).unwrap()
    }

    #[test]
    fn test_normalization_strips_markers() {
        let state = BoardState::from_level(&level(&["#####", "#@$x#", "#$.x#", "#####"]));

        assert!(state
            .board()
            .tiles()
            .iter()
            .all(|t| !t.is_spawn_marker()));
        assert_eq!(state.player(), Position::new(1, 1));
        assert_eq!(state.board().get(Position::new(1, 1)), Some(Tile::Floor));
        assert_eq!(state.board().get(Position::new(2, 1)), Some(Tile::Floor));
        assert!(state.crates().has_crate(Position::new(2, 1)));
        assert!(state.crates().has_crate(Position::new(1, 2)));
        assert_eq!(state.num_crates(), 2);
        assert_eq!(state.crates().count(), 2);
        assert_eq!(state.num_matched(), 0);
        assert!(!state.is_solved());
    }

    #[test]
    fn test_level_without_crates_is_solved() {
        let state = BoardState::from_level(&level(&["@.x"]));
        assert_eq!(state.num_crates(), 0);
        assert!(state.is_solved());
    }

    #[test]
    fn test_missing_player_falls_back_to_origin() {
        let state = BoardState::from_level(&level(&["..", ".$"]));
        assert_eq!(state.player(), Position::new(0, 0));
    }

    #[test]
    fn test_board_bounds() {
        let state = BoardState::from_level(&level(&["@..", "..."]));
        let board = state.board();
        assert!(board.in_bounds(Position::new(0, 0)));
        assert!(board.in_bounds(Position::new(2, 1)));
        assert!(!board.in_bounds(Position::new(3, 0)));
        assert!(!board.in_bounds(Position::new(0, 2)));
        assert!(!board.in_bounds(Position::new(-1, 0)));
        assert_eq!(board.get(Position::new(3, 0)), None);
        assert_eq!(board.rows().count(), 2);
    }

    #[test]
    fn test_crate_grid_out_of_bounds() {
        let state = BoardState::from_level(&level(&["@$"]));
        assert!(!state.crates().has_crate(Position::new(2, 0)));
        assert!(!state.crates().has_crate(Position::new(-1, 0)));
    }

    #[test]
    fn test_is_free() {
        let state = BoardState::from_level(&level(&["@$#x"]));
        assert!(!state.is_free(Position::new(1, 0)));
        assert!(!state.is_free(Position::new(2, 0)));
        assert!(state.is_free(Position::new(3, 0)));
        assert!(!state.is_free(Position::new(4, 0)));
    }

    #[test]
    fn test_move_crate_tracks_matches() {
        let mut state = BoardState::from_level(&level(&["@$x."]));

        let delta = state.move_crate(Position::new(1, 0), Position::new(2, 0));
        assert_eq!(delta, CrateDelta::new(Position::new(1, 0), Position::new(2, 0)));
        assert_eq!(state.num_matched(), 1);
        assert!(state.is_solved());

        state.move_crate(Position::new(2, 0), Position::new(3, 0));
        assert_eq!(state.num_matched(), 0);
        assert_eq!(state.crates().count(), 1);
        assert_eq!(
            state.crates().positions().collect::<Vec<_>>(),
            vec![Position::new(3, 0)]
        );
    }
}
