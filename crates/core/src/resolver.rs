//! Move resolution - one directional step against the board
//!
//! [`resolve_move`] borrows the board state and the power-up set for the
//! duration of a single step and hands back what happened. It never keeps a
//! reference to either.
//!
//! Checks run in a fixed order and the order is observable:
//!
//! 1. bounds (strict `[0, width) x [0, height)`)
//! 2. walls, unless GHOST is active. An active GHOST is spent here on every
//!    move that got past the bounds check, wall or not, even if a later
//!    check rejects the move.
//! 3. a crate ahead is pushed one cell. A second crate behind it needs
//!    STRENGTH and a free cell beyond both
//! 4. PULL drags a crate from behind the player into the vacated cell
//!
//! Rejections are not errors. They leave everything untouched apart from
//! the GHOST rule above.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::board::BoardState;
use crate::types::{CrateDelta, Direction, Position, PowerUps, Tile, MAX_MOVE_DELTAS};

/// Crate movements produced by one move
pub type DeltaSet = ArrayVec<CrateDelta, MAX_MOVE_DELTAS>;

/// Why a move did not happen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Target cell lies outside the level
    OutOfBounds,
    /// Target cell is a wall and GHOST is not active
    Wall,
    /// The crate ahead is backed by a wall, the level edge, or another crate
    CrateBlocked,
    /// Two stacked crates with STRENGTH active, but nowhere to push them
    StackBlocked,
}

/// What an accepted move changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub direction: Direction,
    pub from: Position,
    pub to: Position,
    /// Crate movements in the order they were applied
    pub deltas: DeltaSet,
    /// Power-ups spent by this move
    pub consumed: PowerUps,
    /// Power-up picked up at the destination, if any
    pub collected: Option<PowerUps>,
    pub pushed: bool,
    pub pulled: bool,
    /// Every crate rests on a target after this move
    pub solved: bool,
}

/// Result of a move request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOutcome {
    /// No running game, or input is disabled
    Ignored,
    /// The move was illegal and changed nothing
    Rejected(RejectReason),
    Accepted(MoveReport),
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted(_))
    }

    pub fn report(&self) -> Option<&MoveReport> {
        match self {
            MoveOutcome::Accepted(report) => Some(report),
            _ => None,
        }
    }
}

/// Resolve one step of the player in `dir`.
///
/// Power-up pickup is left to [`collect_pickup`]: the caller runs the win
/// check in between.
pub fn resolve_move(
    state: &mut BoardState,
    power_ups: &mut PowerUps,
    dir: Direction,
) -> MoveOutcome {
    let origin = state.player();
    let target = origin.offset(dir);

    let Some(target_tile) = state.board().get(target) else {
        return reject(dir, RejectReason::OutOfBounds);
    };

    let ghost = power_ups.contains(PowerUps::GHOST);
    if target_tile == Tile::Wall && !ghost {
        return reject(dir, RejectReason::Wall);
    }

    let mut consumed = PowerUps::empty();
    if ghost {
        power_ups.remove(PowerUps::GHOST);
        consumed |= PowerUps::GHOST;
    }

    let mut deltas = DeltaSet::new();
    let mut pushed = false;

    if state.crates().has_crate(target) {
        let beyond = target.offset(dir);
        if !state.board().in_bounds(beyond) || state.board().is_wall(beyond) {
            return reject(dir, RejectReason::CrateBlocked);
        }

        if state.crates().has_crate(beyond) {
            if !power_ups.contains(PowerUps::STRENGTH) {
                return reject(dir, RejectReason::CrateBlocked);
            }
            let far = beyond.offset(dir);
            if !state.is_free(far) {
                return reject(dir, RejectReason::StackBlocked);
            }
            power_ups.remove(PowerUps::STRENGTH);
            consumed |= PowerUps::STRENGTH;
            deltas.push(state.move_crate(beyond, far));
        }

        deltas.push(state.move_crate(target, beyond));
        pushed = true;
    }

    let mut pulled = false;
    if power_ups.contains(PowerUps::PULL) {
        let behind = origin.step_back(dir);
        if state.crates().has_crate(behind) {
            power_ups.remove(PowerUps::PULL);
            consumed |= PowerUps::PULL;
            deltas.push(state.move_crate(behind, origin));
            pulled = true;
        }
    }

    state.set_player(target);

    if !consumed.is_empty() {
        debug!(?consumed, "power-ups spent");
    }

    MoveOutcome::Accepted(MoveReport {
        direction: dir,
        from: origin,
        to: target,
        deltas,
        consumed,
        collected: None,
        pushed,
        pulled,
        solved: state.is_solved(),
    })
}

/// Grant the power-up under the player, if standing on a pickup tile.
///
/// Pickup tiles stay on the board; stepping on one again re-adds a power-up
/// that may already be active.
pub fn collect_pickup(state: &BoardState, power_ups: &mut PowerUps) -> Option<PowerUps> {
    let gained = state.board().get(state.player())?.pickup()?;
    power_ups.insert(gained);
    debug!(?gained, player = ?state.player(), "power-up picked up");
    Some(gained)
}

fn reject(dir: Direction, reason: RejectReason) -> MoveOutcome {
    trace!(?dir, ?reason, "move rejected");
    MoveOutcome::Rejected(reason)
}
