//! Event dispatch - synchronous notification of views
//!
//! Two listener categories are kept, each in registration order:
//!
//! - [`LifecycleListener`]: game started/stopped, next level, lives, score,
//!   pause and resume
//! - [`BoardListener`]: board-ready, carrying everything needed to redraw
//!
//! Dispatch is a plain ordered loop that runs before the triggering command
//! returns. The first listener error stops the loop and is handed back to
//! the caller; listeners after it are not called for that event.

use tracing::{debug, trace};

use crate::board::{Board, CrateGrid};
use crate::error::ListenerError;
use crate::level::Level;
use crate::types::{CrateDelta, Position};

/// Lifecycle notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent<'a> {
    GameStarted {
        level: &'a Level,
        lives: u32,
    },
    GameStopped {
        total_score: u32,
        completed: bool,
    },
    NextLevel {
        previous: &'a Level,
        previous_score: u32,
        current: &'a Level,
        total_score: u32,
    },
    LivesUpdated {
        lives: u32,
        max_lives: u32,
    },
    ScoreUpdated {
        current: u32,
        total: u32,
    },
    GamePaused,
    GameResumed,
}

impl LifecycleEvent<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleEvent::GameStarted { .. } => "game_started",
            LifecycleEvent::GameStopped { .. } => "game_stopped",
            LifecycleEvent::NextLevel { .. } => "next_level",
            LifecycleEvent::LivesUpdated { .. } => "lives_updated",
            LifecycleEvent::ScoreUpdated { .. } => "score_updated",
            LifecycleEvent::GamePaused => "game_paused",
            LifecycleEvent::GameResumed => "game_resumed",
        }
    }
}

/// Board redraw notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardReady<'a> {
    pub level: &'a Level,
    pub board: &'a Board,
    pub crates: &'a CrateGrid,
    pub player: Position,
    /// `None` asks for a full redraw; `Some` lists the crates that moved
    pub deltas: Option<&'a [CrateDelta]>,
}

impl BoardReady<'_> {
    pub fn is_full_redraw(&self) -> bool {
        self.deltas.is_none()
    }
}

pub trait LifecycleListener {
    fn on_lifecycle(&mut self, event: &LifecycleEvent<'_>) -> Result<(), ListenerError>;
}

pub trait BoardListener {
    fn on_board_ready(&mut self, event: &BoardReady<'_>) -> Result<(), ListenerError>;
}

impl<F> LifecycleListener for F
where
    F: FnMut(&LifecycleEvent<'_>) -> Result<(), ListenerError>,
{
    fn on_lifecycle(&mut self, event: &LifecycleEvent<'_>) -> Result<(), ListenerError> {
        self(event)
    }
}

impl<F> BoardListener for F
where
    F: FnMut(&BoardReady<'_>) -> Result<(), ListenerError>,
{
    fn on_board_ready(&mut self, event: &BoardReady<'_>) -> Result<(), ListenerError> {
        self(event)
    }
}

/// Handle returned on registration, used to remove the listener again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Ordered listener lists for both categories
#[derive(Default)]
pub struct EventDispatcher {
    next_id: u64,
    lifecycle: Vec<(ListenerId, Box<dyn LifecycleListener>)>,
    board: Vec<(ListenerId, Box<dyn BoardListener>)>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn add_lifecycle_listener(&mut self, listener: Box<dyn LifecycleListener>) -> ListenerId {
        let id = self.allocate_id();
        self.lifecycle.push((id, listener));
        id
    }

    pub fn remove_lifecycle_listener(
        &mut self,
        id: ListenerId,
    ) -> Option<Box<dyn LifecycleListener>> {
        let idx = self.lifecycle.iter().position(|(lid, _)| *lid == id)?;
        Some(self.lifecycle.remove(idx).1)
    }

    pub fn add_board_listener(&mut self, listener: Box<dyn BoardListener>) -> ListenerId {
        let id = self.allocate_id();
        self.board.push((id, listener));
        id
    }

    pub fn remove_board_listener(&mut self, id: ListenerId) -> Option<Box<dyn BoardListener>> {
        let idx = self.board.iter().position(|(lid, _)| *lid == id)?;
        Some(self.board.remove(idx).1)
    }

    pub fn lifecycle_listener_count(&self) -> usize {
        self.lifecycle.len()
    }

    pub fn board_listener_count(&self) -> usize {
        self.board.len()
    }

    pub fn lifecycle(&mut self, event: &LifecycleEvent<'_>) -> Result<(), ListenerError> {
        trace!(event = event.name(), listeners = self.lifecycle.len(), "dispatch");
        for (_, listener) in self.lifecycle.iter_mut() {
            listener.on_lifecycle(event)?;
        }
        Ok(())
    }

    pub fn board_ready(&mut self, event: &BoardReady<'_>) -> Result<(), ListenerError> {
        trace!(
            full = event.is_full_redraw(),
            listeners = self.board.len(),
            "dispatch board_ready"
        );
        for (_, listener) in self.board.iter_mut() {
            listener.on_board_ready(event)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("lifecycle", &self.lifecycle.len())
            .field("board", &self.board.len())
            .finish()
    }
}

/// Listener that writes every event to `tracing` at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl LifecycleListener for TracingListener {
    fn on_lifecycle(&mut self, event: &LifecycleEvent<'_>) -> Result<(), ListenerError> {
        match event {
            LifecycleEvent::GameStarted { level, lives } => {
                debug!(level = level.name(), lives, "game started")
            }
            LifecycleEvent::GameStopped {
                total_score,
                completed,
            } => debug!(total_score, completed, "game stopped"),
            LifecycleEvent::NextLevel {
                previous,
                previous_score,
                current,
                total_score,
            } => debug!(
                previous = previous.name(),
                previous_score,
                current = current.name(),
                total_score,
                "next level"
            ),
            LifecycleEvent::LivesUpdated { lives, max_lives } => {
                debug!(lives, max_lives, "lives updated")
            }
            LifecycleEvent::ScoreUpdated { current, total } => {
                debug!(current, total, "score updated")
            }
            LifecycleEvent::GamePaused => debug!("game paused"),
            LifecycleEvent::GameResumed => debug!("game resumed"),
        }
        Ok(())
    }
}

impl BoardListener for TracingListener {
    fn on_board_ready(&mut self, event: &BoardReady<'_>) -> Result<(), ListenerError> {
        debug!(
            level = event.level.name(),
            player = ?event.player,
            crates = event.crates.count(),
            deltas = ?event.deltas,
            "board ready"
        );
        Ok(())
    }
}
