//! Game controller - level lifecycle, lives, score, and event emission
//!
//! The controller owns the level pack, the listeners, and (while a game runs)
//! the session with the active board. Every command runs to completion,
//! listener calls included, before it returns.
//!
//! States:
//!
//! - not running: no session
//! - running: session, not paused
//! - paused: session, paused (moves ignored)

use tracing::{debug, info, trace};

use crate::board::BoardState;
use crate::config::GameConfig;
use crate::error::{GameError, ListenerError, Result};
use crate::events::{
    BoardListener, BoardReady, EventDispatcher, LifecycleEvent, LifecycleListener, ListenerId,
};
use crate::level::{Level, LevelPack};
use crate::resolver::{collect_pickup, resolve_move, MoveOutcome};
use crate::snapshot::GameSnapshot;
use crate::types::{CrateDelta, Direction, GameCommand, PowerUps, POINTS_PER_MOVE};

/// Result of a level advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelAdvance {
    /// The next level is loaded
    Advanced,
    /// The pack has no more levels; nothing changed
    Exhausted,
}

/// State of a running game
#[derive(Debug, Clone)]
struct Session {
    level_index: usize,
    board: BoardState,
    lives: u32,
    /// Levels cleared in a row without a reset
    streak: u32,
    current_score: u32,
    total_score: u32,
    power_ups: PowerUps,
    paused: bool,
    accepts_input: bool,
}

impl Session {
    fn new(level: &Level, lives: u32) -> Self {
        Self {
            level_index: 0,
            board: BoardState::from_level(level),
            lives,
            streak: 0,
            current_score: 0,
            total_score: 0,
            power_ups: PowerUps::empty(),
            paused: false,
            accepts_input: true,
        }
    }
}

#[derive(Debug)]
pub struct GameController {
    config: GameConfig,
    levels: LevelPack,
    events: EventDispatcher,
    session: Option<Session>,
}

impl GameController {
    pub fn new(config: GameConfig, levels: LevelPack) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            levels,
            events: EventDispatcher::new(),
            session: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn levels(&self) -> &LevelPack {
        &self.levels
    }

    pub fn add_lifecycle_listener(
        &mut self,
        listener: impl LifecycleListener + 'static,
    ) -> ListenerId {
        self.events.add_lifecycle_listener(Box::new(listener))
    }

    pub fn remove_lifecycle_listener(&mut self, id: ListenerId) -> bool {
        self.events.remove_lifecycle_listener(id).is_some()
    }

    pub fn add_board_listener(&mut self, listener: impl BoardListener + 'static) -> ListenerId {
        self.events.add_board_listener(Box::new(listener))
    }

    pub fn remove_board_listener(&mut self, id: ListenerId) -> bool {
        self.events.remove_board_listener(id).is_some()
    }

    // ----- queries -----

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.paused)
    }

    pub fn accepts_input(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.accepts_input)
    }

    pub fn lives(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.lives)
    }

    pub fn max_lives(&self) -> u32 {
        self.config.max_lives
    }

    pub fn streak(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.streak)
    }

    pub fn current_score(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.current_score)
    }

    pub fn total_score(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.total_score)
    }

    pub fn power_ups(&self) -> PowerUps {
        self.session
            .as_ref()
            .map_or(PowerUps::empty(), |s| s.power_ups)
    }

    pub fn level_index(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.level_index)
    }

    pub fn current_level(&self) -> Option<&Level> {
        self.session
            .as_ref()
            .and_then(|s| self.levels.get(s.level_index))
    }

    pub fn board_state(&self) -> Option<&BoardState> {
        self.session.as_ref().map(|s| &s.board)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.clear();
        out.max_lives = self.config.max_lives;

        let Some(session) = self.session.as_ref() else {
            return;
        };
        out.running = true;
        out.paused = session.paused;
        out.accepts_input = session.accepts_input;
        out.level_index = Some(session.level_index);
        out.level_name = self.current_level().map(|l| l.name().to_string());
        out.lives = session.lives;
        out.streak = session.streak;
        out.current_score = session.current_score;
        out.total_score = session.total_score;
        out.power_ups = session.power_ups;
        out.player = Some(session.board.player());
        out.num_crates = session.board.num_crates();
        out.num_matched = session.board.num_matched();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    // ----- commands -----

    /// Apply a command from the input source
    pub fn apply(&mut self, command: GameCommand) -> Result<()> {
        trace!(command = command.as_str(), "apply");
        match command {
            GameCommand::Move(dir) => self.move_player(dir).map(|_| ()),
            GameCommand::TogglePause => self.toggle_pause(),
            GameCommand::ResetLevel => self.reset_level(),
            GameCommand::Start => self.start_game(),
            GameCommand::Stop => self.stop_game(false),
        }
    }

    /// Start a new game on the first level
    pub fn start_game(&mut self) -> Result<()> {
        if self.session.is_some() {
            return Err(GameError::AlreadyRunning);
        }
        let level = self.levels.get(0).ok_or(GameError::NoLevels)?;
        let lives = self.config.starting_lives;
        self.session = Some(Session::new(level, lives));
        info!(
            pack = self.levels.name(),
            level = level.name(),
            lives,
            "game started"
        );

        if let Some(session) = self.session.as_ref() {
            emit_board_ready(&mut self.events, level, session, None)?;
        }
        self.events
            .lifecycle(&LifecycleEvent::GameStarted { level, lives })?;
        self.events.lifecycle(&LifecycleEvent::LivesUpdated {
            lives,
            max_lives: self.config.max_lives,
        })?;
        Ok(())
    }

    /// Move on to the next level of the pack.
    ///
    /// Returns [`LevelAdvance::Exhausted`] without touching anything when
    /// there is no next level; the caller decides how the game ends.
    pub fn next_level(&mut self) -> Result<LevelAdvance> {
        let mut failure = None;
        let advance = self.advance_level(&mut failure)?;
        finish(advance, failure)
    }

    /// Swap in the next level and announce it.
    ///
    /// Listener failures land in `failure` and do not stop the advance.
    fn advance_level(&mut self, failure: &mut Option<ListenerError>) -> Result<LevelAdvance> {
        let session = self.session.as_mut().ok_or(GameError::NotRunning)?;
        let previous = self
            .levels
            .get(session.level_index)
            .ok_or(GameError::NotRunning)?;
        let next_index = session.level_index + 1;
        let Some(level) = self.levels.get(next_index) else {
            debug!(level_index = session.level_index, "no more levels");
            return Ok(LevelAdvance::Exhausted);
        };

        let previous_score = session.current_score;
        session.level_index = next_index;
        session.total_score += session.current_score;
        session.current_score = 0;
        session.accepts_input = !session.paused;
        session.power_ups = PowerUps::empty();
        session.board = BoardState::from_level(level);
        info!(
            level_index = next_index,
            level = level.name(),
            total_score = session.total_score,
            "level loaded"
        );

        let (current, total) = (session.current_score, session.total_score);
        keep_first(
            failure,
            self.events
                .lifecycle(&LifecycleEvent::ScoreUpdated { current, total }),
        );
        keep_first(
            failure,
            emit_board_ready(&mut self.events, level, session, None),
        );
        keep_first(
            failure,
            self.events.lifecycle(&LifecycleEvent::NextLevel {
                previous,
                previous_score,
                current: level,
                total_score: total,
            }),
        );
        Ok(LevelAdvance::Advanced)
    }

    /// Restart the current level, spending a life.
    ///
    /// With no lives left the game ends instead. Active power-ups survive
    /// the reset.
    pub fn reset_level(&mut self) -> Result<()> {
        let session = self.session.as_mut().ok_or(GameError::NotRunning)?;
        let Some(level) = self.levels.get(session.level_index) else {
            return Err(GameError::NotRunning);
        };
        session.board = BoardState::from_level(level);

        if session.lives == 0 {
            info!(level = level.name(), "reset with no lives left");
            return self.stop_game(false);
        }

        session.lives -= 1;
        session.streak = 0;
        debug!(level = level.name(), lives = session.lives, "level reset");

        let lives = session.lives;
        self.events.lifecycle(&LifecycleEvent::LivesUpdated {
            lives,
            max_lives: self.config.max_lives,
        })?;
        emit_board_ready(&mut self.events, level, session, None)?;
        Ok(())
    }

    /// End the running game. Does nothing when no game is running.
    ///
    /// `completed` is true only when the last level was solved; a manual stop
    /// passes false.
    pub fn stop_game(&mut self, completed: bool) -> Result<()> {
        let mut failure = None;
        self.end_session(completed, &mut failure);
        finish((), failure)
    }

    /// Fold the level score into the total, announce the end, and drop the
    /// session.
    fn end_session(&mut self, completed: bool, failure: &mut Option<ListenerError>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.total_score += session.current_score;
        session.current_score = 0;
        let total_score = session.total_score;
        info!(total_score, completed, "game stopped");

        keep_first(
            failure,
            self.events.lifecycle(&LifecycleEvent::GameStopped {
                total_score,
                completed,
            }),
        );
        self.session = None;
    }

    /// Pause a running game or resume a paused one
    pub fn toggle_pause(&mut self) -> Result<()> {
        let session = self.session.as_mut().ok_or(GameError::NotRunning)?;
        session.paused = !session.paused;
        session.accepts_input = !session.paused;
        debug!(paused = session.paused, "pause toggled");

        let event = if session.paused {
            LifecycleEvent::GamePaused
        } else {
            LifecycleEvent::GameResumed
        };
        self.events.lifecycle(&event)?;
        Ok(())
    }

    /// Gate move acceptance. Ignored when no game is running.
    pub fn enable_input(&mut self, enable: bool) {
        if let Some(session) = self.session.as_mut() {
            session.accepts_input = enable;
        }
    }

    /// Step the player one cell.
    ///
    /// Without a running game, or with input disabled, the move is
    /// [`MoveOutcome::Ignored`]. Illegal moves come back as
    /// [`MoveOutcome::Rejected`] with no events fired.
    ///
    /// A failing listener does not cut the move short: the level advance or
    /// pickup still happens and the first failure is returned afterwards.
    pub fn move_player(&mut self, dir: Direction) -> Result<MoveOutcome> {
        let Some(session) = self.session.as_mut() else {
            return Ok(MoveOutcome::Ignored);
        };
        if !session.accepts_input {
            trace!(?dir, "input disabled, move ignored");
            return Ok(MoveOutcome::Ignored);
        }
        let level = self
            .levels
            .get(session.level_index)
            .ok_or(GameError::NotRunning)?;

        let mut report = match resolve_move(&mut session.board, &mut session.power_ups, dir) {
            MoveOutcome::Accepted(report) => report,
            other => return Ok(other),
        };
        session.current_score += POINTS_PER_MOVE;

        let mut failure = None;
        let (current, total) = (session.current_score, session.total_score);
        keep_first(
            &mut failure,
            self.events
                .lifecycle(&LifecycleEvent::ScoreUpdated { current, total }),
        );
        keep_first(
            &mut failure,
            emit_board_ready(&mut self.events, level, session, Some(report.deltas.as_slice())),
        );

        if report.solved {
            session.streak += 1;
            info!(
                level_index = session.level_index,
                score = session.current_score,
                streak = session.streak,
                "level solved"
            );
            if self.advance_level(&mut failure)? == LevelAdvance::Exhausted {
                self.end_session(true, &mut failure);
            }
            return finish(MoveOutcome::Accepted(report), failure);
        }

        report.collected = collect_pickup(&session.board, &mut session.power_ups);
        finish(MoveOutcome::Accepted(report), failure)
    }
}

/// Remember the first listener failure of a command
fn keep_first(failure: &mut Option<ListenerError>, result: std::result::Result<(), ListenerError>) {
    if let Err(err) = result {
        if failure.is_none() {
            *failure = Some(err);
        }
    }
}

fn finish<T>(value: T, failure: Option<ListenerError>) -> Result<T> {
    match failure {
        Some(err) => Err(err.into()),
        None => Ok(value),
    }
}

fn emit_board_ready(
    events: &mut EventDispatcher,
    level: &Level,
    session: &Session,
    deltas: Option<&[CrateDelta]>,
) -> std::result::Result<(), ListenerError> {
    events.board_ready(&BoardReady {
        level,
        board: session.board.board(),
        crates: session.board.crates(),
        player: session.board.player(),
        deltas,
    })
}
