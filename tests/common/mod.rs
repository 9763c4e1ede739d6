//! Shared helpers for integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use tui_sokoban::core::{
    BoardReady, GameConfig, GameController, LifecycleEvent, Level, LevelPack, ListenerError,
};

pub type EventLog = Rc<RefCell<Vec<String>>>;

/// Build a level from glyph rows, panicking on malformed input
pub fn level(name: &str, rows: &[&str]) -> Level {
    Level::from_rows(name, rows).unwrap()
}

/// Two short levels, each solved by walking right
pub fn two_level_pack() -> LevelPack {
    LevelPack::new(
        "pair",
        vec![
            level("one", &["#####", "#@$x#", "#####"]),
            level("two", &["######", "#@.$x#", "######"]),
        ],
    )
}

/// One-row corridor solved after exactly `moves` steps to the right
pub fn corridor(name: &str, moves: usize) -> Level {
    let row = format!("@{}$x", ".".repeat(moves.saturating_sub(1)));
    level(name, &[row.as_str()])
}

pub fn controller(pack: LevelPack) -> GameController {
    GameController::new(GameConfig::default(), pack).unwrap()
}

pub fn describe_lifecycle(event: &LifecycleEvent<'_>) -> String {
    match event {
        LifecycleEvent::GameStarted { level, lives } => {
            format!("game_started({},{})", level.name(), lives)
        }
        LifecycleEvent::GameStopped {
            total_score,
            completed,
        } => format!("game_stopped({},{})", total_score, completed),
        LifecycleEvent::NextLevel {
            previous,
            previous_score,
            current,
            total_score,
        } => format!(
            "next_level({},{},{},{})",
            previous.name(),
            previous_score,
            current.name(),
            total_score
        ),
        LifecycleEvent::LivesUpdated { lives, max_lives } => {
            format!("lives_updated({},{})", lives, max_lives)
        }
        LifecycleEvent::ScoreUpdated { current, total } => {
            format!("score_updated({},{})", current, total)
        }
        LifecycleEvent::GamePaused => "game_paused".to_string(),
        LifecycleEvent::GameResumed => "game_resumed".to_string(),
    }
}

pub fn describe_board(event: &BoardReady<'_>) -> String {
    match event.deltas {
        None => format!("board_ready({},full)", event.level.name()),
        Some(deltas) => format!("board_ready({},{})", event.level.name(), deltas.len()),
    }
}

/// Attach listeners of both kinds that append to one shared log
pub fn record_events(game: &mut GameController) -> EventLog {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));

    let lifecycle_log = Rc::clone(&log);
    game.add_lifecycle_listener(
        move |event: &LifecycleEvent<'_>| -> Result<(), ListenerError> {
            lifecycle_log.borrow_mut().push(describe_lifecycle(event));
            Ok(())
        },
    );

    let board_log = Rc::clone(&log);
    game.add_board_listener(move |event: &BoardReady<'_>| -> Result<(), ListenerError> {
        board_log.borrow_mut().push(describe_board(event));
        Ok(())
    });

    log
}

/// Take everything logged so far
pub fn drain(log: &EventLog) -> Vec<String> {
    log.borrow_mut().drain(..).collect()
}
