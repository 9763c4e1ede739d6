//! Lifecycle tests - event ordering and session transitions

mod common;

use common::*;
use tui_sokoban::core::{
    BoardReady, GameConfig, GameController, GameError, LevelAdvance, LevelPack, LifecycleEvent,
    ListenerError, MoveOutcome,
};
use tui_sokoban::types::{Direction, GameCommand};

#[test]
fn test_start_game_event_order() {
    let mut game = controller(two_level_pack());
    let log = record_events(&mut game);

    game.start_game().unwrap();

    assert_eq!(
        drain(&log),
        vec![
            "board_ready(one,full)",
            "game_started(one,3)",
            "lives_updated(3,5)",
        ]
    );
}

#[test]
fn test_start_with_custom_lives() {
    let config = GameConfig::new(1, 2).unwrap();
    let mut game = GameController::new(config, two_level_pack()).unwrap();
    let log = record_events(&mut game);

    game.start_game().unwrap();

    assert_eq!(game.lives(), 1);
    assert!(drain(&log).contains(&"lives_updated(1,2)".to_string()));
}

#[test]
fn test_start_empty_pack_emits_nothing() {
    let mut game = controller(LevelPack::new("empty", Vec::new()));
    let log = record_events(&mut game);

    assert!(matches!(game.start_game(), Err(GameError::NoLevels)));
    assert!(drain(&log).is_empty());
    assert!(!game.is_running());
}

#[test]
fn test_winning_move_event_order() {
    let mut game = controller(two_level_pack());
    let log = record_events(&mut game);
    game.start_game().unwrap();
    drain(&log);

    game.move_player(Direction::Right).unwrap();

    assert_eq!(
        drain(&log),
        vec![
            "score_updated(1,0)",
            "board_ready(one,1)",
            "score_updated(0,1)",
            "board_ready(two,full)",
            "next_level(one,1,two,1)",
        ]
    );
}

#[test]
fn test_public_next_level_event_order() {
    let mut game = controller(two_level_pack());
    let log = record_events(&mut game);
    game.start_game().unwrap();
    drain(&log);

    assert_eq!(game.next_level().unwrap(), LevelAdvance::Advanced);
    assert_eq!(
        drain(&log),
        vec![
            "score_updated(0,0)",
            "board_ready(two,full)",
            "next_level(one,0,two,0)",
        ]
    );

    assert_eq!(game.next_level().unwrap(), LevelAdvance::Exhausted);
    assert!(drain(&log).is_empty());
}

#[test]
fn test_completing_last_level_stops_game() {
    let mut game = controller(LevelPack::new("single", vec![corridor("only", 3)]));
    let log = record_events(&mut game);
    game.start_game().unwrap();
    drain(&log);

    game.move_player(Direction::Right).unwrap();
    game.move_player(Direction::Right).unwrap();
    drain(&log);
    game.move_player(Direction::Right).unwrap();

    assert_eq!(
        drain(&log),
        vec![
            "score_updated(3,0)",
            "board_ready(only,1)",
            "game_stopped(3,true)",
        ]
    );
    assert!(!game.is_running());
    assert_eq!(game.level_index(), None);
}

#[test]
fn test_total_score_is_sum_of_level_scores() {
    let pack = LevelPack::new(
        "corridors",
        vec![corridor("a", 4), corridor("b", 2), corridor("c", 5)],
    );
    let mut game = controller(pack);
    let log = record_events(&mut game);
    game.start_game().unwrap();

    for _ in 0..4 {
        game.move_player(Direction::Right).unwrap();
    }
    assert_eq!(game.total_score(), 4);
    for _ in 0..2 {
        game.move_player(Direction::Right).unwrap();
    }
    assert_eq!(game.total_score(), 6);
    for _ in 0..5 {
        game.move_player(Direction::Right).unwrap();
    }

    assert!(!game.is_running());
    assert_eq!(drain(&log).last().unwrap(), "game_stopped(11,true)");
}

#[test]
fn test_stop_game_completed_reports_combined_score() {
    let pack = LevelPack::new("long", vec![corridor("first", 120), corridor("second", 40)]);
    let mut game = controller(pack);
    let log = record_events(&mut game);
    game.start_game().unwrap();

    for _ in 0..120 {
        game.move_player(Direction::Right).unwrap();
    }
    for _ in 0..30 {
        game.move_player(Direction::Right).unwrap();
    }
    assert_eq!(game.total_score(), 120);
    assert_eq!(game.current_score(), 30);
    drain(&log);

    game.stop_game(true).unwrap();

    assert_eq!(drain(&log), vec!["game_stopped(150,true)"]);
    assert!(!game.is_running());
    assert_eq!(game.lives(), 0);
    assert!(game.current_level().is_none());
    assert_eq!(game.total_score(), 0);
}

#[test]
fn test_stop_when_not_running_is_noop() {
    let mut game = controller(two_level_pack());
    let log = record_events(&mut game);

    game.stop_game(false).unwrap();

    assert!(drain(&log).is_empty());
}

#[test]
fn test_game_can_restart_after_stop() {
    let mut game = controller(two_level_pack());
    game.start_game().unwrap();
    game.move_player(Direction::Right).unwrap();
    game.stop_game(false).unwrap();

    game.start_game().unwrap();
    assert_eq!(game.level_index(), Some(0));
    assert_eq!(game.total_score(), 0);
    assert_eq!(game.streak(), 0);
}

#[test]
fn test_reset_costs_a_life() {
    let mut game = controller(two_level_pack());
    let log = record_events(&mut game);
    game.start_game().unwrap();
    drain(&log);

    game.reset_level().unwrap();

    assert_eq!(game.lives(), 2);
    assert_eq!(
        drain(&log),
        vec!["lives_updated(2,5)", "board_ready(one,full)"]
    );
}

#[test]
fn test_reset_at_one_life_keeps_running() {
    let config = GameConfig::new(1, 5).unwrap();
    let mut game = GameController::new(config, two_level_pack()).unwrap();
    let log = record_events(&mut game);
    game.start_game().unwrap();
    drain(&log);

    game.reset_level().unwrap();

    assert_eq!(game.lives(), 0);
    assert!(game.is_running());
    assert_eq!(
        drain(&log),
        vec!["lives_updated(0,5)", "board_ready(one,full)"]
    );

    // Next reset with no lives left ends the game
    game.reset_level().unwrap();
    assert!(!game.is_running());
    assert_eq!(drain(&log), vec!["game_stopped(0,false)"]);
}

#[test]
fn test_reset_restores_level_layout() {
    let mut game = controller(two_level_pack());
    game.start_game().unwrap();
    game.next_level().unwrap();
    game.move_player(Direction::Right).unwrap();
    let moved = game.board_state().unwrap().player();

    game.reset_level().unwrap();

    let state = game.board_state().unwrap();
    assert_ne!(state.player(), moved);
    assert_eq!(state.player().x, 1);
    // Score for the attempt is kept
    assert_eq!(game.current_score(), 1);
}

#[test]
fn test_streak_counts_clean_clears() {
    let pack = LevelPack::new(
        "streak",
        vec![corridor("a", 1), corridor("b", 1), corridor("c", 2)],
    );
    let mut game = controller(pack);
    game.start_game().unwrap();

    game.move_player(Direction::Right).unwrap();
    game.move_player(Direction::Right).unwrap();
    assert_eq!(game.streak(), 2);

    game.reset_level().unwrap();
    assert_eq!(game.streak(), 0);
}

#[test]
fn test_pause_and_resume() {
    let mut game = controller(two_level_pack());
    let log = record_events(&mut game);
    game.start_game().unwrap();
    drain(&log);

    game.toggle_pause().unwrap();
    assert!(game.is_paused());
    assert_eq!(
        game.move_player(Direction::Right).unwrap(),
        MoveOutcome::Ignored
    );

    game.toggle_pause().unwrap();
    assert!(!game.is_paused());
    assert_eq!(drain(&log), vec!["game_paused", "game_resumed"]);
}

#[test]
fn test_advance_while_paused_keeps_input_disabled() {
    let mut game = controller(two_level_pack());
    game.start_game().unwrap();
    game.toggle_pause().unwrap();

    game.next_level().unwrap();

    assert!(game.is_paused());
    assert!(!game.accepts_input());
}

#[test]
fn test_commands_outside_session() {
    let mut game = controller(two_level_pack());
    assert!(matches!(game.toggle_pause(), Err(GameError::NotRunning)));
    assert!(matches!(game.reset_level(), Err(GameError::NotRunning)));
    assert!(matches!(game.next_level(), Err(GameError::NotRunning)));
    assert_eq!(
        game.move_player(Direction::Up).unwrap(),
        MoveOutcome::Ignored
    );
    game.enable_input(true);
    assert!(!game.accepts_input());
}

#[test]
fn test_apply_command_sequence() {
    let mut game = controller(two_level_pack());
    let log = record_events(&mut game);

    for command in [
        GameCommand::Start,
        GameCommand::Move(Direction::Right),
        GameCommand::TogglePause,
        GameCommand::Move(Direction::Right),
        GameCommand::TogglePause,
        GameCommand::Stop,
    ] {
        game.apply(command).unwrap();
    }

    let events = drain(&log);
    assert_eq!(events.first().unwrap(), "board_ready(one,full)");
    assert!(events.contains(&"next_level(one,1,two,1)".to_string()));
    assert_eq!(events.last().unwrap(), "game_stopped(1,false)");
}

#[test]
fn test_listener_error_propagates_after_commit() {
    let mut game = controller(two_level_pack());
    game.start_game().unwrap();
    game.add_lifecycle_listener(|event: &LifecycleEvent<'_>| -> Result<(), ListenerError> {
        match event {
            LifecycleEvent::ScoreUpdated { .. } => Err(ListenerError::new("score_view", "closed")),
            _ => Ok(()),
        }
    });

    let err = game.move_player(Direction::Right).unwrap_err();

    match err {
        GameError::Listener(inner) => assert_eq!(inner.listener, "score_view"),
        other => panic!("expected listener error, got {:?}", other),
    }
    // The winning move still went through and advanced the level
    assert_eq!(game.level_index(), Some(1));
    assert_eq!(game.current_score(), 0);
    assert_eq!(game.total_score(), 1);
}

#[test]
fn test_failing_board_listener_does_not_block_advance() {
    let mut game = controller(two_level_pack());
    let log = record_events(&mut game);
    game.add_board_listener(|event: &BoardReady<'_>| -> Result<(), ListenerError> {
        match event.deltas {
            Some(_) => Err(ListenerError::new("board_view", "redraw failed")),
            None => Ok(()),
        }
    });
    game.start_game().unwrap();
    drain(&log);

    let err = game.move_player(Direction::Right).unwrap_err();

    match err {
        GameError::Listener(inner) => assert_eq!(inner.listener, "board_view"),
        other => panic!("expected listener error, got {:?}", other),
    }
    assert_eq!(game.level_index(), Some(1));
    assert!(!game.board_state().unwrap().is_solved());
    assert_eq!(
        drain(&log),
        vec![
            "score_updated(1,0)",
            "board_ready(one,1)",
            "score_updated(0,1)",
            "board_ready(two,full)",
            "next_level(one,1,two,1)",
        ]
    );
}

#[test]
fn test_failing_board_listener_on_last_level_still_stops() {
    let mut game = controller(LevelPack::new("single", vec![corridor("only", 1)]));
    game.add_board_listener(|event: &BoardReady<'_>| -> Result<(), ListenerError> {
        match event.deltas {
            Some(_) => Err(ListenerError::new("board_view", "redraw failed")),
            None => Ok(()),
        }
    });
    game.start_game().unwrap();

    assert!(matches!(
        game.move_player(Direction::Right),
        Err(GameError::Listener(_))
    ));
    assert!(!game.is_running());
}

#[test]
fn test_failing_listener_keeps_pickup() {
    let pack = LevelPack::new("pickup", vec![level("p", &["@g.$x"])]);
    let mut game = controller(pack);
    game.start_game().unwrap();
    game.add_board_listener(|_: &BoardReady<'_>| -> Result<(), ListenerError> {
        Err(ListenerError::new("board_view", "redraw failed"))
    });

    assert!(game.move_player(Direction::Right).is_err());
    assert_eq!(game.power_ups(), tui_sokoban::types::PowerUps::GHOST);
}

#[test]
fn test_failed_game_stopped_listener_still_ends_session() {
    let mut game = controller(two_level_pack());
    game.start_game().unwrap();
    game.add_lifecycle_listener(|event: &LifecycleEvent<'_>| -> Result<(), ListenerError> {
        match event {
            LifecycleEvent::GameStopped { .. } => Err(ListenerError::new("summary", "closed")),
            _ => Ok(()),
        }
    });

    assert!(game.stop_game(false).is_err());
    assert!(!game.is_running());
}

#[test]
fn test_removed_listener_not_called() {
    let mut game = controller(two_level_pack());
    let log = record_events(&mut game);
    let extra = game.add_lifecycle_listener(
        |_: &LifecycleEvent<'_>| -> Result<(), ListenerError> {
            Err(ListenerError::new("stale", "should not run"))
        },
    );

    assert!(game.remove_lifecycle_listener(extra));
    assert!(!game.remove_lifecycle_listener(extra));
    game.start_game().unwrap();
    assert_eq!(drain(&log).len(), 3);
}
