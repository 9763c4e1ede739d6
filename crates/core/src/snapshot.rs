use serde::{Deserialize, Serialize};

use crate::types::{Position, PowerUps};

/// Query view of the controller, detached from its borrows
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub running: bool,
    pub paused: bool,
    pub accepts_input: bool,
    pub level_index: Option<usize>,
    pub level_name: Option<String>,
    pub lives: u32,
    pub max_lives: u32,
    pub streak: u32,
    pub current_score: u32,
    pub total_score: u32,
    pub power_ups: PowerUps,
    pub player: Option<Position>,
    pub num_crates: usize,
    pub num_matched: usize,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        let max_lives = self.max_lives;
        *self = Self::default();
        self.max_lives = max_lives;
    }

    pub fn playable(&self) -> bool {
        self.running && !self.paused && self.accepts_input
    }
}
