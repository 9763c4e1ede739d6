//! Game configuration: starting and maximum lives.
//!
//! Values come from [`GameConfig::default`] and can be overridden through
//! environment variables:
//!
//! - `SOKOBAN_STARTING_LIVES`: lives granted at game start (default: 3)
//! - `SOKOBAN_MAX_LIVES`: maximum lives reported to views (default: 5)

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{DEFAULT_MAX_LIVES, DEFAULT_STARTING_LIVES};

pub const STARTING_LIVES_ENV: &str = "SOKOBAN_STARTING_LIVES";
pub const MAX_LIVES_ENV: &str = "SOKOBAN_MAX_LIVES";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub starting_lives: u32,
    pub max_lives: u32,
}

impl GameConfig {
    pub fn new(starting_lives: u32, max_lives: u32) -> Result<Self, ConfigError> {
        let config = Self {
            starting_lives,
            max_lives,
        };
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `SOKOBAN_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let starting_lives = parse_lives(STARTING_LIVES_ENV, lookup(STARTING_LIVES_ENV))?
            .unwrap_or(defaults.starting_lives);
        let max_lives =
            parse_lives(MAX_LIVES_ENV, lookup(MAX_LIVES_ENV))?.unwrap_or(defaults.max_lives);
        Self::new(starting_lives, max_lives)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_lives == 0 {
            return Err(ConfigError::NoStartingLives);
        }
        if self.max_lives < self.starting_lives {
            return Err(ConfigError::MaxBelowStarting {
                starting: self.starting_lives,
                max: self.max_lives,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_lives: DEFAULT_STARTING_LIVES,
            max_lives: DEFAULT_MAX_LIVES,
        }
    }
}

fn parse_lives(key: &'static str, raw: Option<String>) -> Result<Option<u32>, ConfigError> {
    match raw {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}
