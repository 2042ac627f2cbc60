use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Largest board side accepted. Keeps every cell addressable by the
/// terminal renderer's `u16` cursor coordinates with room for the status line.
pub const MAX_BOARD_SIDE: i32 = 1024;

/// Tunables for a game. Every field falls back to its default when missing
/// from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width including the border
    pub width: i32,
    /// Board height including the border
    pub height: i32,
    /// Delay between ticks at level 1
    pub initial_speed_ms: u64,
    /// Floor for the tick delay
    pub min_speed_ms: u64,
    /// How much the delay shrinks per level
    pub speed_step_ms: u64,
    pub points_per_food: u32,
    pub points_per_level: u32,
    /// Fixed RNG seed for reproducible food placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 10,
            initial_speed_ms: 500,
            min_speed_ms: 50,
            speed_step_ms: 20,
            points_per_food: 10,
            points_per_level: 50,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Read a TOML config file. The result is validated before it is returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = toml::from_str(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let side = 3..=MAX_BOARD_SIDE;
        if !side.contains(&self.width) || !side.contains(&self.height) {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.points_per_level == 0 {
            return Err(Error::InvalidConfig(
                "points_per_level must be greater than zero".to_string(),
            ));
        }
        if self.min_speed_ms > self.initial_speed_ms {
            return Err(Error::InvalidConfig(format!(
                "min_speed_ms ({}) exceeds initial_speed_ms ({})",
                self.min_speed_ms, self.initial_speed_ms
            )));
        }
        Ok(())
    }
}
