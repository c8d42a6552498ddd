//! Game configuration

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tick_arena::{ArenaError, Result as ArenaResult};

/// Constants fixed for the lifetime of a game
///
/// Board size comes from the drawing surface divided by the cell size.
/// Missing fields in a config file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Edge length of one cell, in surface units
    pub cell_size: u32,
    /// Drawing surface width, in surface units
    pub surface_width: u32,
    /// Drawing surface height, in surface units
    pub surface_height: u32,
    /// Drop interval at the start of a game (in milliseconds)
    pub base_drop_interval_ms: u64,
    /// Multiplier applied to the drop interval after each line clear
    pub speed_up_factor: f64,
    /// Score awarded per cleared row
    pub score_per_line: u64,
    /// Drop interval while fast drop is held (in milliseconds)
    pub fast_drop_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: 20,
            surface_width: 400,
            surface_height: 600,
            base_drop_interval_ms: 500,
            speed_up_factor: 0.95,
            score_per_line: 10,
            fast_drop_interval_ms: 50,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON config file and validate it
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Size the surface so the board is exactly `cols × rows` cells
    pub fn with_board_size(mut self, cols: u32, rows: u32) -> Self {
        self.surface_width = cols * self.cell_size;
        self.surface_height = rows * self.cell_size;
        self
    }

    /// Set the base drop interval in milliseconds
    pub fn with_base_drop_interval_ms(mut self, interval_ms: u64) -> Self {
        self.base_drop_interval_ms = interval_ms;
        self
    }

    /// Set the fast drop interval in milliseconds
    pub fn with_fast_drop_interval_ms(mut self, interval_ms: u64) -> Self {
        self.fast_drop_interval_ms = interval_ms;
        self
    }

    pub fn columns(&self) -> usize {
        (self.surface_width / self.cell_size.max(1)) as usize
    }

    pub fn rows(&self) -> usize {
        (self.surface_height / self.cell_size.max(1)) as usize
    }

    pub fn base_drop_interval(&self) -> Duration {
        Duration::from_millis(self.base_drop_interval_ms)
    }

    pub fn fast_drop_interval(&self) -> Duration {
        Duration::from_millis(self.fast_drop_interval_ms)
    }

    pub fn validate(&self) -> ArenaResult<()> {
        if self.cell_size == 0 {
            return Err(invalid("cell_size must be positive"));
        }
        if self.columns() == 0 || self.rows() == 0 {
            return Err(invalid("surface must hold at least one cell"));
        }
        if self.base_drop_interval_ms == 0 || self.fast_drop_interval_ms == 0 {
            return Err(invalid("drop intervals must be positive"));
        }
        if !(self.speed_up_factor > 0.0 && self.speed_up_factor <= 1.0) {
            return Err(invalid("speed_up_factor must be in (0, 1]"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> ArenaError {
    ArenaError::InvalidConfig(message.to_string())
}
