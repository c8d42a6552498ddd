//! Configuration for a Node

use crate::error::{ArenaError, Result};

/// Main configuration for a Node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    /// Interval between frame ticks while the engine is running (in milliseconds)
    pub frame_interval_ms: u64,

    /// Timeout for step() while the engine is not running (in milliseconds)
    /// step() returns `StepResult::Timeout` when no command arrives within it
    pub idle_timeout_ms: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16, // ~60 frames per second
            idle_timeout_ms: 1000,
        }
    }
}

impl NodeConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frame interval in milliseconds
    pub fn with_frame_interval_ms(mut self, interval_ms: u64) -> Self {
        self.frame_interval_ms = interval_ms;
        self
    }

    /// Set the idle timeout in milliseconds
    pub fn with_idle_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.idle_timeout_ms = timeout_ms;
        self
    }

    /// Check that both intervals are non-zero
    pub fn validate(&self) -> Result<()> {
        if self.frame_interval_ms == 0 {
            return Err(ArenaError::InvalidConfig(
                "frame interval must be at least 1 ms".to_string(),
            ));
        }
        if self.idle_timeout_ms == 0 {
            return Err(ArenaError::InvalidConfig(
                "idle timeout must be at least 1 ms".to_string(),
            ));
        }
        Ok(())
    }
}
