/// Error types for the tick-arena library
use thiserror::Error;

/// Result type alias for arena operations
pub type Result<T> = std::result::Result<T, ArenaError>;

/// Errors that can occur in tick-arena operations
#[derive(Debug, Error)]
pub enum ArenaError {
    /// Configuration value rejected during validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Game engine error
    #[error("Engine error: {0}")]
    Engine(String),

    /// Command channel has no remaining senders
    #[error("Command channel closed")]
    ChannelClosed,
}
