use std::time::Instant;

use crate::error::Result;

/// Trait for game engine integration
///
/// The node owns the engine and calls into it from a single task, so
/// implementations need no interior synchronization. Time is always passed
/// in by the caller; engines should not read the clock themselves.
pub trait GameEngine: Send {
    /// Action type from user input
    type Action: Send + std::fmt::Debug;

    /// State type handed back to the application for rendering
    type State: Send + Clone;

    /// Apply one discrete action and return the resulting state
    fn process_action(&mut self, action: Self::Action, now: Instant) -> Result<Self::State>;

    /// Advance time-driven simulation by one frame
    fn tick(&mut self, now: Instant) -> Self::State;

    /// Whether the node should keep scheduling frames
    ///
    /// When this returns false the frame chain stops until an action
    /// makes the engine running again.
    fn is_running(&self) -> bool;

    /// Get current state without advancing anything
    fn current_state(&self) -> Self::State;
}
