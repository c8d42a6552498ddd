/// Core types for the tick-arena library

/// Result of a single `Node::step()` call
#[derive(Debug, Clone)]
pub enum StepResult<S> {
    /// A frame tick ran and produced this state
    Frame(S),
    /// An action was processed and produced this state
    GameState(S),
    /// Engine is not running and no command arrived within the idle timeout
    Timeout,
    /// Node has stopped
    Stop,
}

impl<S> StepResult<S> {
    /// Returns the state carried by this result, if any
    pub fn state(&self) -> Option<&S> {
        match self {
            StepResult::Frame(state) | StepResult::GameState(state) => Some(state),
            StepResult::Timeout | StepResult::Stop => None,
        }
    }
}

/// Public node state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Engine is running and frames are being scheduled
    Running,
    /// Engine is halted; node waits for commands only
    Idle,
    /// Node has stopped
    Stop,
}

impl std::fmt::Display for NodeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeState::Running => write!(f, "Running"),
            NodeState::Idle => write!(f, "Idle (waiting for commands)"),
            NodeState::Stop => write!(f, "Node stopped"),
        }
    }
}
