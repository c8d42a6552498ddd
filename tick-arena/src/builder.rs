use crate::config::NodeConfig;
use crate::engine::GameEngine;
use crate::error::{ArenaError, Result};
use crate::node::Node;

/// Builder for arena nodes
///
/// Allows configuring the node before creating it.
///
/// # Example
/// ```no_run
/// use std::time::Instant;
/// use tick_arena::{GameEngine, Node, Result};
///
/// # struct MyEngine;
/// # impl GameEngine for MyEngine {
/// #     type Action = u8;
/// #     type State = u8;
/// #     fn process_action(&mut self, a: u8, _: Instant) -> Result<u8> { Ok(a) }
/// #     fn tick(&mut self, _: Instant) -> u8 { 0 }
/// #     fn is_running(&self) -> bool { true }
/// #     fn current_state(&self) -> u8 { 0 }
/// # }
/// # fn example() -> Result<()> {
/// let node = Node::builder(MyEngine)
///     .name("player".to_string())?
///     .frame_interval_ms(16)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[must_use = "builders do nothing unless `build()` is called"]
pub struct NodeBuilder<E: GameEngine> {
    engine: E,
    name: String,
    config: NodeConfig,
}

impl<E: GameEngine> NodeBuilder<E> {
    /// Create a new NodeBuilder
    pub(crate) fn new(engine: E) -> Self {
        Self {
            engine,
            name: "arena".to_string(),
            config: NodeConfig::default(),
        }
    }

    /// Set the node name
    pub fn name(mut self, name: String) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(ArenaError::InvalidConfig(
                "Node name cannot be empty".to_string(),
            ));
        }
        self.name = name;
        Ok(self)
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: NodeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the frame interval in milliseconds
    pub fn frame_interval_ms(mut self, interval_ms: u64) -> Self {
        self.config.frame_interval_ms = interval_ms;
        self
    }

    /// Set the idle timeout in milliseconds
    pub fn idle_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.idle_timeout_ms = timeout_ms;
        self
    }

    /// Validate the configuration and create the node
    pub fn build(self) -> Result<Node<E>> {
        Node::new_internal(self.name, self.config, self.engine)
    }
}
