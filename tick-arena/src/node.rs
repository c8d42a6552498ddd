/// Node management module
use std::time::{Duration, Instant};

use crate::builder::NodeBuilder;
use crate::config::NodeConfig;
use crate::engine::GameEngine;
use crate::error::{ArenaError, Result};
use crate::stats::{NodeStats, StatsTracker};
use crate::types::{NodeState, StepResult};

/// Commands that can be sent to the node
#[derive(Debug, Clone)]
pub enum NodeCommand<A> {
    /// Process a game engine action
    GameAction(A),
    /// Stop the node's run loop
    Stop,
}

/// Main Node interface - drives a game engine with frames and commands
///
/// The node owns its engine. Frame ticks and commands are handled one at a
/// time from `step()`, so the engine is only ever touched from one task.
pub struct Node<E: GameEngine> {
    /// Node name, used in log output
    name: String,

    /// Node configuration
    config: NodeConfig,

    /// Game engine
    engine: E,

    /// Receiver for commands from the application
    command_rx: flume::Receiver<NodeCommand<E::Action>>,

    /// Sender for commands from the application
    command_tx: flume::Sender<NodeCommand<E::Action>>,

    /// Deadline of the next frame, `None` while the frame chain is stopped
    next_frame: Option<tokio::time::Instant>,

    /// Set once a Stop command was received
    stopped: bool,

    /// Last state produced by the engine
    game_state: Option<E::State>,

    /// Statistics tracker for ticks and actions
    stats_tracker: StatsTracker,
}

impl<E: GameEngine> Node<E> {
    /// Start configuring a node around `engine`
    pub fn builder(engine: E) -> NodeBuilder<E> {
        NodeBuilder::new(engine)
    }

    /// Create a new Node instance (internal use only - use the builder)
    pub(crate) fn new_internal(name: String, config: NodeConfig, engine: E) -> Result<Self> {
        config.validate()?;

        tracing::info!(
            "Node '{}' initialized (frame {} ms, idle timeout {} ms)",
            name,
            config.frame_interval_ms,
            config.idle_timeout_ms
        );

        let (command_tx, command_rx) = flume::unbounded();

        Ok(Self {
            name,
            config,
            engine,
            command_rx,
            command_tx,
            next_frame: None,
            stopped: false,
            game_state: None,
            stats_tracker: StatsTracker::new(),
        })
    }

    /// Get node name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get node configuration
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Get a sender for sending commands to this node
    pub fn sender(&self) -> flume::Sender<NodeCommand<E::Action>> {
        self.command_tx.clone()
    }

    /// Get a reference to the engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Execute one step of the node
    ///
    /// Returns when either:
    /// - The next frame deadline passes while the engine is running (returns Frame)
    /// - A game action arrives and is processed (returns GameState)
    /// - The idle timeout elapses while the engine is halted (returns Timeout)
    /// - A Stop command is received (returns Stop)
    pub async fn step(&mut self) -> Result<StepResult<E::State>> {
        if self.stopped {
            return Ok(StepResult::Stop);
        }

        if !self.engine.is_running() {
            // Frame chain ends here; it restarts from a fresh deadline once running again
            self.next_frame = None;
            let timeout = Duration::from_millis(self.config.idle_timeout_ms);
            return tokio::select! {
                () = tokio::time::sleep(timeout) => Ok(StepResult::Timeout),
                command = self.command_rx.recv_async() => {
                    let command = command.map_err(|_| ArenaError::ChannelClosed)?;
                    self.handle_command(command)
                }
            };
        }

        let frame = Duration::from_millis(self.config.frame_interval_ms);
        let deadline = *self
            .next_frame
            .get_or_insert_with(|| tokio::time::Instant::now() + frame);

        tokio::select! {
            () = tokio::time::sleep_until(deadline) => {
                // Skip missed frames instead of bursting to catch up
                let now = tokio::time::Instant::now();
                let next = deadline + frame;
                self.next_frame = Some(if next > now { next } else { now + frame });
                Ok(self.run_frame())
            }
            command = self.command_rx.recv_async() => {
                let command = command.map_err(|_| ArenaError::ChannelClosed)?;
                self.handle_command(command)
            }
        }
    }

    fn run_frame(&mut self) -> StepResult<E::State> {
        let state = self.engine.tick(Instant::now());
        self.stats_tracker.add_tick();
        self.game_state = Some(state.clone());
        StepResult::Frame(state)
    }

    fn handle_command(&mut self, command: NodeCommand<E::Action>) -> Result<StepResult<E::State>> {
        match command {
            NodeCommand::GameAction(action) => {
                tracing::debug!("Node '{}' processing action {:?}", self.name, action);
                let state = self.engine.process_action(action, Instant::now())?;
                self.stats_tracker.add_action();
                self.game_state = Some(state.clone());
                Ok(StepResult::GameState(state))
            }
            NodeCommand::Stop => {
                tracing::info!("Node '{}' received stop command", self.name);
                self.stopped = true;
                self.next_frame = None;
                Ok(StepResult::Stop)
            }
        }
    }

    /// Get the current node state without advancing anything
    pub fn node_state(&self) -> NodeState {
        if self.stopped {
            NodeState::Stop
        } else if self.engine.is_running() {
            NodeState::Running
        } else {
            NodeState::Idle
        }
    }

    /// Get the last state produced by the engine, if any
    pub fn game_state(&self) -> Option<E::State> {
        self.game_state.clone()
    }

    /// Counters since the node was built
    pub fn stats(&self) -> NodeStats {
        self.stats_tracker.snapshot()
    }
}
