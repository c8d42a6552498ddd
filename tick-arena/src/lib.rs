//! # tick-arena
//!
//! A small frame-loop runtime for single-player games.
//!
//! ## Overview
//!
//! A [`Node`] owns a game engine and drives it from one async task: it
//! schedules frame ticks while the engine reports it is running and applies
//! actions sent over a command channel in between. When the engine halts
//! (paused, game over) the frame chain stops and the node only waits for
//! commands.
//!
//! ## Key Features
//!
//! - Engine integration via the [`GameEngine`] trait
//! - Self-terminating frame schedule, restarted by the next action
//! - Commands over a cloneable `flume` sender, usable from blocking input threads
//! - Frame and action counters
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Instant;
//! use tick_arena::{GameEngine, Node, NodeCommand, StepResult};
//!
//! struct Counter(u32);
//!
//! impl GameEngine for Counter {
//!     type Action = u32;
//!     type State = u32;
//!     fn process_action(&mut self, n: u32, _: Instant) -> tick_arena::Result<u32> {
//!         self.0 += n;
//!         Ok(self.0)
//!     }
//!     fn tick(&mut self, _: Instant) -> u32 { self.0 }
//!     fn is_running(&self) -> bool { true }
//!     fn current_state(&self) -> u32 { self.0 }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut node = Node::builder(Counter(0)).build()?;
//!     node.sender().send(NodeCommand::GameAction(1))?;
//!     while let StepResult::Frame(_) | StepResult::GameState(_) = node.step().await? {}
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod node;
pub mod stats;
pub mod types;

// Re-exports for convenience
pub use builder::NodeBuilder;
pub use config::NodeConfig;
pub use engine::GameEngine;
pub use error::{ArenaError, Result};
pub use node::{Node, NodeCommand};
pub use stats::NodeStats;
pub use types::{NodeState, StepResult};
