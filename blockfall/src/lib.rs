//! # blockfall
//!
//! A single-player falling-block puzzle game.
//!
//! Pieces drawn from a seven-shape catalog fall on a fixed grid; full rows
//! are cleared and scored, and every clear shortens the drop interval. The
//! simulation lives in [`Game`] and takes the current time as an argument,
//! so it can be driven by the [`tick_arena`] frame loop or stepped directly
//! in tests.

// Module declarations
pub mod board;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod game;
pub mod piece;
pub mod state;
pub mod term_render;

// Re-exports for convenience
pub use board::{Board, Cell};
pub use catalog::{Color, PieceKind};
pub use config::GameConfig;
pub use engine::BlocksEngine;
pub use game::{Command, CommandOutcome, Game, GameStatus, TickOutcome};
pub use piece::{Piece, Shape};
pub use state::{GameEvent, GameSnapshot};
pub use term_render::{AnsiTermStyle, GameView, PlainTermStyle, TermRender, TermStyle};
