use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::game::{Command, CommandOutcome, Game, GameStatus, TickOutcome};
use crate::piece::Piece;

/// What produced a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Plain read, nothing advanced
    Idle,
    Tick(TickOutcome),
    Command {
        command: Command,
        outcome: CommandOutcome,
    },
}

impl GameEvent {
    /// Whether the visible state may have changed
    pub fn changes_view(&self) -> bool {
        match self {
            GameEvent::Idle | GameEvent::Tick(TickOutcome::Waiting | TickOutcome::Halted) => false,
            GameEvent::Tick(_) => true,
            GameEvent::Command { outcome, .. } => *outcome == CommandOutcome::Applied,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Locked cells with the active piece drawn in
    pub well: Board,
    pub active: Option<Piece>,
    pub score: u64,
    pub lines: u64,
    pub status: GameStatus,
    pub drop_interval_ms: f64,
    pub fast_drop: bool,
    pub event: GameEvent,
}

impl GameSnapshot {
    pub(crate) fn capture(game: &Game) -> Self {
        let mut well = game.board().clone();
        // A blocked spawn is never drawn
        if game.status() != GameStatus::GameOver
            && let Some(piece) = game.active()
        {
            well.merge(piece);
        }
        GameSnapshot {
            well,
            active: game.active().cloned(),
            score: game.score(),
            lines: game.lines(),
            status: game.status(),
            drop_interval_ms: game.drop_interval().as_secs_f64() * 1000.0,
            fast_drop: game.is_fast_drop(),
            event: GameEvent::Idle,
        }
    }

    pub fn with_event(mut self, event: GameEvent) -> Self {
        self.event = event;
        self
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}
