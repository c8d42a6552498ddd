use std::time::Instant;

use tick_arena::{GameEngine, Result as ArenaResult};

use crate::config::GameConfig;
use crate::game::{Command, Game, GameStatus, TickOutcome};
use crate::state::{GameEvent, GameSnapshot};

/// Game engine that drives a single blockfall session
pub struct BlocksEngine {
    game: Game,
}

impl BlocksEngine {
    pub fn new(config: GameConfig) -> ArenaResult<Self> {
        Ok(Self {
            game: Game::new(config)?,
        })
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> ArenaResult<Self> {
        Ok(Self {
            game: Game::with_seed(config, seed)?,
        })
    }
}

impl GameEngine for BlocksEngine {
    type Action = Command;
    type State = GameSnapshot;

    fn process_action(&mut self, command: Command, now: Instant) -> ArenaResult<GameSnapshot> {
        let outcome = self.game.handle(command, now);
        Ok(self
            .game
            .snapshot()
            .with_event(GameEvent::Command { command, outcome }))
    }

    fn tick(&mut self, now: Instant) -> GameSnapshot {
        let outcome = self.game.tick(now);
        if let TickOutcome::Locked { rows_cleared } = outcome
            && rows_cleared > 0
        {
            tracing::debug!(
                "Locked piece, {} row(s) cleared, {} lines total",
                rows_cleared,
                self.game.lines()
            );
        }
        self.game.snapshot().with_event(GameEvent::Tick(outcome))
    }

    fn is_running(&self) -> bool {
        self.game.status() == GameStatus::Running
    }

    fn current_state(&self) -> GameSnapshot {
        self.game.snapshot()
    }
}
