use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tick_arena::Result as ArenaResult;

use crate::board::Board;
use crate::catalog::PieceKind;
use crate::config::GameConfig;
use crate::piece::Piece;
use crate::state::GameSnapshot;

/// Drop interval floor, keeps repeated speed-ups strictly positive
const MIN_DROP_INTERVAL: Duration = Duration::from_nanos(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Paused,
    Running,
    GameOver,
}

// Enum with all possible user commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Start,
    TogglePause,
    Reset,
    Rotate,
    MoveLeft,
    MoveRight,
    FastDropOn,
    FastDropOff,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Not running; the tick chain should stop
    Halted,
    /// Drop interval has not elapsed yet
    Waiting,
    /// Active piece dropped one row
    Moved,
    /// Active piece locked, rows cleared, next piece spawned
    Locked { rows_cleared: usize },
    /// Next piece was blocked at spawn
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandOutcome {
    Applied,
    Ignored,
}

/// One game session: board, active piece, score and timing
pub struct Game {
    config: GameConfig,
    board: Board,
    active: Option<Piece>,
    score: u64,
    lines: u64,
    drop_interval: Duration,
    // Time of the last drop event
    last_drop: Instant,
    fast_drop: bool,
    status: GameStatus,
    rng: StdRng,
}

impl Game {
    /// New paused game with no active piece; call `reset` to start
    ///
    /// Fails with `ArenaError::InvalidConfig` if `config` does not validate.
    pub fn new(config: GameConfig) -> ArenaResult<Self> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Like `new`, with a reproducible piece sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> ArenaResult<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> ArenaResult<Self> {
        config.validate()?;
        let board = Board::new(config.columns(), config.rows());
        let drop_interval = config.base_drop_interval();
        Ok(Game {
            config,
            board,
            active: None,
            score: 0,
            lines: 0,
            drop_interval,
            last_drop: Instant::now(),
            fast_drop: false,
            status: GameStatus::Paused,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_fast_drop(&self) -> bool {
        self.fast_drop
    }

    /// Interval the next drop waits for, shortened while fast drop is held
    pub fn effective_drop_interval(&self) -> Duration {
        if self.fast_drop {
            self.drop_interval.min(self.config.fast_drop_interval())
        } else {
            self.drop_interval
        }
    }

    /// Start over from an empty board
    pub fn reset(&mut self, now: Instant) {
        self.score = 0;
        self.lines = 0;
        self.drop_interval = self.config.base_drop_interval();
        self.board.reset();
        self.fast_drop = false;
        self.last_drop = now;
        self.status = GameStatus::Running;
        if self.spawn_next() {
            tracing::info!(
                "Game reset on a {}x{} board",
                self.board.cols(),
                self.board.rows()
            );
        }
    }

    /// Advance the drop timer
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Halted;
        }
        if now.saturating_duration_since(self.last_drop) < self.effective_drop_interval() {
            return TickOutcome::Waiting;
        }
        let Some(piece) = self.active.as_mut() else {
            return TickOutcome::Halted;
        };

        if self.board.is_valid_position(piece, 0, 1) {
            piece.move_by(0, 1);
            self.last_drop = now;
            return TickOutcome::Moved;
        }

        let rows_cleared = self.lock_active();
        if !self.spawn_next() {
            return TickOutcome::GameOver;
        }
        self.last_drop = now;
        TickOutcome::Locked { rows_cleared }
    }

    /// Apply one discrete input
    pub fn handle(&mut self, command: Command, now: Instant) -> CommandOutcome {
        let outcome = match command {
            Command::Reset => {
                self.reset(now);
                CommandOutcome::Applied
            }
            Command::Start => match self.status {
                GameStatus::GameOver => {
                    self.reset(now);
                    CommandOutcome::Applied
                }
                GameStatus::Paused => {
                    self.resume(now);
                    CommandOutcome::Applied
                }
                GameStatus::Running => CommandOutcome::Ignored,
            },
            Command::TogglePause => match self.status {
                GameStatus::Running => {
                    self.status = GameStatus::Paused;
                    CommandOutcome::Applied
                }
                GameStatus::Paused => {
                    self.resume(now);
                    CommandOutcome::Applied
                }
                GameStatus::GameOver => CommandOutcome::Ignored,
            },
            Command::FastDropOn => {
                self.fast_drop = true;
                CommandOutcome::Applied
            }
            Command::FastDropOff => {
                self.fast_drop = false;
                CommandOutcome::Applied
            }
            Command::Rotate | Command::MoveLeft | Command::MoveRight
                if self.status == GameStatus::GameOver =>
            {
                CommandOutcome::Ignored
            }
            Command::Rotate => match self.active.as_mut() {
                Some(piece) => {
                    piece.rotate();
                    CommandOutcome::Applied
                }
                None => CommandOutcome::Ignored,
            },
            Command::MoveLeft => self.shift(-1),
            Command::MoveRight => self.shift(1),
        };
        if outcome == CommandOutcome::Ignored {
            if self.status == GameStatus::GameOver {
                tracing::warn!("Ignored {:?} after game over", command);
            } else {
                tracing::debug!("Ignored {:?} while {:?}", command, self.status);
            }
        }
        outcome
    }

    /// Render-facing copy of the current state
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }

    // Paused -> Running; a game that was never reset starts fresh
    fn resume(&mut self, now: Instant) {
        if self.active.is_none() {
            self.reset(now);
        } else {
            self.status = GameStatus::Running;
        }
    }

    fn shift(&mut self, dx: i32) -> CommandOutcome {
        let Some(piece) = self.active.as_mut() else {
            return CommandOutcome::Ignored;
        };
        if !self.board.is_valid_position(piece, dx, 0) {
            return CommandOutcome::Ignored;
        }
        piece.move_by(dx, 0);
        CommandOutcome::Applied
    }

    // Merge, clear, score and speed up; returns the number of rows cleared
    fn lock_active(&mut self) -> usize {
        let Some(piece) = self.active.take() else {
            return 0;
        };
        self.board.merge(&piece);
        let rows_cleared = self.board.clear_full_rows();
        self.score += self.config.score_per_line * rows_cleared as u64;
        self.lines += rows_cleared as u64;
        if rows_cleared > 0 {
            self.drop_interval = self
                .drop_interval
                .mul_f64(self.config.speed_up_factor)
                .max(MIN_DROP_INTERVAL);
            tracing::debug!(
                "Cleared {} row(s), score {}, drop interval {:?}",
                rows_cleared,
                self.score,
                self.drop_interval
            );
        }
        rows_cleared
    }

    // Spawn a random piece; shape and color are drawn independently.
    // Returns false and ends the game if it does not fit.
    fn spawn_next(&mut self) -> bool {
        let shape = PieceKind::random(&mut self.rng).shape();
        let color = PieceKind::random(&mut self.rng).color();
        let piece = Piece::new(shape, color, self.board.cols());
        let fits = self.board.is_valid_position(&piece, 0, 0);
        tracing::debug!(
            "Spawned {}x{} piece at column {} in {}",
            piece.shape().width(),
            piece.shape().height(),
            piece.x(),
            color.hex()
        );
        self.active = Some(piece);
        if !fits {
            self.status = GameStatus::GameOver;
            tracing::info!("Game over: score {}, lines {}", self.score, self.lines);
        }
        fits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::catalog::Color;
    use crate::piece::Shape;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn started_game(cols: u32, rows: u32) -> (Game, Instant) {
        let mut game = Game::with_seed(GameConfig::new().with_board_size(cols, rows), 42).unwrap();
        let t0 = Instant::now();
        game.reset(t0);
        (game, t0)
    }

    fn filled_count(board: &Board) -> usize {
        board.cells().iter().flatten().filter(|c| !c.is_empty()).count()
    }

    fn single_cell() -> Shape {
        Shape::new(vec![vec![true]])
    }

    // Board where row 3 is one O-piece short of full and the O sits on the floor
    fn stage_single_clear(game: &mut Game) {
        game.board.reset();
        game.board.set_cell(0, 3, Cell::Filled(Color::Blue));
        game.board.set_cell(1, 3, Cell::Filled(Color::Blue));
        game.active = Some(Piece::at(PieceKind::O.shape(), Color::Yellow, 2, 2));
    }

    #[test]
    fn test_new_game_is_paused() {
        let mut game = Game::with_seed(GameConfig::default(), 1).unwrap();
        assert_eq!(game.status(), GameStatus::Paused);
        assert!(game.active().is_none());
        assert_eq!(game.tick(Instant::now() + ms(1000)), TickOutcome::Halted);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let (mut game, t0) = started_game(20, 10);
        game.score = 120;
        game.lines = 12;
        game.drop_interval = ms(100);
        game.board.set_cell(3, 9, Cell::Filled(Color::Red));
        game.status = GameStatus::GameOver;

        game.reset(t0 + ms(5));
        assert_eq!(game.score(), 0);
        assert_eq!(game.lines(), 0);
        assert_eq!(game.drop_interval(), ms(500));
        assert!(game.board().is_empty());
        assert_eq!(game.status(), GameStatus::Running);
        let piece = game.active().unwrap();
        assert_eq!((piece.x(), piece.y()), (10, 0));
    }

    #[test]
    fn test_tick_waits_for_drop_interval() {
        let (mut game, t0) = started_game(20, 10);
        let y0 = game.active().unwrap().y();

        assert_eq!(game.tick(t0 + ms(499)), TickOutcome::Waiting);
        assert_eq!(game.active().unwrap().y(), y0);

        assert_eq!(game.tick(t0 + ms(500)), TickOutcome::Moved);
        assert_eq!(game.active().unwrap().y(), y0 + 1);

        // Marker moved to the drop time
        assert_eq!(game.tick(t0 + ms(900)), TickOutcome::Waiting);
        assert_eq!(game.tick(t0 + ms(1000)), TickOutcome::Moved);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_i_piece_lands_on_bottom_row() {
        let (mut game, t0) = started_game(20, 6);
        game.active = Some(Piece::new(PieceKind::I.shape(), Color::Magenta, 20));

        let mut now = t0;
        let outcome = loop {
            now += ms(500);
            match game.tick(now) {
                TickOutcome::Moved => continue,
                other => break other,
            }
        };

        assert_eq!(outcome, TickOutcome::Locked { rows_cleared: 0 });
        let bottom = game.board().row(5).unwrap();
        let colored: Vec<usize> = (0..20).filter(|&x| !bottom[x].is_empty()).collect();
        assert_eq!(colored, vec![10, 11, 12, 13]);
        assert!(colored.iter().all(|&x| bottom[x] == Cell::Filled(Color::Magenta)));
        assert_eq!(filled_count(game.board()), 4);
        assert_eq!(game.active().unwrap().y(), 0, "next piece spawned");
    }

    #[test]
    fn test_line_clear_scores_and_speeds_up() {
        let (mut game, t0) = started_game(4, 4);
        stage_single_clear(&mut game);

        let outcome = game.tick(t0 + ms(500));
        assert_eq!(outcome, TickOutcome::Locked { rows_cleared: 1 });
        assert_eq!(game.score(), 10);
        assert_eq!(game.lines(), 1);
        assert!((game.drop_interval().as_secs_f64() - 0.475).abs() < 1e-6);

        // Upper half of the O shifted into the bottom row
        let yellow = Cell::Filled(Color::Yellow);
        assert_eq!(
            game.board().row(3),
            Some(&[Cell::Empty, Cell::Empty, yellow, yellow][..])
        );
        assert_eq!(filled_count(game.board()), 2);
    }

    #[test]
    fn test_lock_without_clear_keeps_interval() {
        let (mut game, t0) = started_game(4, 4);
        game.active = Some(Piece::at(PieceKind::O.shape(), Color::Yellow, 0, 2));
        assert_eq!(game.tick(t0 + ms(500)), TickOutcome::Locked { rows_cleared: 0 });
        assert_eq!(game.drop_interval(), ms(500));
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_drop_interval_after_k_clears() {
        let (mut game, t0) = started_game(4, 4);
        let mut now = t0;
        let mut previous = game.drop_interval();
        for k in 1..=8 {
            stage_single_clear(&mut game);
            now += game.drop_interval();
            assert_eq!(game.tick(now), TickOutcome::Locked { rows_cleared: 1 });

            let expected = 0.5 * 0.95f64.powi(k);
            let actual = game.drop_interval().as_secs_f64();
            assert!((actual - expected).abs() < 1e-6, "k={k}: {actual} vs {expected}");
            assert!(game.drop_interval() < previous);
            assert!(game.drop_interval() > Duration::ZERO);
            previous = game.drop_interval();
        }
        assert_eq!(game.lines(), 8);
        assert_eq!(game.score(), 80);
    }

    #[test]
    fn test_drop_interval_stays_positive() {
        let (mut game, _) = started_game(4, 4);
        game.drop_interval = Duration::from_nanos(1);
        stage_single_clear(&mut game);
        game.lock_active();
        assert_eq!(game.drop_interval(), MIN_DROP_INTERVAL);
    }

    #[test]
    fn test_invalid_speed_up_factor_rejected() {
        for factor in [1.5, -0.5, 0.0, f64::NAN] {
            let config = GameConfig {
                speed_up_factor: factor,
                ..GameConfig::new().with_board_size(4, 4)
            };
            let result = Game::with_seed(config, 1);
            assert!(
                matches!(result, Err(tick_arena::ArenaError::InvalidConfig(_))),
                "factor {factor} accepted"
            );
        }

        let config = GameConfig::default().with_fast_drop_interval_ms(0);
        assert!(Game::new(config).is_err());
    }

    #[test]
    fn test_clear_with_neutral_factor_keeps_interval() {
        let config = GameConfig {
            speed_up_factor: 1.0,
            ..GameConfig::new().with_board_size(4, 4)
        };
        let mut game = Game::with_seed(config, 8).unwrap();
        let t0 = Instant::now();
        game.reset(t0);
        stage_single_clear(&mut game);
        assert_eq!(game.tick(t0 + ms(500)), TickOutcome::Locked { rows_cleared: 1 });
        assert_eq!(game.drop_interval(), ms(500));
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let (mut game, _) = started_game(4, 4);
        for x in 0..4 {
            game.board.set_cell(x, 0, Cell::Filled(Color::Red));
        }
        let board_before = game.board().clone();

        assert!(!game.spawn_next());
        assert_eq!(game.status(), GameStatus::GameOver);
        assert_eq!(game.board(), &board_before, "colliding piece is not merged");
        assert_eq!(game.active().unwrap().y(), 0);
    }

    #[test]
    fn test_tick_ends_game_when_stack_blocks_spawn() {
        // Rows 1-2 leave column 4 open, row 0 leaves columns 0 and 4 open.
        // Every catalog piece overlaps the stack at spawn on a 5-wide board.
        let (mut game, t0) = started_game(5, 3);
        for y in 0..3 {
            for x in 0..4 {
                if (x, y) != (0, 0) {
                    game.board.set_cell(x, y, Cell::Filled(Color::Green));
                }
            }
        }
        game.active = Some(Piece::at(single_cell(), Color::Red, 0, 0));

        assert_eq!(game.tick(t0 + ms(500)), TickOutcome::GameOver);
        assert_eq!(game.status(), GameStatus::GameOver);
        assert_eq!(game.lines(), 0);
        assert_eq!(game.board().cell(0, 0), Cell::Filled(Color::Red));

        // Chain terminates and only reset gets out
        assert_eq!(game.tick(t0 + ms(5000)), TickOutcome::Halted);
        assert_eq!(game.handle(Command::MoveLeft, t0), CommandOutcome::Ignored);
        assert_eq!(game.handle(Command::Rotate, t0), CommandOutcome::Ignored);
        assert_eq!(game.handle(Command::TogglePause, t0), CommandOutcome::Ignored);
        assert_eq!(game.status(), GameStatus::GameOver);

        assert_eq!(game.handle(Command::Reset, t0), CommandOutcome::Applied);
        assert_eq!(game.status(), GameStatus::Running);
        assert!(game.board().is_empty());
    }

    #[test]
    fn test_start_from_game_over_resets() {
        let (mut game, t0) = started_game(10, 10);
        game.score = 30;
        game.status = GameStatus::GameOver;
        assert_eq!(game.handle(Command::Start, t0), CommandOutcome::Applied);
        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.score(), 0);

        // Already running: nothing to do
        assert_eq!(game.handle(Command::Start, t0), CommandOutcome::Ignored);
    }

    #[test]
    fn test_start_on_fresh_game_spawns_piece() {
        let mut game = Game::with_seed(GameConfig::default(), 3).unwrap();
        assert_eq!(game.handle(Command::Start, Instant::now()), CommandOutcome::Applied);
        assert_eq!(game.status(), GameStatus::Running);
        assert!(game.active().is_some());
    }

    #[test]
    fn test_pause_halts_ticks_and_keeps_piece() {
        let (mut game, t0) = started_game(10, 10);
        assert_eq!(game.handle(Command::TogglePause, t0), CommandOutcome::Applied);
        assert_eq!(game.status(), GameStatus::Paused);
        let piece = game.active().cloned();
        assert_eq!(game.tick(t0 + ms(2000)), TickOutcome::Halted);
        assert_eq!(game.active().cloned(), piece);

        // Lateral moves are still honoured while paused
        let x = game.active().unwrap().x();
        assert_eq!(game.handle(Command::MoveLeft, t0), CommandOutcome::Applied);
        assert_eq!(game.active().unwrap().x(), x - 1);

        assert_eq!(game.handle(Command::TogglePause, t0), CommandOutcome::Applied);
        assert_eq!(game.status(), GameStatus::Running);
        // Time spent paused counts toward the next drop
        assert_eq!(game.tick(t0 + ms(2000)), TickOutcome::Moved);
    }

    #[test]
    fn test_lateral_moves_stop_at_walls() {
        let (mut game, t0) = started_game(6, 6);
        game.active = Some(Piece::at(PieceKind::O.shape(), Color::Yellow, 1, 0));

        assert_eq!(game.handle(Command::MoveLeft, t0), CommandOutcome::Applied);
        assert_eq!(game.active().unwrap().x(), 0);
        assert_eq!(game.handle(Command::MoveLeft, t0), CommandOutcome::Ignored);
        assert_eq!(game.active().unwrap().x(), 0);

        for _ in 0..4 {
            game.handle(Command::MoveRight, t0);
        }
        assert_eq!(game.active().unwrap().x(), 4);
        assert_eq!(game.handle(Command::MoveRight, t0), CommandOutcome::Ignored);
    }

    #[test]
    fn test_lateral_moves_blocked_by_stack() {
        let (mut game, t0) = started_game(6, 6);
        game.board.set_cell(3, 1, Cell::Filled(Color::Red));
        game.active = Some(Piece::at(PieceKind::O.shape(), Color::Yellow, 1, 0));
        assert_eq!(game.handle(Command::MoveRight, t0), CommandOutcome::Ignored);
        assert_eq!(game.active().unwrap().x(), 1);
    }

    #[test]
    fn test_rotation_is_not_validated() {
        let (mut game, t0) = started_game(6, 6);
        let mut vertical = Piece::at(PieceKind::I.shape(), Color::Red, 5, 2);
        vertical.rotate();
        game.active = Some(vertical);
        assert!(game.board().is_valid_position(game.active().unwrap(), 0, 0));

        // Back to horizontal: cells 5..8 overhang a 6-wide board
        assert_eq!(game.handle(Command::Rotate, t0), CommandOutcome::Applied);
        assert!(!game.board().is_valid_position(game.active().unwrap(), 0, 0));

        // Cannot fall, so it locks; only the in-grid cell is kept
        assert_eq!(game.tick(t0 + ms(500)), TickOutcome::Locked { rows_cleared: 0 });
        assert_eq!(game.board().cell(5, 2), Cell::Filled(Color::Red));
        assert_eq!(filled_count(game.board()), 1);
    }

    #[test]
    fn test_fast_drop_shortens_interval() {
        let (mut game, t0) = started_game(10, 20);
        game.handle(Command::FastDropOn, t0);
        assert!(game.is_fast_drop());
        assert_eq!(game.effective_drop_interval(), ms(50));
        assert_eq!(game.tick(t0 + ms(50)), TickOutcome::Moved);
        assert_eq!(game.tick(t0 + ms(100)), TickOutcome::Moved);

        game.handle(Command::FastDropOff, t0);
        assert_eq!(game.effective_drop_interval(), ms(500));
        assert_eq!(game.tick(t0 + ms(150)), TickOutcome::Waiting);
    }

    #[test]
    fn test_fast_drop_never_slows_down() {
        let (mut game, t0) = started_game(10, 20);
        game.drop_interval = ms(20);
        game.handle(Command::FastDropOn, t0);
        assert_eq!(game.effective_drop_interval(), ms(20));
    }

    #[test]
    fn test_spawn_shape_and_color_drawn_independently() {
        let (mut game, _) = started_game(20, 20);
        let mut mismatched = 0;
        for _ in 0..200 {
            game.board.reset();
            assert!(game.spawn_next());
            let piece = game.active().unwrap();
            let kind = PieceKind::ALL
                .into_iter()
                .find(|kind| &kind.shape() == piece.shape())
                .expect("catalog shape");
            if kind.color() != piece.color() {
                mismatched += 1;
            }
        }
        assert!(mismatched > 0);
    }
}
