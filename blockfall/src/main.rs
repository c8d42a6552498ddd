use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::Context;
use blockfall::{
    AnsiTermStyle, BlocksEngine, Command, GameConfig, GameSnapshot, GameView, PlainTermStyle,
    TermRender, TermStyle,
};
use clap::Parser;
use console::{Key, Term};
use tick_arena::{Node, NodeCommand, StepResult};
use tokio::runtime::Handle;

/// Terminals report key presses only; fast drop ends when Down stops repeating
const FAST_DROP_HOLD: Duration = Duration::from_millis(600);

type CommandSender = flume::Sender<NodeCommand<Command>>;

/// blockfall - falling-block puzzle for the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON game config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible piece sequence
    #[arg(short, long)]
    seed: Option<u64>,

    /// Frame interval in milliseconds
    #[arg(short, long, default_value_t = 16)]
    frame_ms: u64,

    /// Render without colors or box-drawing characters
    #[arg(short, long)]
    plain: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "multi_thread", worker_threads = 1)]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so they can be redirected away from the board
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = match &args.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    let engine = match args.seed {
        Some(seed) => BlocksEngine::with_seed(config, seed)?,
        None => BlocksEngine::new(config)?,
    };
    let mut node = Node::builder(engine)
        .name("blockfall".to_string())?
        .frame_interval_ms(args.frame_ms)
        .build()?;

    let node_sender = node.sender();
    // The game starts right away
    node_sender.send(NodeCommand::GameAction(Command::Reset))?;

    // Spawn keyboard input task
    let keyboard_sender = node_sender.clone();
    let runtime = Handle::current();
    let keyboard_task = tokio::task::spawn_blocking(move || read_keys(keyboard_sender, runtime));

    let render_term = Term::stdout();
    render_term.clear_screen()?;
    render_term.hide_cursor()?;

    let result = if args.plain {
        run(&mut node, &render_term, &PlainTermStyle).await
    } else {
        run(&mut node, &render_term, &AnsiTermStyle).await
    };

    render_term.show_cursor()?;
    keyboard_task.abort();
    let _ = keyboard_task.await;
    result?;

    tracing::info!("{}", node.stats());
    if let Some(state) = node.game_state() {
        let heading = if state.is_game_over() { "Game Over! " } else { "" };
        println!("{}Final score: {}, lines: {}", heading, state.score, state.lines);
    }
    Ok(())
}

/// Main step loop - processes frames and commands and renders state
async fn run(
    node: &mut Node<BlocksEngine>,
    term: &Term,
    style: &impl TermStyle,
) -> anyhow::Result<()> {
    loop {
        let result = node.step().await?;
        if matches!(result, StepResult::Stop) {
            break;
        }
        if let Some(state) = result.state()
            && state.event.changes_view()
        {
            render_game(term, state, style)?;
        }
    }
    Ok(())
}

fn render_game(term: &Term, state: &GameSnapshot, style: &impl TermStyle) -> anyhow::Result<()> {
    let lines = GameView::new(state).render(style);
    term.move_cursor_to(0, 0)?;
    for line in lines {
        term.write_line(&line)?;
    }
    term.flush().context("Failed to draw frame")?;
    Ok(())
}

fn read_keys(sender: CommandSender, runtime: Handle) {
    let input_term = Term::stdout();
    let fast_drop = FastDropRelease::new(sender.clone(), runtime);
    loop {
        let key = match input_term.read_key() {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!("Keyboard input closed: {}", e);
                let _ = sender.send(NodeCommand::Stop);
                break;
            }
        };
        let command = match key {
            Key::ArrowLeft => Some(Command::MoveLeft),
            Key::ArrowRight => Some(Command::MoveRight),
            Key::ArrowUp => Some(Command::Rotate),
            Key::ArrowDown => {
                if !fast_drop.press() {
                    break;
                }
                None
            }
            Key::Char(' ') => Some(Command::TogglePause),
            Key::Enter | Key::Char('s') | Key::Char('S') => Some(Command::Start),
            Key::Char('r') | Key::Char('R') => Some(Command::Reset),
            Key::Char('q') | Key::Char('Q') | Key::Escape => {
                let _ = sender.send(NodeCommand::Stop);
                break;
            }
            _ => None,
        };

        if let Some(command) = command
            && sender.send(NodeCommand::GameAction(command)).is_err()
        {
            break;
        }
    }
}

/// Turns repeated Down presses into one held fast drop
///
/// Every press switches fast drop on and arms a release timer. Only the
/// timer of the latest press sends `FastDropOff`.
struct FastDropRelease {
    sender: CommandSender,
    runtime: Handle,
    presses: Arc<AtomicU64>,
}

impl FastDropRelease {
    fn new(sender: CommandSender, runtime: Handle) -> Self {
        Self {
            sender,
            runtime,
            presses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Returns false once the node is gone
    fn press(&self) -> bool {
        let press = self.presses.fetch_add(1, Ordering::SeqCst) + 1;
        if self
            .sender
            .send(NodeCommand::GameAction(Command::FastDropOn))
            .is_err()
        {
            return false;
        }
        let presses = self.presses.clone();
        let sender = self.sender.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(FAST_DROP_HOLD).await;
            if presses.load(Ordering::SeqCst) == press {
                let _ = sender.send(NodeCommand::GameAction(Command::FastDropOff));
            }
        });
        true
    }
}
