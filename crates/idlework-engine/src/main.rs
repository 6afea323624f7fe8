//! Terminal runner for idlework.
//!
//! Wires the game to the terminal: frames come from a tokio interval,
//! commands arrive one per line on stdin, and progress is saved on a timer
//! and at shutdown. The frame timer only exists while the game is running;
//! `stop` drops it and `start` builds a fresh one.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `idlework-config.yaml` (or the path given as
//!    the first argument), falling back to defaults
//! 2. Initialize structured logging (tracing) on stderr
//! 3. Open the save directory and build the game, restoring any save
//! 4. Start the frame loop
//! 5. Serve stdin commands until `quit`, end of input, or Ctrl-C
//! 6. Save and exit

mod commands;
mod console;
mod error;

use std::io::BufRead;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use idlework_core::config::LoggingConfig;
use idlework_core::{Game, GameConfig};
use idlework_db::{FileStore, KeyValueStore};
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::commands::{Command, ParseError};
use crate::console::ConsoleObserver;
use crate::error::EngineError;

/// Config file read when no path is given.
const DEFAULT_CONFIG_PATH: &str = "idlework-config.yaml";

/// Commands buffered between the stdin thread and the game loop.
const COMMAND_QUEUE: usize = 64;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the game cannot be built.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let found = config_path.exists();
    let config = GameConfig::load_or_default(&config_path)?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("idlework-engine starting");
    if found {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }

    // 3. Build the game.
    let store = FileStore::new(config.persistence.data_dir.clone());
    info!(dir = %store.dir().display(), "Save directory");
    let frame_interval = Duration::from_millis(config.time.frame_interval_ms);
    let autosave_interval = Duration::from_secs(config.persistence.autosave_interval_secs);
    let mut game = Game::new(config, store)?;
    game.subscribe(Box::new(ConsoleObserver));

    // 4. Start the frame loop.
    game.start(Instant::now());
    println!("{}", console::format_status(&game.snapshot(), game.visible_actors(), true));
    println!("type `help` for commands");

    // 5. Serve commands.
    let (tx, mut rx) = mpsc::channel(COMMAND_QUEUE);
    spawn_stdin_reader(tx);

    let mut frames = Some(frame_timer(frame_interval));
    let mut autosave = tokio::time::interval(autosave_interval);
    autosave.set_missed_tick_behavior(MissedTickBehavior::Delay);
    autosave.reset();

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            () = next_frame(&mut frames), if frames.is_some() => {
                let _ = game.frame(Instant::now());
            }
            command = rx.recv() => {
                let Some(command) = command else {
                    info!("input closed");
                    break;
                };
                if handle(&mut game, &command).is_break() {
                    break;
                }
                if game.is_running() != frames.is_some() {
                    frames = game.is_running().then(|| frame_timer(frame_interval));
                }
            }
            _ = autosave.tick() => {
                let saved = game.save();
                debug!(saved, "autosave");
            }
            result = &mut shutdown => {
                if let Err(err) = result {
                    warn!(error = %err, "signal handler failed");
                }
                info!("interrupt received");
                break;
            }
        }
    }

    // 6. Save and exit.
    game.stop();
    let saved = game.save();
    info!(saved, "idlework-engine stopped");
    Ok(())
}

/// Apply one command. Breaks when the runner should exit.
fn handle<S: KeyValueStore>(game: &mut Game<S>, command: &Command) -> ControlFlow<()> {
    debug!(%command, "command");
    match command {
        Command::Tap => {
            let _ = game.perform_action();
        }
        Command::Menu => {
            let _ = game.open_upgrade_menu();
        }
        Command::Buy(id) => {
            let _ = game.purchase(id);
        }
        Command::Status => {
            println!(
                "{}",
                console::format_status(&game.snapshot(), game.visible_actors(), game.is_running())
            );
        }
        Command::Start => game.start(Instant::now()),
        Command::Stop => game.stop(),
        Command::Save => {
            if game.save() {
                println!("saved");
            } else {
                println!("save failed, see log");
            }
        }
        Command::Reset => game.reset(),
        Command::Help => println!("{}", console::format_help()),
        Command::Quit => return ControlFlow::Break(()),
    }
    ControlFlow::Continue(())
}

/// A frame timer that skips missed ticks instead of bursting.
fn frame_timer(period: Duration) -> Interval {
    let mut timer = tokio::time::interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    timer
}

/// Wait for the next frame tick. Pending forever without a timer.
async fn next_frame(frames: &mut Option<Interval>) {
    let Some(timer) = frames else {
        return std::future::pending().await;
    };
    let _ = timer.tick().await;
}

/// Read stdin on a dedicated thread and forward parsed commands.
///
/// The thread is never joined; it ends with the process.
fn spawn_stdin_reader(tx: mpsc::Sender<Command>) {
    let _ = std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!(error = %err, "stdin read failed");
                    break;
                }
            };
            match Command::parse(&line) {
                Ok(command) => {
                    if tx.blocking_send(command).is_err() {
                        break;
                    }
                }
                Err(ParseError::Empty) => {}
                Err(err) => println!("{err}"),
            }
        }
        debug!("stdin reader finished");
    });
}

/// Install the tracing subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
