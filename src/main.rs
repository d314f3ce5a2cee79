use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use ekans::config::{GameConfig, WINDOW_TITLE};
use ekans::error::InitializationError;
use ekans::game::Game;
use ekans::input::{GameInput, InputHandler};
use ekans::renderer;
use ekans::terminal_runtime::{TerminalSession, install_panic_hook};
use ekans::timer::IntervalTimer;
use log::{LevelFilter, error, info};
use simplelog::{Config, WriteLogger};
use thiserror::Error;

/// Upper bound on how long the loop waits for input between redraws.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about = "Classic Snake on a 30x20 grid")]
struct Cli {
    /// Seed the food sequence for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// File that receives the game log.
    #[arg(long = "log-file", default_value = "ekans.log")]
    log_file: PathBuf,

    /// Most verbose level written to the log file.
    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
        }
    }
}

#[derive(Debug, Error)]
enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("could not start logging: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error(transparent)]
    Initialization(#[from] InitializationError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match try_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(app_error) => {
            error!("{app_error}");
            eprintln!("ekans: {app_error}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: Cli) -> Result<(), AppError> {
    let log_file = File::create(&cli.log_file)?;
    WriteLogger::init(cli.log_level.into(), Config::default(), log_file)?;
    info!("starting {WINDOW_TITLE}");

    let config = GameConfig::default();
    let timer = IntervalTimer::new();
    let mut game = match cli.seed {
        Some(seed) => {
            info!("using food seed {seed}");
            Game::new_with_seed(config, timer, seed)?
        }
        None => Game::new(config, timer)?,
    };

    install_panic_hook();
    let mut session = TerminalSession::enter(WINDOW_TITLE)?;
    run(&mut session, &mut game)?;

    info!("exiting with score {}", game.score());
    Ok(())
}

fn run(session: &mut TerminalSession, game: &mut Game) -> Result<(), AppError> {
    let mut input = InputHandler::new();

    loop {
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &game.snapshot()))?;

        let wait = game
            .timer()
            .time_until_due(Instant::now())
            .map_or(FRAME_INTERVAL, |due| due.min(FRAME_INTERVAL));

        if let Some(game_input) = input.poll_input(wait)? {
            if game_input == GameInput::Quit {
                info!("quit requested");
                break;
            }

            game.handle_input(game_input)?;
        }

        // Ticks are dropped while the round is over; restart re-arms the timer.
        if game.timer_mut().fire_if_due(Instant::now()) && !game.is_game_over() {
            game.advance_tick();
        }
    }

    Ok(())
}
