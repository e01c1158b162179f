use anyhow::{Context, Result};
use boxnim::{remap, Game, GameConfig, GameResult};
use clap::{ArgAction, Parser, Subcommand};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(name = "boxnim")]
#[command(about = "Two-player box game and a small string remapper for the console")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Optional TOML file with game settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for the daily rolling log file
    #[arg(long, default_value = "./logs", global = true)]
    log_dir: PathBuf,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Default)]
enum Commands {
    /// Play the box game (default)
    #[default]
    Play,
    /// Swap letter case and flatten digits of one line of input
    Remap,
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    fs::create_dir_all(&cli.log_dir)
        .with_context(|| format!("creating log directory {}", cli.log_dir.display()))?;
    let file_appender = tracing_appender::rolling::daily(&cli.log_dir, "boxnim.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(log_level(cli.verbose))
        .with_writer(non_blocking)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("installing the tracing subscriber")?;

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    match cli.command.unwrap_or_default() {
        Commands::Play => {
            info!(max_take = config.max_take, "starting game");
            let result = Game::new(stdin.lock(), stdout.lock(), config)
                .run()
                .context("console I/O failed")?;
            match result {
                GameResult::Won { winner, .. } => info!(winner = %winner, "session finished"),
                GameResult::SetupFailed(err) => warn!("No game played: {}", err),
                GameResult::Abandoned => warn!("Session abandoned"),
            }
        }
        Commands::Remap => {
            remap::run(stdin.lock(), stdout.lock()).context("console I/O failed")?;
        }
    }
    Ok(())
}
