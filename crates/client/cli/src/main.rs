//! `charsheet`: calculate, validate and store character builds.
//!
//! Run with: `charsheet <command>`. Configuration comes from the environment
//! (and `.env`), see [`config::CliConfig`].

mod commands;
mod config;
mod dirs;
mod output;

use anyhow::Result;
use clap::Parser;
use commands::{Calc, Context, List, Save, Show, Validate};
use config::CliConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Character sheet calculator
#[derive(Parser)]
#[command(name = "charsheet")]
#[command(about = "Calculate and validate character builds", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Calculate the stat sheet of a build file
    Calc(Calc),

    /// Check point budgets and mastery caps of a build file
    Validate(Validate),

    /// Calculate a build and store it
    Save(Save),

    /// List stored characters
    List(List),

    /// Show a stored character
    Show(Show),
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = setup_logging(&config)?;

    let cli = Cli::parse();
    let context = Context::new(config);

    match cli.command {
        Command::Calc(cmd) => cmd.execute(&context),
        Command::Validate(cmd) => cmd.execute(&context),
        Command::Save(cmd) => cmd.execute(&context),
        Command::List(cmd) => cmd.execute(&context),
        Command::Show(cmd) => cmd.execute(&context),
    }
}

/// Logs to stderr, and to `<log_dir>/charsheet.log` when a log directory is set.
///
/// The returned guard flushes the file writer on drop.
fn setup_logging(config: &CliConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match &config.log_dir {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)?;
            let file_appender = tracing_appender::rolling::never(log_dir, "charsheet.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(log_dir) = &config.log_dir {
        tracing::debug!("Log file: {}/charsheet.log", log_dir.display());
    }

    Ok(guard)
}
