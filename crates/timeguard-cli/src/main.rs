use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod store;

#[derive(Parser)]
#[command(name = "timeguard", version, about = "Time Guardian CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mission management
    Mission {
        #[command(subcommand)]
        action: commands::mission::MissionAction,
    },
    /// Focus timer control. Countdowns advance only under `tick` or `watch`
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Points balance and exchange
    Points {
        #[command(subcommand)]
        action: commands::points::PointsAction,
    },
    /// Relax breaks
    Relax {
        #[command(subcommand)]
        action: commands::relax::RelaxAction,
    },
    /// Focus Lock settings
    FocusLock {
        #[command(subcommand)]
        action: commands::focus_lock::FocusLockAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print the full state snapshot as JSON
    Status,
}

/// Logs go to stderr so stdout stays parseable JSON.
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_env("TIMEGUARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(env_filter)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Mission { action } => commands::mission::run(action),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Points { action } => commands::points::run(action),
        Commands::Relax { action } => commands::relax::run(action),
        Commands::FocusLock { action } => commands::focus_lock::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Status => commands::status(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
