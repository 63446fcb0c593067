//! C-Force CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use cforce_cli::cli::{Cli, Commands};
use cforce_cli::commands;
use cforce_cli::repl::Repl;
use cforce_engine::EngineConfig;

fn main() {
    // Load .env.local if it exists (CFORCE_SEED, CFORCE_PACE etc.)
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    // Logs go to stderr so transcripts on stdout stay clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let state_dir = cli.state_dir();
    let config = cli.engine_config();

    let result = match cli.command {
        Some(Commands::Repl) | None => run_repl(&state_dir, config),
        Some(cmd) => commands::execute(cmd, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_repl(state_dir: &std::path::Path, config: EngineConfig) -> cforce_cli::Result<()> {
    let mut repl = Repl::new(state_dir, config)?;
    repl.run()
}
