//! Command-line interface definition using clap.

use std::path::PathBuf;
use std::time::Duration;

use cforce_engine::EngineConfig;
use clap::{Parser, Subcommand};

fn version_string() -> &'static str {
    static VERSION: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    VERSION.get_or_init(|| {
        format!(
            "{} ({}, {})",
            env!("CARGO_PKG_VERSION"),
            env!("CFORCE_GIT_HASH"),
            env!("CFORCE_BUILD_DATE")
        )
    })
}

/// C-Force - scripted offensive-security terminal simulator
///
/// Every scan, exploit, brute force and flood is simulated text. No network
/// traffic is ever generated.
#[derive(Parser, Debug)]
#[command(name = "cforce")]
#[command(author, version = version_string(), about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to state directory (REPL history)
    #[arg(short, long, env = "CFORCE_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Seed for jitter and flood output
    #[arg(long, env = "CFORCE_SEED")]
    pub seed: Option<u64>,

    /// Delay multiplier for scripted sequences (0 plays instantly)
    #[arg(long, env = "CFORCE_PACE", default_value_t = 1.0)]
    pub pace: f64,

    /// Seconds before the flood simulation stops itself
    #[arg(long, env = "CFORCE_FLOOD_SECS", default_value_t = 6)]
    pub flood_secs: u64,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive terminal (default)
    Repl,

    /// Feed a file of commands to a session and print the transcript
    Replay {
        /// Command file, one input per line (`#` starts a comment)
        #[arg(required = true)]
        file: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show how targets are classified
    Classify {
        /// Targets to classify
        #[arg(required = true)]
        targets: Vec<String>,
    },

    /// Print the findings report a completed scan produces
    Findings {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Output format for non-interactive commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Cli {
    /// Returns the state directory path, using default if not specified.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".cforce"))
                .unwrap_or_else(|| PathBuf::from(".cforce"))
        })
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// Builds the engine configuration from flags.
    pub fn engine_config(&self) -> EngineConfig {
        let config = EngineConfig::new()
            .with_pace(self.pace)
            .with_flood_duration(Duration::from_secs(self.flood_secs));
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}
