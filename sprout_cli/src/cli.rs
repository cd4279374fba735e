//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "sprout", version, about = "Plant sensor monitor")]
pub struct Cli {
    /// Path to config TOML
    #[arg(long, value_name = "FILE", default_value = "etc/sprout.toml")]
    pub config: PathBuf,

    /// Print readings and errors as JSON lines
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Log level (error|warn|info|debug|trace); overrides [logging].level,
    /// default info. RUST_LOG takes precedence over both.
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll every configured sensor and print each fresh reading
    Monitor {
        /// Stop after this many loop iterations (default: run until Ctrl-C)
        #[arg(long, value_name = "N")]
        ticks: Option<u64>,
        /// Override monitor.tick_ms from the config
        #[arg(long, value_name = "MS")]
        tick_ms: Option<u64>,
    },
    /// Initialise every configured sensor once and report
    SelfCheck,
    /// Fit a trend line through VALUES and predict the next one
    Trend {
        /// Trend window size (oldest values beyond it are dropped)
        #[arg(long, default_value_t = sprout_core::DEFAULT_CAPACITY)]
        window: usize,
        /// Lower plausible bound for the prediction
        #[arg(long, allow_negative_numbers = true, requires = "max")]
        min: Option<f32>,
        /// Upper plausible bound for the prediction
        #[arg(long, allow_negative_numbers = true, requires = "min")]
        max: Option<f32>,
        /// Datapoints, oldest first
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f32>,
    },
}

impl Commands {
    /// Whether this command reads the config file.
    pub fn needs_config(&self) -> bool {
        !matches!(self, Commands::Trend { .. })
    }
}
