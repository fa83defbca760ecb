//! Command-line argument parsing for the disaster monitor
//!
//! Provides clap-based CLI with subcommands and verbosity control.
//! Flags override values from the configuration file.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::config::Config;
use crate::monitor::seeding::MAX_SEED;

/// Simulated disaster monitor: classify sensor readings and log alerts
#[derive(Parser, Debug)]
#[command(name = "disaster-monitor")]
#[command(version)]
#[command(about = "Classify simulated sensor readings and log disaster alerts to SQLite", long_about = None)]
pub struct Args {
    /// Number of readings to simulate
    #[arg(short = 'n', long, global = true)]
    pub iterations: Option<usize>,

    /// Seed for the data split, the model and the simulated readings
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(..=MAX_SEED))]
    pub seed: Option<u64>,

    /// Pause between readings, in milliseconds
    #[arg(long, global = true)]
    pub delay_ms: Option<u64>,

    /// Alert database path
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only the final alert dump)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Train the model and run the monitor loop (default)
    Run,

    /// Print the stored alerts without monitoring
    Alerts {
        /// Emit JSON instead of rows
        #[arg(long)]
        json: bool,
    },

    /// Display the effective configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags, falling back to the configured default
    pub fn verbosity(&self, config: &Config) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::parse(&config.telemetry.default_verbosity)
                    .unwrap_or(Verbosity::Normal),
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Resolved subcommand; no subcommand means `run`
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run)
    }

    /// Reject contradictory flags
    pub fn validate(&self) -> Result<(), String> {
        if self.quiet && self.verbose > 0 {
            return Err("Cannot combine --quiet with --verbose.".to_string());
        }

        if self.iterations.is_some() && !matches!(self.command(), Commands::Run) {
            return Err("--iterations only applies to 'run'.".to_string());
        }

        Ok(())
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(iterations) = self.iterations {
            config.monitor.iterations = iterations;
        }
        if let Some(seed) = self.seed {
            config.monitor.seed = Some(seed);
        }
        if let Some(delay_ms) = self.delay_ms {
            config.monitor.delay_ms = delay_ms;
        }
        if let Some(db) = &self.db {
            config.store.path = db.to_string_lossy().into_owned();
        }
        if self.no_color {
            config.telemetry.color_output = false;
        }
    }
}

impl Verbosity {
    /// Parse the configuration spelling
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" => Some(Verbosity::Verbose),
            "very_verbose" => Some(Verbosity::VeryVerbose),
            _ => None,
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Check if should show progress bars
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if per-reading lines are printed
    pub fn show_readings(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if extra detail (votes, seeds) is printed
    pub fn show_details(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }

    /// Default `tracing` filter directive for this level
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "disaster_monitor=info",
            Verbosity::VeryVerbose => "disaster_monitor=trace",
        }
    }
}
