//! Configuration parsing for Fraudsim.
//!
//! Supports:
//! - CLI arguments via clap
//! - Environment variable overrides
//! - Defaults matching the reference deployment (50-row batches every two
//!   minutes, one row per second in continuous mode)

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::generator::{FraudPolicy, PolicyError};

/// Fraudsim: synthetic banking transactions with simulated fraud labels.
#[derive(Parser, Debug, Clone)]
#[command(name = "fraudsim")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub store: StoreConfig,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Probability that a generated transaction is labelled fraudulent
    #[arg(long, env = "FRAUDSIM_FRAUD_PROBABILITY", default_value_t = 0.05, global = true)]
    pub fraud_probability: f64,

    /// Seed for reproducible generation (OS entropy when absent)
    #[arg(long, env = "FRAUDSIM_SEED", global = true)]
    pub seed: Option<u64>,

    /// What to run; defaults to the continuous simulator
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Where the `transactions` table lives.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Data directory for the SQLite database
    #[arg(short, long, env = "FRAUDSIM_DATA_DIR", default_value = "./data", global = true)]
    pub data_dir: PathBuf,

    /// Database name; the file is `<data-dir>/<database>.db`
    #[arg(long, env = "FRAUDSIM_DATABASE", default_value = "bank_fraud_db", global = true)]
    pub database: String,
}

impl StoreConfig {
    /// Full path of the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.db", self.database))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            database: "bank_fraud_db".into(),
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert one transaction per interval until interrupted
    Simulate(SimulateArgs),
    /// Generate and insert a single batch, committed once
    Batch(BatchArgs),
    /// Run batches on a fixed cadence with retry on failure
    Schedule(ScheduleArgs),
    /// Print generated transactions as JSON lines without touching the database
    Generate {
        /// Number of transactions to print
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
    /// Print row and fraud counts of the transactions table
    Stats,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SimulateArgs {
    /// Pause between transactions in milliseconds
    #[arg(long, env = "FRAUDSIM_INTERVAL_MS", default_value_t = 1000)]
    pub interval_ms: u64,

    /// Stop after this many transactions (runs until interrupted when absent)
    #[arg(short, long)]
    pub count: Option<u64>,
}

impl SimulateArgs {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for SimulateArgs {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            count: None,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct BatchArgs {
    /// Transactions generated per batch
    #[arg(short, long, env = "FRAUDSIM_BATCH_SIZE", default_value_t = 50)]
    pub batch_size: usize,
}

impl Default for BatchArgs {
    fn default() -> Self {
        Self { batch_size: 50 }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Seconds between scheduled batches
    #[arg(
        long,
        env = "FRAUDSIM_EVERY_SECS",
        default_value_t = 120,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub every_secs: u64,

    /// Retries for a failed batch
    #[arg(long, env = "FRAUDSIM_RETRIES", default_value_t = 1)]
    pub retries: u32,

    /// Seconds to wait before retrying a failed batch
    #[arg(long, env = "FRAUDSIM_RETRY_DELAY_SECS", default_value_t = 60)]
    pub retry_delay_secs: u64,

    /// Stop after this many scheduled runs (runs until interrupted when absent)
    #[arg(long)]
    pub runs: Option<u64>,
}

impl ScheduleArgs {
    pub fn every(&self) -> Duration {
        Duration::from_secs(self.every_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}

impl Default for ScheduleArgs {
    fn default() -> Self {
        Self {
            batch: BatchArgs::default(),
            every_secs: 120,
            retries: 1,
            retry_delay_secs: 60,
            runs: None,
        }
    }
}

impl Config {
    /// Parse configuration from CLI arguments and environment.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The subcommand to run, falling back to the continuous simulator.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Simulate(SimulateArgs::default()))
    }

    /// Fraud policy built from the configured probability.
    pub fn fraud_policy(&self) -> Result<FraudPolicy, PolicyError> {
        FraudPolicy::with_probability(self.fraud_probability)
    }

    /// Create a default configuration for testing.
    #[cfg(test)]
    pub fn test_config(data_dir: PathBuf) -> Self {
        Self {
            store: StoreConfig {
                data_dir,
                database: "test_db".into(),
            },
            log_level: "debug".into(),
            fraud_probability: 0.05,
            seed: Some(7),
            command: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            log_level: "info".into(),
            fraud_probability: 0.05,
            seed: None,
            command: None,
        }
    }
}
