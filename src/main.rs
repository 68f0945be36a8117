//! Fraudsim: synthetic banking transactions with simulated fraud labels.
//!
//! # Usage
//!
//! ```bash
//! fraudsim                                  # continuous simulator, one row per second
//! fraudsim batch --batch-size 50            # one batch, committed once
//! fraudsim schedule --every-secs 120        # batches on a cadence, one retry on failure
//! fraudsim generate --count 5 --seed 42     # preview rows as JSON lines
//! fraudsim stats                            # row and fraud counts
//! ```
//!
//! Environment variables can also be used:
//! - `FRAUDSIM_DATA_DIR`: Data directory for SQLite
//! - `FRAUDSIM_DATABASE`: Database name
//! - `RUST_LOG`: Log level (trace, debug, info, warn, error)

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use tokio::sync::watch;

use fraudsim::config::{Command, Config};
use fraudsim::generator::{FraudPolicy, TransactionGenerator};
use fraudsim::observability::tracing::init_tracing;
use fraudsim::runner::{BatchRunner, RetryPolicy, Scheduler, Simulator};
use fraudsim::storage::{Connector, SqliteConnector, TransactionStore};

/// Print startup banner with version and configuration.
fn print_banner(config: &Config, command: &Command) {
    let version = env!("CARGO_PKG_VERSION");
    let mode = match command {
        Command::Simulate(_) => "continuous simulator",
        Command::Batch(_) => "single batch",
        Command::Schedule(_) => "batch scheduler",
        Command::Generate { .. } | Command::Stats => return,
    };
    eprintln!(
        r#"
  Fraudsim v{} - Synthetic Banking Transactions

  Configuration:
    Mode:       {}
    Database:   {}
    Fraud rate: {}
    Log Level:  {}

  Press Ctrl+C to stop.
"#,
        version,
        mode,
        config.store.database_path().display(),
        config.fraud_probability,
        config.log_level
    );
}

/// Install SIGINT/SIGTERM handling and return the shutdown receiver.
fn spawn_signal_handler() -> watch::Receiver<bool> {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = ctrl_c => {
                            tracing::info!("Received SIGINT (Ctrl+C), stopping...");
                        }
                        _ = sigterm.recv() => {
                            tracing::info!("Received SIGTERM, stopping...");
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Failed to install SIGTERM handler");
                    if ctrl_c.await.is_err() {
                        return;
                    }
                    tracing::info!("Received SIGINT (Ctrl+C), stopping...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            if let Err(err) = ctrl_c.await {
                tracing::warn!(error = %err, "Failed to listen for Ctrl+C");
                return;
            }
            tracing::info!("Received Ctrl+C, stopping...");
        }

        let _ = shutdown_tx.send(true);
    });

    shutdown_rx
}

fn generator(config: &Config, policy: FraudPolicy) -> TransactionGenerator {
    TransactionGenerator::from_seed_option(config.seed, policy)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse configuration from CLI arguments and environment
    let config = Config::parse_args();
    let command = config.command();

    init_tracing(&config.log_level);

    let policy = config.fraud_policy().context("invalid fraud policy")?;

    if let Command::Generate { count } = command {
        let mut generator = generator(&config, policy);
        let mut out = io::stdout().lock();
        for transaction in generator.generate_batch(count) {
            serde_json::to_writer(&mut out, &transaction)?;
            writeln!(out)?;
        }
        return Ok(());
    }

    fs::create_dir_all(&config.store.data_dir).with_context(|| {
        format!(
            "failed to create data directory {}",
            config.store.data_dir.display()
        )
    })?;
    let connector = SqliteConnector::from_config(&config.store);

    print_banner(&config, &command);

    match command {
        Command::Simulate(args) => {
            let shutdown = spawn_signal_handler();
            Simulator::new(connector, generator(&config, policy), args.interval())
                .with_limit(args.count)
                .run(shutdown)
                .await
                .context("simulator could not start")?;
        }
        Command::Batch(args) => {
            BatchRunner::new(connector, generator(&config, policy), args.batch_size)
                .run()
                .context("batch run failed")?;
        }
        Command::Schedule(args) => {
            let shutdown = spawn_signal_handler();
            let runner = BatchRunner::new(
                connector,
                generator(&config, policy),
                args.batch.batch_size,
            );
            let retry = RetryPolicy {
                retries: args.retries,
                delay: args.retry_delay(),
            };
            Scheduler::new(runner, args.every(), retry)
                .context("invalid schedule")?
                .with_max_runs(args.runs)
                .run(shutdown)
                .await;
        }
        Command::Stats => {
            let mut store = connector.connect()?;
            store.ensure_schema()?;
            let counts = store.count().context("failed to count transactions")?;
            println!("transactions: {}", counts.total);
            println!("fraudulent:   {}", counts.fraud);
        }
        Command::Generate { .. } => {}
    }

    tracing::info!("Fraudsim shutdown complete");
    Ok(())
}
