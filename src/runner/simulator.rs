//! Continuous banking simulator.
//!
//! Holds one connection for the whole process and commits every row as soon
//! as it is inserted, so an interruption loses at most the row in flight.
//!
//! Failure handling by kind:
//! - connection failure at startup: logged, returned, nothing inserted
//! - schema ensure failure: logged, the loop still runs
//! - insert failure (including duplicate ids): logged, row skipped

use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;
use tokio::sync::watch;

use super::shutdown_requested;
use crate::generator::TransactionGenerator;
use crate::storage::{Connector, StoreError, TransactionStore};

/// Pause between rows when none is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Totals for one simulator lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulationReport {
    pub inserted: u64,
    pub fraud: u64,
    pub skipped: u64,
}

impl SimulationReport {
    pub fn attempted(&self) -> u64 {
        self.inserted + self.skipped
    }
}

/// Generates and commits one transaction per interval.
pub struct Simulator<C, R = StdRng> {
    connector: C,
    generator: TransactionGenerator<R>,
    interval: Duration,
    limit: Option<u64>,
}

impl<C: Connector, R: Rng> Simulator<C, R> {
    pub fn new(connector: C, generator: TransactionGenerator<R>, interval: Duration) -> Self {
        Self {
            connector,
            generator,
            interval,
            limit: None,
        }
    }

    /// Stop after `limit` attempted rows instead of waiting for an interrupt.
    #[must_use]
    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    /// Run until shutdown is requested or the limit is reached.
    ///
    /// Only a startup connection failure ends the run with an error.
    pub async fn run(
        mut self,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<SimulationReport, StoreError> {
        tracing::info!(interval = ?self.interval, "Starting banking simulator");

        let mut store = match self.connector.connect() {
            Ok(store) => store,
            Err(err) => {
                tracing::error!(error = %err, "Failed to connect to database");
                return Err(err);
            }
        };

        match store.ensure_schema() {
            Ok(()) => tracing::info!("Table 'transactions' verified"),
            Err(err) => tracing::error!(error = %err, "Continuing without a verified schema"),
        }

        let mut report = SimulationReport::default();
        loop {
            if *shutdown.borrow() || self.limit.is_some_and(|limit| report.attempted() >= limit) {
                break;
            }

            let transaction = self.generator.generate();
            match store.insert(&transaction) {
                Ok(()) => {
                    report.inserted += 1;
                    if transaction.is_fraud {
                        report.fraud += 1;
                    }
                    tracing::info!(
                        transaction_id = %transaction.transaction_id,
                        is_fraud = transaction.is_fraud,
                        amount = %transaction.amount,
                        location = %transaction.location,
                        "Transaction inserted"
                    );
                }
                Err(err) => {
                    report.skipped += 1;
                    tracing::error!(
                        error = %err,
                        transaction_id = %transaction.transaction_id,
                        "Failed to insert transaction, skipping"
                    );
                }
            }

            if self.limit.is_some_and(|limit| report.attempted() >= limit) {
                break;
            }

            tokio::select! {
                () = tokio::time::sleep(self.interval) => {}
                () = shutdown_requested(&mut shutdown) => {
                    tracing::info!("Simulator stopped by user");
                    break;
                }
            }
        }

        if let Err(err) = store.close() {
            tracing::warn!(error = %err, "Failed to close database connection");
        }
        tracing::info!(
            inserted = report.inserted,
            fraud = report.fraud,
            skipped = report.skipped,
            "Simulator stopped"
        );
        Ok(report)
    }
}
