//! Scheduled batch runner.
//!
//! One invocation is one unit of work: connect, ensure the schema, insert a
//! fixed-size batch and commit it once. Any failure is logged and handed back
//! to the caller; a failed batch leaves no rows behind.

use rand::rngs::StdRng;
use rand::Rng;

use crate::generator::TransactionGenerator;
use crate::storage::{Connector, StoreError, TransactionStore};

/// Batch size when none is configured.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Outcome of one successful batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchReport {
    pub inserted: usize,
    pub fraud: usize,
}

/// Generates and loads one batch per [`run`](BatchRunner::run) call.
pub struct BatchRunner<C, R = StdRng> {
    connector: C,
    generator: TransactionGenerator<R>,
    batch_size: usize,
}

impl<C: Connector, R: Rng> BatchRunner<C, R> {
    pub fn new(connector: C, generator: TransactionGenerator<R>, batch_size: usize) -> Self {
        Self {
            connector,
            generator,
            batch_size,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Run one batch.
    ///
    /// Safe to call repeatedly: the schema ensure is idempotent and every
    /// batch carries fresh random ids.
    pub fn run(&mut self) -> Result<BatchReport, StoreError> {
        tracing::info!(batch_size = self.batch_size, "Starting batch generation");

        self.load().map_err(|err| {
            match err.transaction_id() {
                Some(transaction_id) => tracing::error!(
                    error = %err,
                    %transaction_id,
                    "Batch aborted, nothing committed"
                ),
                None => tracing::error!(error = %err, "Batch failed"),
            }
            err
        })
    }

    fn load(&mut self) -> Result<BatchReport, StoreError> {
        let mut store = self.connector.connect()?;
        store.ensure_schema()?;

        let batch = self.generator.generate_batch(self.batch_size);
        store.insert_batch(&batch)?;
        // The batch is committed; a close failure must not trigger a rerun.
        if let Err(err) = store.close() {
            tracing::warn!(error = %err, "Failed to close database connection");
        }

        let report = BatchReport {
            inserted: batch.len(),
            fraud: batch.iter().filter(|tx| tx.is_fraud).count(),
        };
        tracing::info!(
            inserted = report.inserted,
            fraud = report.fraud,
            "Batch of {} transactions inserted",
            report.inserted
        );
        Ok(report)
    }
}
