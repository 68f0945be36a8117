//! Batch scheduler.
//!
//! Invokes the [`BatchRunner`] on a fixed cadence. A failed run is retried
//! after a fixed delay; once retries are exhausted the run is logged as failed
//! and the scheduler waits for the next tick. Ticks missed while a run was in
//! progress are skipped rather than caught up.

use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use super::batch::{BatchReport, BatchRunner};
use super::shutdown_requested;
use crate::storage::{Connector, StoreError};

/// Error type for a scheduled run.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Batch failed after {attempts} attempt(s): {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: StoreError,
    },

    #[error("Schedule interval must be greater than zero")]
    ZeroInterval,

    #[error("Shutdown requested while waiting to retry: {source}")]
    Interrupted {
        #[source]
        source: StoreError,
    },
}

/// Retry behaviour for failed runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first failure
    pub retries: u32,
    /// Wait before each retry
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 1,
            delay: Duration::from_secs(60),
        }
    }
}

/// Totals for one scheduler lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScheduleReport {
    pub runs: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub inserted: u64,
}

/// Runs batches every `every` until shutdown or `max_runs`.
pub struct Scheduler<C, R = StdRng> {
    runner: BatchRunner<C, R>,
    every: Duration,
    retry: RetryPolicy,
    max_runs: Option<u64>,
}

impl<C: Connector, R: Rng> Scheduler<C, R> {
    /// Create a scheduler; a zero `every` is rejected.
    pub fn new(
        runner: BatchRunner<C, R>,
        every: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, ScheduleError> {
        if every.is_zero() {
            return Err(ScheduleError::ZeroInterval);
        }
        Ok(Self {
            runner,
            every,
            retry,
            max_runs: None,
        })
    }

    /// Stop after `max_runs` scheduled runs instead of waiting for an interrupt.
    #[must_use]
    pub fn with_max_runs(mut self, max_runs: Option<u64>) -> Self {
        self.max_runs = max_runs;
        self
    }

    /// Run one scheduled batch, retrying per the policy.
    pub async fn run_once(
        &mut self,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<BatchReport, ScheduleError> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let source = match self.runner.run() {
                Ok(report) => return Ok(report),
                Err(err) => err,
            };

            if attempts > self.retry.retries {
                return Err(ScheduleError::Exhausted { attempts, source });
            }

            tracing::warn!(
                attempt = attempts,
                retry_in = ?self.retry.delay,
                "Scheduled batch failed, retrying"
            );
            tokio::select! {
                () = tokio::time::sleep(self.retry.delay) => {}
                () = shutdown_requested(shutdown) => {
                    return Err(ScheduleError::Interrupted { source });
                }
            }
        }
    }

    /// Run batches on the configured cadence.
    ///
    /// The first batch starts immediately.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> ScheduleReport {
        tracing::info!(
            every = ?self.every,
            batch_size = self.runner.batch_size(),
            retries = self.retry.retries,
            "Starting batch scheduler"
        );

        let mut ticker = tokio::time::interval(self.every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut report = ScheduleReport::default();
        loop {
            if self.max_runs.is_some_and(|max| report.runs >= max) {
                break;
            }

            tokio::select! {
                _ = ticker.tick() => {}
                () = shutdown_requested(&mut shutdown) => break,
            }

            report.runs += 1;
            match self.run_once(&mut shutdown).await {
                Ok(batch) => {
                    report.succeeded += 1;
                    report.inserted += batch.inserted as u64;
                }
                Err(err @ ScheduleError::Interrupted { .. }) => {
                    report.failed += 1;
                    tracing::warn!(error = %err, "Scheduled run abandoned");
                    break;
                }
                Err(err) => {
                    report.failed += 1;
                    tracing::error!(error = %err, run = report.runs, "Scheduled run failed");
                }
            }
        }

        tracing::info!(
            runs = report.runs,
            succeeded = report.succeeded,
            failed = report.failed,
            inserted = report.inserted,
            "Batch scheduler stopped"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{FraudPolicy, TransactionGenerator};
    use crate::runner::testing::MockConnector;
    use tokio::time::Instant;

    fn runner(connector: &MockConnector) -> BatchRunner<MockConnector> {
        BatchRunner::new(
            connector.clone(),
            TransactionGenerator::seeded(3, FraudPolicy::default()),
            5,
        )
    }

    fn scheduler(connector: &MockConnector, retries: u32) -> Scheduler<MockConnector> {
        Scheduler::new(
            runner(connector),
            Duration::from_secs(120),
            RetryPolicy {
                retries,
                delay: Duration::from_secs(60),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_zero_interval_rejected() {
        let connector = MockConnector::default();

        let result = Scheduler::new(runner(&connector), Duration::ZERO, RetryPolicy::default());

        assert!(matches!(result, Err(ScheduleError::ZeroInterval)));
        assert_eq!(connector.state.borrow().connects, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_recovers_after_delay() {
        let connector = MockConnector::with(|s| s.failing_connects = 1);
        let mut scheduler = scheduler(&connector, 1);
        let (_tx, mut rx) = watch::channel(false);

        let start = Instant::now();
        let report = scheduler.run_once(&mut rx).await.unwrap();

        assert_eq!(report.inserted, 5);
        assert_eq!(connector.state.borrow().connects, 2);
        assert!(start.elapsed() >= Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_retry_then_exhausted() {
        let connector = MockConnector::with(|s| s.failing_connects = 5);
        let mut scheduler = scheduler(&connector, 1);
        let (_tx, mut rx) = watch::channel(false);

        let err = scheduler.run_once(&mut rx).await.unwrap_err();

        assert!(matches!(err, ScheduleError::Exhausted { attempts: 2, .. }));
        assert_eq!(connector.state.borrow().connects, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_run_does_not_stop_schedule() {
        let connector = MockConnector::with(|s| s.failing_batches = 2);
        let scheduler = scheduler(&connector, 1).with_max_runs(Some(3));
        let (_tx, rx) = watch::channel(false);

        let report = scheduler.run(rx).await;

        assert_eq!(report.runs, 3);
        assert_eq!(report.failed, 1);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.inserted, 10);
        assert_eq!(connector.state.borrow().committed.len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_on_cadence() {
        let connector = MockConnector::default();
        let scheduler = scheduler(&connector, 1).with_max_runs(Some(3));
        let (_tx, rx) = watch::channel(false);

        let start = Instant::now();
        let report = scheduler.run(rx).await;

        assert_eq!(report.succeeded, 3);
        // Ticks at 0s, 120s and 240s.
        assert!(start.elapsed() >= Duration::from_secs(240));
        assert!(start.elapsed() < Duration::from_secs(360));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_scheduler() {
        let connector = MockConnector::default();
        let scheduler = scheduler(&connector, 1);
        let (tx, rx) = watch::channel(false);

        let stopper = async {
            tokio::time::sleep(Duration::from_secs(130)).await;
            tx.send(true).unwrap();
        };
        let (report, ()) = tokio::join!(scheduler.run(rx), stopper);

        assert_eq!(report.runs, 2);
        assert_eq!(report.succeeded, 2);
    }
}
