//! Runner shells around the generator and the store.
//!
//! - [`batch`]: one connection, one batch, one commit
//! - [`simulator`]: one connection, one committed row per interval
//! - [`scheduler`]: batch runs on a fixed cadence with retry

pub mod batch;
pub mod scheduler;
pub mod simulator;

pub use batch::{BatchReport, BatchRunner};
pub use scheduler::{RetryPolicy, ScheduleError, ScheduleReport, Scheduler};
pub use simulator::{SimulationReport, Simulator};

use tokio::sync::watch;

/// Resolve once shutdown has been requested.
///
/// Never resolves if the sending side is gone without requesting shutdown.
pub async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    if shutdown.wait_for(|stop| *stop).await.is_err() {
        std::future::pending::<()>().await;
    }
}
