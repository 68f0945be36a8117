//! Fraudsim: synthetic banking transactions with simulated fraud labels.
//!
//! Generates fabricated transaction records following a fixed statistical rule
//! and writes them to a SQLite `transactions` table, either as scheduled batches
//! or as a continuous one-row-per-interval stream.
//!
//! # Architecture
//!
//! - **Pure generation**: the fraud label is drawn first and every other field
//!   is derived from it
//! - **Idempotent persistence**: schema-ensure on every start, primary-key
//!   enforced inserts
//! - **Thin runners**: batch, continuous and scheduled shells share the same
//!   generator and store
//!
//! # Modules
//!
//! - [`config`]: CLI and environment configuration
//! - [`generator`]: Fraud policy and transaction generation
//! - [`model`]: The `Transaction` record
//! - [`observability`]: Tracing setup
//! - [`runner`]: Batch runner, continuous simulator and batch scheduler
//! - [`storage`]: SQLite persistence layer

// Lint configuration
#![warn(clippy::all)]
#![allow(
    clippy::module_name_repetitions,    // storage::store::SqliteStore is fine
    clippy::must_use_candidate,         // Not all functions need #[must_use]
    clippy::missing_errors_doc,         // Error docs can be verbose
    clippy::needless_raw_string_hashes  // r#""# is fine for SQL
)]

pub mod config;
pub mod generator;
pub mod model;
pub mod observability;
pub mod runner;
pub mod storage;

use chrono::{Local, NaiveDateTime, Timelike};

/// Current local wall-clock time truncated to whole seconds.
#[must_use]
pub fn now_seconds() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
