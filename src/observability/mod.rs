//! Observability infrastructure.
//!
//! Provides structured logging through `tracing`. Progress lines for inserted
//! rows and lifecycle events go to stdout.

pub mod tracing;
