//! SQLite storage layer for Fraudsim.
//!
//! Provides:
//! - Schema ensure (idempotent `CREATE TABLE IF NOT EXISTS`)
//! - Single-row autocommit inserts for the continuous simulator
//! - All-or-nothing batch inserts for the batch runner
//! - The `StoreError` taxonomy the runners branch on

pub mod schema;
pub mod store;

pub use store::{SqliteConnector, SqliteStore, TableCounts};

use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

use crate::model::Transaction;

/// Error type for storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to connect to {}: {source}", .path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to ensure transactions table: {0}")]
    SchemaEnsure(#[source] rusqlite::Error),

    #[error("Duplicate transaction id {transaction_id}")]
    DuplicateKey { transaction_id: Uuid },

    #[error("Failed to insert transaction {transaction_id}: {source}")]
    Insert {
        transaction_id: Uuid,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to commit batch: {0}")]
    Commit(#[source] rusqlite::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl StoreError {
    /// Id of the record involved, for insert-path errors.
    pub fn transaction_id(&self) -> Option<Uuid> {
        match self {
            Self::DuplicateKey { transaction_id } | Self::Insert { transaction_id, .. } => {
                Some(*transaction_id)
            }
            _ => None,
        }
    }
}

/// A connection-scoped transaction sink.
pub trait TransactionStore {
    /// Create the `transactions` table if absent. Never touches existing rows.
    fn ensure_schema(&mut self) -> Result<(), StoreError>;

    /// Insert one row and commit it immediately.
    fn insert(&mut self, transaction: &Transaction) -> Result<(), StoreError>;

    /// Insert every row and commit once; nothing persists if any insert fails.
    fn insert_batch(&mut self, transactions: &[Transaction]) -> Result<(), StoreError>;

    /// Release the connection.
    fn close(self) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// Opens stores. One call per runner lifetime.
pub trait Connector {
    type Store: TransactionStore;

    fn connect(&self) -> Result<Self::Store, StoreError>;
}

impl<C: Connector + ?Sized> Connector for &C {
    type Store = C::Store;

    fn connect(&self) -> Result<Self::Store, StoreError> {
        (**self).connect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_transaction() {
        let id = Uuid::nil();
        let err = StoreError::DuplicateKey { transaction_id: id };
        assert_eq!(
            err.to_string(),
            "Duplicate transaction id 00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(err.transaction_id(), Some(id));
    }

    #[test]
    fn test_connection_error_has_no_transaction() {
        let err = StoreError::Connection {
            path: PathBuf::from("/nowhere/db.db"),
            source: rusqlite::Error::InvalidQuery,
        };
        assert!(err.to_string().contains("/nowhere/db.db"));
        assert_eq!(err.transaction_id(), None);
    }
}
