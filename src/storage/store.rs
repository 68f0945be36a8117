//! SQLite-backed transaction store.
//!
//! One `SqliteStore` wraps exactly one connection. Every write is a
//! parameterized insert against the primary-keyed `transactions` table.

use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{ffi, params, CachedStatement, Connection, OpenFlags, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::schema::{
    apply_pragmas, ensure_schema, COUNT_TRANSACTIONS, INSERT_TRANSACTION, SELECT_TRANSACTION,
};
use super::{Connector, StoreError, TransactionStore};
use crate::config::StoreConfig;
use crate::model::{Transaction, TIMESTAMP_FORMAT};

/// Row totals reported by [`SqliteStore::count`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableCounts {
    pub total: u64,
    pub fraud: u64,
}

/// Opens [`SqliteStore`]s on a fixed database file.
#[derive(Debug, Clone)]
pub struct SqliteConnector {
    path: PathBuf,
}

impl SqliteConnector {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.database_path())
    }
}

impl Connector for SqliteConnector {
    type Store = SqliteStore;

    fn connect(&self) -> Result<SqliteStore, StoreError> {
        SqliteStore::open(&self.path)
    }
}

/// A single SQLite connection holding the `transactions` table.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`.
    ///
    /// The parent directory must already exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let connection_error = |source| StoreError::Connection {
            path: path.to_path_buf(),
            source,
        };

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )
        .map_err(connection_error)?;
        apply_pragmas(&conn).map_err(connection_error)?;

        tracing::debug!(path = %path.display(), "Opened database");
        Ok(Self { conn })
    }

    /// Open a private in-memory database (used in tests).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::Connection {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        Ok(Self { conn })
    }

    /// Total and fraudulent row counts.
    pub fn count(&self) -> Result<TableCounts, StoreError> {
        let (total, fraud) = self.conn.query_row(COUNT_TRANSACTIONS, [], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
        })?;
        Ok(TableCounts {
            total: total.max(0) as u64,
            fraud: fraud.max(0) as u64,
        })
    }

    /// Look up one stored transaction by id.
    pub fn find(&self, transaction_id: Uuid) -> Result<Option<Transaction>, StoreError> {
        let found = self
            .conn
            .query_row(SELECT_TRANSACTION, params![transaction_id.to_string()], read_row)
            .optional()?;
        Ok(found)
    }
}

impl TransactionStore for SqliteStore {
    fn ensure_schema(&mut self) -> Result<(), StoreError> {
        ensure_schema(&self.conn).map_err(StoreError::SchemaEnsure)
    }

    fn insert(&mut self, transaction: &Transaction) -> Result<(), StoreError> {
        let mut stmt = self
            .conn
            .prepare_cached(INSERT_TRANSACTION)
            .map_err(|source| classify_insert_error(transaction.transaction_id, source))?;
        execute_insert(&mut stmt, transaction)
    }

    fn insert_batch(&mut self, transactions: &[Transaction]) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(INSERT_TRANSACTION).map_err(|source| {
                match transactions.first() {
                    Some(first) => classify_insert_error(first.transaction_id, source),
                    None => StoreError::Database(source),
                }
            })?;
            for transaction in transactions {
                // An early return drops `tx`, rolling back the whole batch.
                execute_insert(&mut stmt, transaction)?;
            }
        }
        tx.commit().map_err(StoreError::Commit)
    }

    fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, err)| StoreError::Database(err))
    }
}

fn execute_insert(stmt: &mut CachedStatement<'_>, transaction: &Transaction) -> Result<(), StoreError> {
    stmt.execute(params![
        transaction.transaction_id.to_string(),
        transaction.client_id,
        transaction.formatted_date(),
        transaction.amount.to_string(),
        transaction.merchant,
        transaction.location,
        transaction.is_fraud,
    ])
    .map(|_| ())
    .map_err(|source| classify_insert_error(transaction.transaction_id, source))
}

fn classify_insert_error(transaction_id: Uuid, source: rusqlite::Error) -> StoreError {
    match &source {
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || err.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            StoreError::DuplicateKey { transaction_id }
        }
        _ => StoreError::Insert {
            transaction_id,
            source,
        },
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let id: String = row.get(0)?;
    let transaction_id = Uuid::parse_str(&id)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;

    let date: String = row.get(2)?;
    let transaction_date = NaiveDateTime::parse_from_str(&date, TIMESTAMP_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

    // DECIMAL columns have NUMERIC affinity and come back as REAL or INTEGER.
    let raw: f64 = row.get(3)?;
    let mut amount = Decimal::try_from(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Real, Box::new(e)))?
        .round_dp(2);
    amount.rescale(2);

    Ok(Transaction {
        transaction_id,
        client_id: row.get(1)?,
        transaction_date,
        amount,
        merchant: row.get(4)?,
        location: row.get(5)?,
        is_fraud: row.get(6)?,
    })
}
