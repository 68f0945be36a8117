//! Table definition and connection pragmas.

use rusqlite::Connection;
use std::time::Duration;

/// Lock wait before a write gives up with `SQLITE_BUSY`.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Idempotent table definition.
pub const CREATE_TRANSACTIONS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS transactions (
        transaction_id VARCHAR(50) PRIMARY KEY,
        client_id INTEGER,
        transaction_date TIMESTAMP,
        amount DECIMAL(10, 2),
        merchant VARCHAR(100),
        location VARCHAR(100),
        is_fraud BOOLEAN
    );
"#;

pub const INSERT_TRANSACTION: &str = r#"
    INSERT INTO transactions
        (transaction_id, client_id, transaction_date, amount, merchant, location, is_fraud)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub const SELECT_TRANSACTION: &str = r#"
    SELECT transaction_id, client_id, transaction_date, amount, merchant, location, is_fraud
    FROM transactions
    WHERE transaction_id = ?1
"#;

pub const COUNT_TRANSACTIONS: &str = r#"
    SELECT COUNT(*), COALESCE(SUM(CASE WHEN is_fraud THEN 1 ELSE 0 END), 0)
    FROM transactions
"#;

/// Apply durability pragmas to a freshly opened connection.
///
/// WAL lets the batch runner and the simulator share the file.
pub fn apply_pragmas(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = FULL;",
    )?;
    conn.busy_timeout(BUSY_TIMEOUT)
}

/// Create the `transactions` table if it does not exist.
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CREATE_TRANSACTIONS_TABLE)
}
