//! Test utilities for Fraudsim integration tests.
//!
//! Provides:
//! - Temporary database fixtures
//! - A connector whose connections always fail

#![allow(dead_code)]

use std::cell::Cell;
use std::path::PathBuf;
use tempfile::TempDir;

use fraudsim::config::StoreConfig;
use fraudsim::storage::{Connector, SqliteConnector, SqliteStore, StoreError};

/// Test fixture that manages a temporary database directory.
///
/// The directory is automatically cleaned up when the fixture is dropped.
pub struct TestFixture {
    /// Temporary directory holding the database
    pub temp_dir: TempDir,
    /// Store configuration pointing into `temp_dir`
    pub store: StoreConfig,
}

impl TestFixture {
    /// Create a new test fixture with a temporary database directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let store = StoreConfig {
            data_dir: temp_dir.path().to_path_buf(),
            database: "test_bank".into(),
        };
        Self { temp_dir, store }
    }

    pub fn db_path(&self) -> PathBuf {
        self.store.database_path()
    }

    pub fn connector(&self) -> SqliteConnector {
        SqliteConnector::from_config(&self.store)
    }

    /// Open a fresh connection for assertions.
    pub fn open(&self) -> SqliteStore {
        SqliteStore::open(self.db_path()).expect("failed to open test database")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Connector pointing at a directory that does not exist.
#[derive(Default)]
pub struct UnreachableConnector {
    pub attempts: Cell<u32>,
}

impl Connector for UnreachableConnector {
    type Store = SqliteStore;

    fn connect(&self) -> Result<SqliteStore, StoreError> {
        self.attempts.set(self.attempts.get() + 1);
        SqliteStore::open("/nonexistent-fraudsim-dir/unreachable/bank.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.temp_dir.path().exists());
        assert!(fixture.db_path().ends_with("test_bank.db"));
    }
}
