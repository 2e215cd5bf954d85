//! Database schema initialization.

use std::time::Duration;

use log::debug;

use crate::error::{DatabaseResultExt, Result};

/// How long a connection waits on a lock held by a concurrent writer.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Schema revision recorded in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 1;

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Every request opens its own connection
        self.connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let journal_mode: String = self
            .connection
            .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
            .db_context("Failed to enable WAL journal")?;
        debug!("SQLite journal mode: {journal_mode}");

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.record_schema_version()
    }

    pub fn schema_version(&self) -> Result<i64> {
        self.connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .db_context("Failed to read schema version")
    }

    fn record_schema_version(&self) -> Result<()> {
        if self.schema_version()? < SCHEMA_VERSION {
            self.connection
                .pragma_update(None, "user_version", SCHEMA_VERSION)
                .db_context("Failed to record schema version")?;
        }
        Ok(())
    }
}
