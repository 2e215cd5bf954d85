//! SQLite document store for stage configurations and progress reports.
//!
//! Documents are stored as JSON bodies so the store stays as schema-free as
//! the records it holds: configuration documents are keyed by name
//! (`stages_config`, `stages_config_bungtomo`) and reports are grouped by
//! collection (`Progress_Diana`, ...).

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod config_queries;
pub mod migrations;
pub mod report_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
