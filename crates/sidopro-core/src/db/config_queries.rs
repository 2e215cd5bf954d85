//! Stage configuration document queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, ProgressError, Result},
    models::StageConfig,
};

const SELECT_CONFIG_SQL: &str = "SELECT body FROM config_documents WHERE key = ?1";
const UPSERT_CONFIG_SQL: &str = "INSERT INTO config_documents (key, body, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at";

impl super::Database {
    /// Reads a stage configuration document, `None` if it was never written.
    pub fn get_config_document(&self, key: &str) -> Result<Option<StageConfig>> {
        let body: Option<String> = self
            .connection
            .query_row(SELECT_CONFIG_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to query configuration document")?;

        body.map(|body| serde_json::from_str::<StageConfig>(&body).map_err(ProgressError::from))
            .transpose()
    }

    /// Replaces a stage configuration document.
    pub fn put_config_document(&mut self, key: &str, config: &StageConfig) -> Result<()> {
        let body = serde_json::to_string(config)?;
        let now = Timestamp::now().to_string();

        self.connection
            .execute(UPSERT_CONFIG_SQL, params![key, body, now])
            .db_context("Failed to write configuration document")?;
        Ok(())
    }
}
