//! Report collection queries.

use jiff::Timestamp;
use log::warn;
use rusqlite::{params, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, ProgressError, Result},
    models::ProgressReport,
};

const INSERT_REPORT_SQL: &str =
    "INSERT INTO reports (collection, body, created_at) VALUES (?1, ?2, ?3)";
const SELECT_REPORTS_SQL: &str = "SELECT id, body FROM reports WHERE collection = ?1 \
     ORDER BY created_at DESC, id DESC";
const SELECT_REPORT_SQL: &str = "SELECT id, body FROM reports WHERE collection = ?1 AND id = ?2";
const DELETE_REPORT_SQL: &str = "DELETE FROM reports WHERE collection = ?1 AND id = ?2";

/// Decodes a stored body and attaches the row id.
fn decode_report(id: i64, body: &str) -> Result<ProgressReport> {
    let mut report: ProgressReport = serde_json::from_str(body)?;
    report.id = id as u64;
    Ok(report)
}

impl super::Database {
    /// Appends a report to a collection, stamping `createdAt` when absent.
    pub fn insert_report(
        &mut self,
        collection: &str,
        report: &ProgressReport,
    ) -> Result<ProgressReport> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut stored = report.clone();
        let created_at = *stored.created_at.get_or_insert_with(Timestamp::now);
        let body = serde_json::to_string(&stored)?;

        tx.execute(
            INSERT_REPORT_SQL,
            params![collection, body, created_at.as_millisecond()],
        )
        .db_context("Failed to insert report")?;

        stored.id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(stored)
    }

    /// Lists a collection, newest first.
    ///
    /// Documents that cannot be decoded are logged and left out.
    pub fn list_reports(&self, collection: &str) -> Result<Vec<ProgressReport>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_REPORTS_SQL)
            .db_context("Failed to prepare query")?;

        let rows: Vec<(i64, String)> = stmt
            .query_map(params![collection], |row| Ok((row.get(0)?, row.get(1)?)))
            .db_context("Failed to query reports")?
            .collect::<std::result::Result<_, _>>()
            .db_context("Failed to read report row")?;

        Ok(rows
            .iter()
            .filter_map(|(id, body)| match decode_report(*id, body) {
                Ok(report) => Some(report),
                Err(e) => {
                    warn!("Skipping undecodable report {id} in {collection}: {e}");
                    None
                }
            })
            .collect())
    }

    /// Retrieves a single report from a collection.
    pub fn get_report(&self, collection: &str, id: u64) -> Result<Option<ProgressReport>> {
        let row: Option<(i64, String)> = self
            .connection
            .query_row(SELECT_REPORT_SQL, params![collection, id as i64], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()
            .db_context("Failed to query report")?;

        row.map(|(id, body)| decode_report(id, &body)).transpose()
    }

    /// Removes a report from a collection.
    pub fn delete_report(&mut self, collection: &str, id: u64) -> Result<()> {
        let affected = self
            .connection
            .execute(DELETE_REPORT_SQL, params![collection, id as i64])
            .db_context("Failed to delete report")?;

        if affected == 0 {
            return Err(ProgressError::ReportNotFound { id });
        }
        Ok(())
    }
}
