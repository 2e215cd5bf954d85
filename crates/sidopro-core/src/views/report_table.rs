//! Report table view.

use jiff::Timestamp;
use serde::Serialize;

use super::{
    feed::ProjectSnapshot,
    pagination::{paginate, Page},
    search::{matches_search, normalize_query},
};
use crate::models::{ProgressReport, ProjectKey};

/// Placeholder rendered for absent report fields.
pub const MISSING: &str = "-";

/// One row of the report table, with absent fields defaulted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub id: u64,
    pub nama: String,
    pub lokasi: String,
    pub pekerjaan: String,
    pub status: String,
    pub stage: String,
    pub progress: String,
    pub photo_count: usize,
    pub created_at: Option<Timestamp>,
}

fn or_missing(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(MISSING)
        .to_string()
}

impl From<&ProgressReport> for ReportRow {
    fn from(report: &ProgressReport) -> Self {
        Self {
            id: report.id,
            nama: or_missing(report.nama.as_deref()),
            lokasi: or_missing(report.lokasi.as_deref()),
            pekerjaan: or_missing(report.pekerjaan.as_deref()),
            status: or_missing(report.status.as_deref()),
            stage: report
                .stage
                .as_ref()
                .map_or_else(|| MISSING.to_string(), ToString::to_string),
            progress: report
                .progress_percentage
                .map_or_else(|| MISSING.to_string(), |p| format!("{p}%")),
            photo_count: report.photos.len(),
            created_at: report.created_at,
        }
    }
}

/// Reports of a project, newest first, optionally filtered by `nama`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub project: ProjectKey,
    pub rows: Vec<ReportRow>,
    pub search: Option<String>,
    pub message: Option<String>,
}

/// One rendered page of a [`ReportTable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTablePage {
    pub project: ProjectKey,
    #[serde(flatten)]
    pub page: Page<ReportRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ReportTable {
    pub fn from_snapshot(snapshot: &ProjectSnapshot) -> Self {
        let rows: Vec<ReportRow> = snapshot.reports.iter().map(ReportRow::from).collect();
        let message = snapshot
            .error
            .clone()
            .or_else(|| rows.is_empty().then(|| "No reports yet.".to_string()));

        Self {
            project: snapshot.project,
            rows,
            search: None,
            message,
        }
    }

    /// Keeps the rows whose `nama` contains `query`.
    pub fn with_search(mut self, query: Option<&str>) -> Self {
        let Some(query) = normalize_query(query) else {
            return self;
        };

        let total = self.rows.len();
        self.rows.retain(|row| matches_search(&row.nama, &query));
        if total > 0 && self.rows.is_empty() {
            self.message = Some(format!("No reports match \"{query}\"."));
        }
        self.search = Some(query);
        self
    }

    /// Cuts the table into the requested 1-based page.
    pub fn paginate(self, page: u32, per_page: u32) -> ReportTablePage {
        ReportTablePage {
            project: self.project,
            page: paginate(self.rows, page, per_page),
            search: self.search,
            message: self.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StageRef;

    fn named(id: u64, nama: &str) -> ProgressReport {
        ProgressReport {
            id,
            nama: Some(nama.to_string()),
            ..Default::default()
        }
    }

    fn snapshot(reports: Vec<ProgressReport>) -> ProjectSnapshot {
        ProjectSnapshot {
            project: ProjectKey::Diana,
            reports,
            ..Default::default()
        }
    }

    #[test]
    fn test_rows_default_missing_fields() {
        let row = ReportRow::from(&ProgressReport {
            id: 5,
            nama: Some("  ".to_string()),
            stage: Some(StageRef::Number(2)),
            progress_percentage: Some(62.5),
            ..Default::default()
        });

        assert_eq!(row.nama, MISSING);
        assert_eq!(row.lokasi, MISSING);
        assert_eq!(row.status, MISSING);
        assert_eq!(row.stage, "2");
        assert_eq!(row.progress, "62.5%");
        assert_eq!(row.photo_count, 0);
    }

    #[test]
    fn test_search_filters_on_nama() {
        let table = ReportTable::from_snapshot(&snapshot(vec![
            named(1, "Budi Santoso"),
            named(2, "Sari"),
            named(3, "budiman"),
        ]))
        .with_search(Some("BUDI"));

        let ids: Vec<u64> = table.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_paginated_table() {
        let reports = (1..=23).map(|i| named(i, &format!("Petugas {i}"))).collect();
        let page = ReportTable::from_snapshot(&snapshot(reports)).paginate(2, 10);

        assert_eq!(page.page.items.len(), 10);
        assert_eq!(page.page.items[0].id, 11);
        assert_eq!(page.page.total_items, 23);
        assert_eq!(page.page.pagination.total_pages, 3);
        assert!(page.page.pagination.has_prev && page.page.pagination.has_next);
    }

    #[test]
    fn test_empty_and_no_match_messages() {
        let empty = ReportTable::from_snapshot(&snapshot(Vec::new()));
        assert_eq!(empty.message.as_deref(), Some("No reports yet."));

        let no_match = ReportTable::from_snapshot(&snapshot(vec![named(1, "Sari")]))
            .with_search(Some("joko"));
        assert_eq!(no_match.message.as_deref(), Some("No reports match \"joko\"."));
    }

    #[test]
    fn test_page_serializes_flat() {
        let page = ReportTable::from_snapshot(&snapshot(vec![named(1, "Sari")])).paginate(1, 10);
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["project"], "diana");
        assert_eq!(json["total_items"], 1);
        assert_eq!(json["items"][0]["nama"], "Sari");
        assert_eq!(json["pagination"]["markers"][0], 1);
        assert!(json.get("message").is_none());
    }
}
