//! Parameter structures shared by the CLI and the HTTP server.
//!
//! These carry no framework derives beyond serde so that each interface can
//! wrap them with its own argument or query types and convert with `From`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Answer, Coordinates, ProgressReport, ProjectKey, StageRef};

/// Default number of rows per report table page.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Parameters for listing the stages of a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListStages {
    pub project: ProjectKey,
    /// Case-insensitive substring matched against the stage name
    pub search: Option<String>,
}

/// Parameters for listing one page of a project's reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListReports {
    pub project: ProjectKey,
    /// Case-insensitive substring matched against `nama`
    pub search: Option<String>,
    /// 1-based page number
    pub page: u32,
    pub per_page: u32,
}

impl Default for ListReports {
    fn default() -> Self {
        Self {
            project: ProjectKey::default(),
            search: None,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Identifies one report within a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportId {
    pub project: ProjectKey,
    pub id: u64,
}

/// Parameters for submitting a new progress report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitReport {
    pub project: ProjectKey,
    pub nama: Option<String>,
    pub lokasi: Option<String>,
    pub pekerjaan: Option<String>,
    pub status: Option<String>,
    pub stage: Option<u32>,
    pub progress_percentage: Option<f64>,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub photos: BTreeMap<String, String>,
    pub coordinates: Option<Coordinates>,
}

impl From<&SubmitReport> for ProgressReport {
    fn from(params: &SubmitReport) -> Self {
        ProgressReport {
            id: 0,
            nama: params.nama.clone(),
            lokasi: params.lokasi.clone(),
            pekerjaan: params.pekerjaan.clone(),
            status: params.status.clone(),
            stage: params.stage.map(StageRef::Number),
            progress_percentage: params.progress_percentage,
            answers: params.answers.clone(),
            photos: params.photos.clone(),
            coordinates: params.coordinates,
            created_at: None,
        }
    }
}
