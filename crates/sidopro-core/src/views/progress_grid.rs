//! Progress grid view: one card per stage summarizing its reports.

use serde::Serialize;

use super::{
    feed::ProjectSnapshot,
    search::{matches_search, normalize_query},
};
use crate::models::ProjectKey;

/// Summary of the reports filed against one stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageCard {
    pub stage_id: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub report_count: usize,
    /// Mean `progress_percentage` of reports that carry one
    pub average_progress: Option<f64>,
    /// Status of the newest report that carries one
    pub latest_status: Option<String>,
}

/// Per-stage progress overview of a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressGrid {
    pub project: ProjectKey,
    pub cards: Vec<StageCard>,
    /// Reports whose stage reference matches no configured stage
    pub unassigned_reports: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProgressGrid {
    pub fn from_snapshot(snapshot: &ProjectSnapshot) -> Self {
        let cards: Vec<StageCard> = snapshot
            .stages
            .iter()
            .map(|stage| {
                // Reports arrive newest first
                let reports: Vec<_> = snapshot
                    .reports
                    .iter()
                    .filter(|r| r.stage_id() == Some(stage.id))
                    .collect();

                let percentages: Vec<f64> =
                    reports.iter().filter_map(|r| r.progress_percentage).collect();
                let average_progress = (!percentages.is_empty())
                    .then(|| percentages.iter().sum::<f64>() / percentages.len() as f64);

                StageCard {
                    stage_id: stage.id,
                    name: stage.name.clone(),
                    date: stage.date.clone(),
                    report_count: reports.len(),
                    average_progress,
                    latest_status: reports.iter().find_map(|r| r.status.clone()),
                }
            })
            .collect();

        let assigned: usize = cards.iter().map(|c| c.report_count).sum();
        let message = snapshot.error.clone().or_else(|| {
            cards
                .is_empty()
                .then(|| "No stages configured for this project.".to_string())
        });

        Self {
            project: snapshot.project,
            cards,
            unassigned_reports: snapshot.reports.len() - assigned,
            search: None,
            message,
        }
    }

    /// Keeps the cards whose stage name contains `query`.
    pub fn with_search(mut self, query: Option<&str>) -> Self {
        let Some(query) = normalize_query(query) else {
            return self;
        };

        let total = self.cards.len();
        self.cards.retain(|card| matches_search(&card.name, &query));
        if total > 0 && self.cards.is_empty() {
            self.message = Some(format!("No stages match \"{query}\"."));
        }
        self.search = Some(query);
        self
    }
}
