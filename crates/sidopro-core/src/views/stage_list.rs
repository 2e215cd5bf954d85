//! Stage list view.

use serde::Serialize;

use super::{
    feed::ProjectSnapshot,
    search::{matches_search, normalize_query},
};
use crate::models::{ProjectKey, Stage};

/// Stages of a project in configuration order, optionally filtered by name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageList {
    pub project: ProjectKey,
    pub stages: Vec<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Empty-state or diagnostic message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StageList {
    pub fn from_snapshot(snapshot: &ProjectSnapshot) -> Self {
        let message = snapshot.error.clone().or_else(|| {
            snapshot
                .stages
                .is_empty()
                .then(|| "No stages configured for this project.".to_string())
        });

        Self {
            project: snapshot.project,
            stages: snapshot.stages.clone(),
            search: None,
            message,
        }
    }

    /// Keeps the stages whose name contains `query`.
    pub fn with_search(mut self, query: Option<&str>) -> Self {
        let Some(query) = normalize_query(query) else {
            return self;
        };

        let total = self.stages.len();
        self.stages.retain(|stage| matches_search(&stage.name, &query));
        if total > 0 && self.stages.is_empty() {
            self.message = Some(format!("No stages match \"{query}\"."));
        }
        self.search = Some(query);
        self
    }
}
