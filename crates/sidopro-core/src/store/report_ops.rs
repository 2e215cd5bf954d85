//! Report operations for the ProgressStore.

use log::info;

use super::ProgressStore;
use crate::{
    error::{ProgressError, Result},
    models::{ProgressReport, ProjectKey, StageConfig},
    params::{ReportId, SubmitReport},
};

impl ProgressStore {
    /// Lists a project's reports, newest first.
    pub async fn reports(&self, project: ProjectKey) -> Result<Vec<ProgressReport>> {
        self.with_database(move |db| db.list_reports(project.report_collection()))
            .await
    }

    /// Retrieves a single report.
    pub async fn get_report(&self, params: &ReportId) -> Result<Option<ProgressReport>> {
        let ReportId { project, id } = *params;
        self.with_database(move |db| db.get_report(project.report_collection(), id))
            .await
    }

    /// Validates and stores a new report.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidInput` for an out-of-range percentage or
    /// a photo attached to a non-photo field, and
    /// `ProgressError::StageNotFound` when the project is configured but has
    /// no stage with the given id.
    pub async fn submit_report(&self, params: &SubmitReport) -> Result<ProgressReport> {
        let project = params.project;
        let config = self.stage_config(project).await?;
        validate_submission(params, config.as_ref())?;

        let report = ProgressReport::from(params);
        let stored = self
            .with_database(move |db| db.insert_report(project.report_collection(), &report))
            .await?;

        info!(
            "Stored report {} in {}",
            stored.id,
            project.report_collection()
        );
        self.notify_change();
        Ok(stored)
    }

    /// Permanently deletes a report.
    pub async fn delete_report(&self, params: &ReportId) -> Result<()> {
        let ReportId { project, id } = *params;
        self.with_database(move |db| db.delete_report(project.report_collection(), id))
            .await?;

        info!("Deleted report {id} from {}", project.report_collection());
        self.notify_change();
        Ok(())
    }
}

fn validate_submission(params: &SubmitReport, config: Option<&StageConfig>) -> Result<()> {
    if let Some(percentage) = params.progress_percentage {
        if !(0.0..=100.0).contains(&percentage) {
            return Err(ProgressError::invalid_input("progress_percentage")
                .with_reason(format!("{percentage} is outside 0-100")));
        }
    }

    let (Some(config), Some(stage_id)) = (config, params.stage) else {
        return Ok(());
    };

    let stage = config
        .stage(stage_id)
        .ok_or_else(|| ProgressError::StageNotFound {
            project: params.project.as_str().to_string(),
            id: stage_id,
        })?;

    if stage.fields.is_empty() {
        return Ok(());
    }

    match params.photos.keys().find(|label| !stage.has_photo_field(label)) {
        Some(label) => Err(ProgressError::invalid_input("photos").with_reason(format!(
            "'{label}' is not a photo field of stage {stage_id}"
        ))),
        None => Ok(()),
    }
}
