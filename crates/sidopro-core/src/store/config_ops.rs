//! Stage configuration operations for the ProgressStore.

use log::info;

use super::ProgressStore;
use crate::{
    error::Result,
    models::{ProjectKey, StageConfig},
};

impl ProgressStore {
    /// Reads the stage configuration of a project.
    ///
    /// Returns `None` when the project has never been configured.
    pub async fn stage_config(&self, project: ProjectKey) -> Result<Option<StageConfig>> {
        self.with_database(move |db| db.get_config_document(project.config_document()))
            .await
    }

    /// Replaces the stage configuration of a project.
    ///
    /// Stage ids are positional, so reordering the list re-targets every
    /// report that refers to a stage by id.
    pub async fn save_stage_config(&self, project: ProjectKey, config: StageConfig) -> Result<()> {
        let stage_count = config.stages.len();
        self.with_database(move |db| db.put_config_document(project.config_document(), &config))
            .await?;

        info!("Saved {stage_count} stages for project {}", project.as_str());
        self.notify_change();
        Ok(())
    }
}
