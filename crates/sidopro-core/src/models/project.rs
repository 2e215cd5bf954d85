//! Project keys and the store locations they resolve to.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProgressError;

/// Survey project selecting a stage configuration and a report collection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKey {
    #[default]
    Diana,
    Bungtomo,
}

impl ProjectKey {
    /// Every known project, in menu order.
    pub const ALL: [ProjectKey; 2] = [ProjectKey::Diana, ProjectKey::Bungtomo];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectKey::Diana => "diana",
            ProjectKey::Bungtomo => "bungtomo",
        }
    }

    /// Key of the stage configuration document for this project.
    pub fn config_document(&self) -> &'static str {
        match self {
            ProjectKey::Diana => "stages_config",
            ProjectKey::Bungtomo => "stages_config_bungtomo",
        }
    }

    /// Name of the report collection for this project.
    pub fn report_collection(&self) -> &'static str {
        match self {
            ProjectKey::Diana => "Progress_Diana",
            ProjectKey::Bungtomo => "Progress_Bungtomo",
        }
    }
}

impl FromStr for ProjectKey {
    type Err = ProgressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "diana" => Ok(ProjectKey::Diana),
            "bungtomo" => Ok(ProjectKey::Bungtomo),
            _ => Err(ProgressError::UnknownProject { key: s.to_string() }),
        }
    }
}
