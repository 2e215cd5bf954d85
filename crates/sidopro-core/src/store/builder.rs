//! Builder for creating and configuring ProgressStore instances.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::ProgressStore;
use crate::{
    db::Database,
    error::{ProgressError, Result},
};

/// Builder for creating and configuring ProgressStore instances.
#[derive(Debug, Clone, Default)]
pub struct ProgressStoreBuilder {
    database_path: Option<PathBuf>,
}

impl ProgressStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/sidopro/sidopro.db` or `~/.local/share/sidopro/sidopro.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the store, creating the database file and schema if needed.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::FileSystem` if the database directory cannot be
    /// created, `ProgressError::Database` if schema initialization fails.
    pub async fn build(self) -> Result<ProgressStore> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => default_data_file("sidopro.db")?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ProgressError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        debug!("Opening progress store at {}", db_path.display());

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || Database::new(&db_path_clone).map(drop))
            .await
            .map_err(ProgressError::join)??;

        Ok(ProgressStore::new(db_path))
    }
}

/// Places a data file under `$XDG_DATA_HOME/sidopro`.
pub fn default_data_file(name: &str) -> Result<PathBuf> {
    xdg::BaseDirectories::with_prefix("sidopro")
        .place_data_file(name)
        .map_err(|e| ProgressError::XdgDirectory(e.to_string()))
}
