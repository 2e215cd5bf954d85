//! High-level store API for stage configurations and progress reports.
//!
//! [`ProgressStore`] is the async facade every interface talks to. Each
//! operation opens its own SQLite connection on the blocking pool, so the
//! store itself is a cheap, cloneable handle. Writes bump a revision counter
//! that live views observe through [`Subscription`].
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  CLI / server   │    │  ProgressStore  │    │    Database     │
//! │  views          │───▶│ (config_ops,    │───▶│   (via db/)     │
//! │                 │◀───│  report_ops)    │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!      Subscription ◀── revision counter bumped on every write
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use sidopro_core::{models::ProjectKey, ProgressStoreBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ProgressStoreBuilder::new()
//!     .with_database_path(Some("progress.db"))
//!     .build()
//!     .await?;
//!
//! let reports = store.reports(ProjectKey::Diana).await?;
//! println!("{} reports", reports.len());
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc};

use tokio::{sync::watch, task};

use crate::{
    db::Database,
    error::{ProgressError, Result},
};

pub mod builder;
pub mod config_ops;
pub mod report_ops;

#[cfg(test)]
mod tests;

pub use builder::ProgressStoreBuilder;

/// Handle to the progress document store.
#[derive(Clone)]
pub struct ProgressStore {
    pub(crate) db_path: PathBuf,
    changes: Arc<watch::Sender<u64>>,
}

impl ProgressStore {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            db_path,
            changes: Arc::new(changes),
        }
    }

    /// Subscribes to change notifications for every collection and
    /// configuration document written through this handle or its clones.
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.changes.subscribe(),
        }
    }

    /// Current store revision; increases by one per write.
    pub fn revision(&self) -> u64 {
        *self.changes.borrow()
    }

    fn notify_change(&self) {
        self.changes.send_modify(|revision| *revision += 1);
    }

    /// Runs a database operation on the blocking pool.
    async fn with_database<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(ProgressError::join)?
    }
}

/// Change notifications from a [`ProgressStore`].
pub struct Subscription {
    receiver: watch::Receiver<u64>,
}

impl Subscription {
    /// Waits for the next write. Returns false once the store is gone.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }

    /// Revision observed by this subscription.
    pub fn revision(&mut self) -> u64 {
        *self.receiver.borrow_and_update()
    }
}
