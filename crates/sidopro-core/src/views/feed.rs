//! Project snapshots and the live feed that keeps them current.
//!
//! A [`ProjectSnapshot`] is what every view renders from: the project's
//! stages and reports as read at one point in time. Loading never fails;
//! read errors are logged and surface as a diagnostic message with empty
//! lists.
//!
//! [`ProjectFeed`] is the live variant. While mounted it reloads the
//! snapshot after every store write and publishes it through a `watch`
//! channel. Changing the project or unmounting detaches the subscription.

use std::sync::Arc;

use log::{debug, warn};
use serde::Serialize;
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    models::{ProgressReport, ProjectKey, Stage},
    store::ProgressStore,
};

/// Stages and reports of one project as read at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectSnapshot {
    pub project: ProjectKey,
    pub stages: Vec<Stage>,
    pub reports: Vec<ProgressReport>,
    /// Diagnostic for a failed read; the affected list is left empty
    pub error: Option<String>,
}

impl ProjectSnapshot {
    /// Reads the project's stage configuration and reports.
    pub async fn load(store: &ProgressStore, project: ProjectKey) -> Self {
        let mut errors = Vec::new();

        let stages = match store.stage_config(project).await {
            Ok(config) => config.map(|c| c.stages()).unwrap_or_default(),
            Err(e) => {
                warn!("Failed to load stages for {}: {e}", project.as_str());
                errors.push(format!("Failed to load stages: {e}"));
                Vec::new()
            }
        };

        let reports = match store.reports(project).await {
            Ok(reports) => reports,
            Err(e) => {
                warn!("Failed to load reports for {}: {e}", project.as_str());
                errors.push(format!("Failed to load reports: {e}"));
                Vec::new()
            }
        };

        Self {
            project,
            stages,
            reports,
            error: (!errors.is_empty()).then(|| errors.join("; ")),
        }
    }
}

/// Live, self-refreshing [`ProjectSnapshot`].
pub struct ProjectFeed {
    store: ProgressStore,
    project: ProjectKey,
    sender: Arc<watch::Sender<ProjectSnapshot>>,
    receiver: watch::Receiver<ProjectSnapshot>,
    task: Option<JoinHandle<()>>,
}

impl ProjectFeed {
    /// Loads the initial snapshot and starts following store changes.
    pub async fn mount(store: ProgressStore, project: ProjectKey) -> Self {
        let subscription = store.subscribe();
        let initial = ProjectSnapshot::load(&store, project).await;
        let (sender, receiver) = watch::channel(initial);
        let sender = Arc::new(sender);

        let task = spawn_refresh(store.clone(), project, subscription, Arc::clone(&sender));

        Self {
            store,
            project,
            sender,
            receiver,
            task: Some(task),
        }
    }

    pub fn project(&self) -> ProjectKey {
        self.project
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> ProjectSnapshot {
        self.receiver.borrow().clone()
    }

    /// Waits until a newer snapshot is published.
    ///
    /// Returns false if the feed can no longer publish.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }

    /// Switches to another project, replacing the subscription.
    pub async fn set_project(&mut self, project: ProjectKey) {
        self.detach();
        self.project = project;

        let subscription = self.store.subscribe();
        self.sender
            .send_replace(ProjectSnapshot::load(&self.store, project).await);
        self.task = Some(spawn_refresh(
            self.store.clone(),
            project,
            subscription,
            Arc::clone(&self.sender),
        ));
    }

    pub fn is_mounted(&self) -> bool {
        self.task.is_some()
    }

    /// Stops following store changes; the last snapshot stays readable.
    pub fn unmount(&mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("Detaching feed for {}", self.project.as_str());
            task.abort();
        }
    }
}

impl Drop for ProjectFeed {
    fn drop(&mut self) {
        self.detach();
    }
}

fn spawn_refresh(
    store: ProgressStore,
    project: ProjectKey,
    mut subscription: crate::store::Subscription,
    sender: Arc<watch::Sender<ProjectSnapshot>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while subscription.changed().await {
            let snapshot = ProjectSnapshot::load(&store, project).await;
            sender.send_replace(snapshot);
        }
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::TempDir;

    use super::*;
    use crate::{
        models::{StageConfig, StageDescriptor},
        params::SubmitReport,
        store::ProgressStoreBuilder,
    };

    async fn create_test_store() -> (TempDir, ProgressStore) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = ProgressStoreBuilder::new()
            .with_database_path(Some(temp_dir.path().join("feed.db")))
            .build()
            .await
            .expect("Failed to create store");
        (temp_dir, store)
    }

    fn report(project: ProjectKey, nama: &str) -> SubmitReport {
        SubmitReport {
            project,
            nama: Some(nama.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_snapshot_load_reads_stages_and_reports() {
        let (_temp_dir, store) = create_test_store().await;
        store
            .save_stage_config(
                ProjectKey::Diana,
                StageConfig {
                    stages: vec![StageDescriptor {
                        name: "Survey".to_string(),
                        ..Default::default()
                    }],
                },
            )
            .await
            .unwrap();
        store.submit_report(&report(ProjectKey::Diana, "Andi")).await.unwrap();

        let snapshot = ProjectSnapshot::load(&store, ProjectKey::Diana).await;
        assert_eq!(snapshot.stages.len(), 1);
        assert_eq!(snapshot.stages[0].id, 1);
        assert_eq!(snapshot.reports.len(), 1);
        assert!(snapshot.error.is_none());
    }

    #[tokio::test]
    async fn test_snapshot_load_swallows_read_failures() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("broken.db");
        let store = ProgressStoreBuilder::new()
            .with_database_path(Some(&db_path))
            .build()
            .await
            .unwrap();

        let conn = rusqlite::Connection::open(&db_path).unwrap();
        conn.execute(
            "INSERT INTO reports (collection, body, created_at) VALUES ('Progress_Diana', 'not json', 0)",
            [],
        )
        .unwrap();

        let snapshot = ProjectSnapshot::load(&store, ProjectKey::Diana).await;
        assert!(snapshot.reports.is_empty());
        let error = snapshot.error.expect("diagnostic message");
        assert!(error.starts_with("Failed to load reports"));
    }

    #[tokio::test]
    async fn test_feed_follows_writes() {
        let (_temp_dir, store) = create_test_store().await;
        let mut feed = ProjectFeed::mount(store.clone(), ProjectKey::Diana).await;
        assert!(feed.snapshot().reports.is_empty());

        store.submit_report(&report(ProjectKey::Diana, "Andi")).await.unwrap();

        assert!(feed.changed().await);
        let snapshot = feed.snapshot();
        assert_eq!(snapshot.reports.len(), 1);
        assert_eq!(snapshot.reports[0].nama.as_deref(), Some("Andi"));
    }

    #[tokio::test]
    async fn test_feed_switches_project() {
        let (_temp_dir, store) = create_test_store().await;
        store.submit_report(&report(ProjectKey::Bungtomo, "Citra")).await.unwrap();

        let mut feed = ProjectFeed::mount(store.clone(), ProjectKey::Diana).await;
        assert!(feed.snapshot().reports.is_empty());

        feed.set_project(ProjectKey::Bungtomo).await;
        assert_eq!(feed.project(), ProjectKey::Bungtomo);
        assert!(feed.changed().await);
        let snapshot = feed.snapshot();
        assert_eq!(snapshot.project, ProjectKey::Bungtomo);
        assert_eq!(snapshot.reports.len(), 1);
        assert!(feed.is_mounted());
    }

    #[tokio::test]
    async fn test_unmounted_feed_stops_refreshing() {
        let (_temp_dir, store) = create_test_store().await;
        let mut feed = ProjectFeed::mount(store.clone(), ProjectKey::Diana).await;

        feed.unmount();
        assert!(!feed.is_mounted());

        store.submit_report(&report(ProjectKey::Diana, "Andi")).await.unwrap();

        let waited = tokio::time::timeout(Duration::from_millis(200), feed.changed()).await;
        assert!(waited.is_err());
        assert!(feed.snapshot().reports.is_empty());
    }
}
