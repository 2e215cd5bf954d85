mod common;

use std::time::Duration;

use common::{create_test_store, three_stage_config};
use sidopro_core::{
    db::Database,
    models::ProjectKey,
    params::{ReportId, SubmitReport},
    views::{PageMarker, ProgressGrid, ProjectFeed, ProjectSnapshot, ReportTable, StageList},
    ProgressStoreBuilder,
};
use tempfile::TempDir;

fn report(project: ProjectKey, nama: &str, stage: u32, progress: f64) -> SubmitReport {
    SubmitReport {
        project,
        nama: Some(nama.to_string()),
        stage: Some(stage),
        progress_percentage: Some(progress),
        status: Some("berjalan".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_complete_project_workflow() {
    let (_temp_dir, store) = create_test_store().await;
    store
        .save_stage_config(ProjectKey::Diana, three_stage_config())
        .await
        .expect("Failed to save config");

    for (i, nama) in ["Andi", "Budi", "Citra"].iter().enumerate() {
        store
            .submit_report(&report(ProjectKey::Diana, nama, 1, 30.0 * (i as f64 + 1.0)))
            .await
            .expect("Failed to submit report");
    }
    store
        .submit_report(&report(ProjectKey::Diana, "Dewi", 3, 100.0))
        .await
        .expect("Failed to submit report");

    let snapshot = ProjectSnapshot::load(&store, ProjectKey::Diana).await;
    assert!(snapshot.error.is_none());

    let stages = StageList::from_snapshot(&snapshot);
    let ids: Vec<u32> = stages.stages.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let grid = ProgressGrid::from_snapshot(&snapshot);
    assert_eq!(grid.cards[0].report_count, 3);
    assert_eq!(grid.cards[0].average_progress, Some(60.0));
    assert_eq!(grid.cards[1].report_count, 0);
    assert_eq!(grid.cards[2].report_count, 1);

    let page = ReportTable::from_snapshot(&snapshot)
        .with_search(Some("i"))
        .paginate(1, 2);
    let names: Vec<&str> = page.page.items.iter().map(|r| r.nama.as_str()).collect();
    assert_eq!(names, vec!["Dewi", "Citra"]);
    assert_eq!(page.page.total_items, 4);
    assert_eq!(
        page.page.pagination.markers,
        vec![PageMarker::Page(1), PageMarker::Page(2)]
    );
    assert!(page.page.pagination.has_next);
}

#[tokio::test]
async fn test_projects_are_isolated() {
    let (_temp_dir, store) = create_test_store().await;
    store
        .save_stage_config(ProjectKey::Bungtomo, three_stage_config())
        .await
        .unwrap();
    store
        .submit_report(&report(ProjectKey::Bungtomo, "Eka", 2, 10.0))
        .await
        .unwrap();

    let diana = ProjectSnapshot::load(&store, ProjectKey::Diana).await;
    assert!(diana.stages.is_empty());
    assert!(diana.reports.is_empty());
    assert_eq!(
        ReportTable::from_snapshot(&diana).message.as_deref(),
        Some("No reports yet.")
    );

    let bungtomo = ProjectSnapshot::load(&store, ProjectKey::Bungtomo).await;
    assert_eq!(bungtomo.stages.len(), 3);
    assert_eq!(bungtomo.reports.len(), 1);
}

#[tokio::test]
async fn test_store_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("progress.db");

    let store = ProgressStoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .unwrap();
    let stored = store
        .submit_report(&report(ProjectKey::Diana, "Andi", 1, 20.0))
        .await
        .unwrap();
    drop(store);

    let reopened = ProgressStoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .unwrap();
    let fetched = reopened
        .get_report(&ReportId {
            project: ProjectKey::Diana,
            id: stored.id,
        })
        .await
        .unwrap()
        .expect("report persisted");
    assert_eq!(fetched.nama.as_deref(), Some("Andi"));
    assert_eq!(fetched.created_at, stored.created_at);
}

#[tokio::test]
async fn test_feed_follows_writes_until_unmounted() {
    let (_temp_dir, store) = create_test_store().await;
    let mut feed = ProjectFeed::mount(store.clone(), ProjectKey::Diana).await;
    assert!(feed.snapshot().reports.is_empty());

    store
        .submit_report(&report(ProjectKey::Diana, "Andi", 1, 20.0))
        .await
        .unwrap();
    tokio::time::timeout(Duration::from_secs(5), feed.changed())
        .await
        .expect("feed refreshed");
    assert_eq!(feed.snapshot().reports.len(), 1);

    feed.set_project(ProjectKey::Bungtomo).await;
    assert_eq!(feed.project(), ProjectKey::Bungtomo);
    assert!(feed.snapshot().reports.is_empty());

    feed.unmount();
    assert!(!feed.is_mounted());
}

#[test]
fn test_database_opens_twice() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("twice.db");

    Database::new(&db_path).expect("first open");
    Database::new(&db_path).expect("schema is idempotent");
}
