//! Tests for the store module.

use std::collections::BTreeMap;

use tempfile::TempDir;

use super::*;
use crate::{
    models::{FieldKind, ProjectKey, StageConfig, StageDescriptor, StageField},
    params::{ReportId, SubmitReport},
};

/// Helper function to create a test store
async fn create_test_store() -> (TempDir, ProgressStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let store = ProgressStoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}

fn survey_config() -> StageConfig {
    StageConfig {
        stages: vec![
            StageDescriptor {
                name: "Survey awal".to_string(),
                date: Some("2024-03-01".to_string()),
                fields: vec![
                    StageField {
                        label: "Catatan".to_string(),
                        kind: FieldKind::Text,
                    },
                    StageField {
                        label: "Foto lokasi".to_string(),
                        kind: FieldKind::Photo,
                    },
                ],
            },
            StageDescriptor {
                name: "Pengukuran".to_string(),
                ..Default::default()
            },
        ],
    }
}

fn submission(nama: &str, stage: Option<u32>) -> SubmitReport {
    SubmitReport {
        project: ProjectKey::Diana,
        nama: Some(nama.to_string()),
        stage,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_stage_config_absent_until_saved() {
    let (_temp_dir, store) = create_test_store().await;

    assert!(store.stage_config(ProjectKey::Diana).await.unwrap().is_none());

    store
        .save_stage_config(ProjectKey::Diana, survey_config())
        .await
        .expect("Failed to save config");

    let config = store.stage_config(ProjectKey::Diana).await.unwrap().unwrap();
    assert_eq!(config, survey_config());
    assert!(store.stage_config(ProjectKey::Bungtomo).await.unwrap().is_none());
}

#[tokio::test]
async fn test_reports_are_listed_newest_first_per_collection() {
    let (_temp_dir, store) = create_test_store().await;

    let first = store.submit_report(&submission("Andi", None)).await.unwrap();
    let second = store.submit_report(&submission("Budi", None)).await.unwrap();
    store
        .submit_report(&SubmitReport {
            project: ProjectKey::Bungtomo,
            ..submission("Citra", None)
        })
        .await
        .unwrap();

    let reports = store.reports(ProjectKey::Diana).await.unwrap();
    let ids: Vec<u64> = reports.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert!(reports.iter().all(|r| r.created_at.is_some()));

    let other = store.reports(ProjectKey::Bungtomo).await.unwrap();
    assert_eq!(other.len(), 1);
    assert_eq!(other[0].nama.as_deref(), Some("Citra"));
}

#[tokio::test]
async fn test_submit_rejects_out_of_range_percentage() {
    let (_temp_dir, store) = create_test_store().await;

    let err = store
        .submit_report(&SubmitReport {
            progress_percentage: Some(120.0),
            ..submission("Andi", None)
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ProgressError::InvalidInput { ref field, .. } if field == "progress_percentage"));
    assert!(store.reports(ProjectKey::Diana).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_submit_checks_stage_against_config() {
    let (_temp_dir, store) = create_test_store().await;

    // Unconfigured projects accept any stage
    store.submit_report(&submission("Andi", Some(7))).await.unwrap();

    store
        .save_stage_config(ProjectKey::Diana, survey_config())
        .await
        .unwrap();

    let err = store
        .submit_report(&submission("Budi", Some(3)))
        .await
        .unwrap_err();
    assert!(matches!(err, ProgressError::StageNotFound { id: 3, .. }));

    store.submit_report(&submission("Budi", Some(2))).await.unwrap();
}

#[tokio::test]
async fn test_submit_checks_photo_labels() {
    let (_temp_dir, store) = create_test_store().await;
    store
        .save_stage_config(ProjectKey::Diana, survey_config())
        .await
        .unwrap();

    let mut photos = BTreeMap::new();
    photos.insert("Catatan".to_string(), "photos/a.jpg".to_string());
    let err = store
        .submit_report(&SubmitReport {
            photos: photos.clone(),
            ..submission("Andi", Some(1))
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ProgressError::InvalidInput { ref field, .. } if field == "photos"));

    photos.clear();
    photos.insert("Foto lokasi".to_string(), "photos/a.jpg".to_string());
    let stored = store
        .submit_report(&SubmitReport {
            photos,
            ..submission("Andi", Some(1))
        })
        .await
        .unwrap();
    assert_eq!(stored.photos.len(), 1);
}

#[tokio::test]
async fn test_get_and_delete_report() {
    let (_temp_dir, store) = create_test_store().await;
    let stored = store.submit_report(&submission("Andi", None)).await.unwrap();
    let id = ReportId {
        project: ProjectKey::Diana,
        id: stored.id,
    };

    let fetched = store.get_report(&id).await.unwrap().unwrap();
    assert_eq!(fetched.nama.as_deref(), Some("Andi"));

    // Same id in another collection is a different report
    let elsewhere = ReportId {
        project: ProjectKey::Bungtomo,
        id: stored.id,
    };
    assert!(store.get_report(&elsewhere).await.unwrap().is_none());
    assert!(matches!(
        store.delete_report(&elsewhere).await,
        Err(ProgressError::ReportNotFound { .. })
    ));

    store.delete_report(&id).await.unwrap();
    assert!(store.get_report(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_writes_notify_subscribers() {
    let (_temp_dir, store) = create_test_store().await;
    let mut subscription = store.subscribe();
    assert_eq!(subscription.revision(), 0);

    store.submit_report(&submission("Andi", None)).await.unwrap();
    assert!(subscription.changed().await);
    assert_eq!(subscription.revision(), 1);

    store
        .save_stage_config(ProjectKey::Diana, survey_config())
        .await
        .unwrap();
    assert!(subscription.changed().await);
    assert_eq!(store.revision(), 2);
}

#[tokio::test]
async fn test_failed_writes_do_not_notify() {
    let (_temp_dir, store) = create_test_store().await;

    let _ = store
        .submit_report(&SubmitReport {
            progress_percentage: Some(-1.0),
            ..submission("Andi", None)
        })
        .await;

    assert_eq!(store.revision(), 0);
}

#[tokio::test]
async fn test_loose_document_does_not_hide_collection() {
    let (temp_dir, store) = create_test_store().await;
    store.submit_report(&submission("Andi", Some(1))).await.unwrap();

    let conn = rusqlite::Connection::open(temp_dir.path().join("test.db")).unwrap();
    conn.execute(
        "INSERT INTO reports (collection, body, created_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![
            "Progress_Diana",
            r#"{"nama":"Budi","stage":2.0,"progress_percentage":"50"}"#,
            0
        ],
    )
    .unwrap();

    let snapshot = crate::views::ProjectSnapshot::load(&store, ProjectKey::Diana).await;
    assert_eq!(snapshot.error, None);
    assert_eq!(snapshot.reports.len(), 2);
    assert_eq!(snapshot.reports[1].stage_id(), Some(2));
    assert_eq!(snapshot.reports[1].progress_percentage, Some(50.0));
}
