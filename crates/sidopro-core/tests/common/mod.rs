use sidopro_core::{
    models::{FieldKind, StageConfig, StageDescriptor, StageField},
    ProgressStore, ProgressStoreBuilder,
};
use tempfile::TempDir;

/// Helper function to create a test store
pub async fn create_test_store() -> (TempDir, ProgressStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let store = ProgressStoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}

/// Three-stage configuration whose first and last stage share a name.
#[allow(dead_code)]
pub fn three_stage_config() -> StageConfig {
    let stage = |name: &str, fields: Vec<StageField>| StageDescriptor {
        name: name.to_string(),
        date: None,
        fields,
    };
    StageConfig {
        stages: vec![
            stage(
                "Survey",
                vec![StageField {
                    label: "Foto lokasi".to_string(),
                    kind: FieldKind::Photo,
                }],
            ),
            stage("Pengukuran", Vec::new()),
            stage("Survey", Vec::new()),
        ],
    }
}
