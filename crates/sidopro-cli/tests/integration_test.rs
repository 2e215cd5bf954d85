//! CLI output matches the Display implementations of the core views.

use std::process::Command;

use sidopro_core::{
    models::ProjectKey,
    params::{SubmitReport, DEFAULT_PER_PAGE},
    views::{ProgressGrid, ProjectSnapshot, ReportTable},
    ProgressStore, ProgressStoreBuilder,
};
use tempfile::TempDir;

async fn create_test_store() -> (ProgressStore, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let store = ProgressStoreBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .build()
        .await
        .expect("Failed to create store");
    (store, temp_dir)
}

fn run_cli_command(temp_dir: &TempDir, args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_sidopro"))
        .arg("--no-color")
        .arg("--database-file")
        .arg(temp_dir.path().join("test.db"))
        .args(args)
        .output()
        .expect("Failed to run CLI command");
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

#[tokio::test]
async fn test_report_list_matches_view_display() {
    let (store, temp_dir) = create_test_store().await;
    for nama in ["Andi", "Budi"] {
        store
            .submit_report(&SubmitReport {
                project: ProjectKey::Bungtomo,
                nama: Some(nama.to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let snapshot = ProjectSnapshot::load(&store, ProjectKey::Bungtomo).await;
    let expected = ReportTable::from_snapshot(&snapshot).paginate(1, DEFAULT_PER_PAGE).to_string();

    let output = run_cli_command(&temp_dir, &["report", "list", "--project", "bungtomo"]);
    assert_eq!(output, expected);
}

#[tokio::test]
async fn test_grid_matches_view_display() {
    let (store, temp_dir) = create_test_store().await;

    let snapshot = ProjectSnapshot::load(&store, ProjectKey::Diana).await;
    let expected = ProgressGrid::from_snapshot(&snapshot).to_string();

    assert_eq!(run_cli_command(&temp_dir, &["grid"]), expected);
}
