#[cfg(test)]
mod model_tests {
    use jiff::Timestamp;

    use crate::{
        error::ProgressError,
        models::{
            FieldKind, ProgressReport, ProjectKey, Role, StageConfig, StageDescriptor,
            StageField, StageRef,
        },
    };

    fn descriptor(name: &str) -> StageDescriptor {
        StageDescriptor {
            name: name.to_string(),
            date: None,
            fields: Vec::new(),
        }
    }

    #[test]
    fn test_stage_ids_follow_list_order_despite_name_collisions() {
        let config = StageConfig {
            stages: vec![descriptor("Survey"), descriptor("Survey"), descriptor("Survey")],
        };

        let stages = config.stages();
        let ids: Vec<u32> = stages.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_reordering_config_changes_stage_ids() {
        let mut config = StageConfig {
            stages: vec![descriptor("Pondasi"), descriptor("Atap")],
        };
        assert_eq!(config.stage(2).map(|s| s.name), Some("Atap".to_string()));

        config.stages.swap(0, 1);
        assert_eq!(config.stage(2).map(|s| s.name), Some("Pondasi".to_string()));
    }

    #[test]
    fn test_stage_lookup_out_of_range() {
        let config = StageConfig {
            stages: vec![descriptor("Only")],
        };
        assert!(config.stage(0).is_none());
        assert!(config.stage(2).is_none());
        assert!(config.stage(1).is_some());
    }

    #[test]
    fn test_stage_config_parses_document_shape() {
        let json = r#"{
            "stages": [
                {"name": "Survey awal", "date": "2024-03-01",
                 "fields": [{"label": "Catatan", "type": "text"},
                            {"label": "Foto lokasi", "type": "photo"}]},
                {"name": "Pengukuran"}
            ]
        }"#;
        let config: StageConfig = serde_json::from_str(json).unwrap();
        let stages = config.stages();

        assert_eq!(stages.len(), 2);
        assert_eq!(stages[0].field_count(FieldKind::Photo), 1);
        assert_eq!(stages[0].field_count(FieldKind::Text), 1);
        assert!(stages[0].has_photo_field("Foto lokasi"));
        assert!(!stages[0].has_photo_field("Catatan"));
        assert!(stages[1].fields.is_empty());
        assert_eq!(stages[1].date, None);
    }

    #[test]
    fn test_field_label_accepts_name_alias() {
        let field: StageField = serde_json::from_str(r#"{"name": "Foto", "type": "photo"}"#).unwrap();
        assert_eq!(field.label, "Foto");
        assert_eq!(field.kind, FieldKind::Photo);
    }

    #[test]
    fn test_project_key_resolution() {
        assert_eq!(ProjectKey::Diana.config_document(), "stages_config");
        assert_eq!(ProjectKey::Bungtomo.config_document(), "stages_config_bungtomo");
        assert_eq!(ProjectKey::Diana.report_collection(), "Progress_Diana");
        assert_eq!("BungTomo".parse::<ProjectKey>().unwrap(), ProjectKey::Bungtomo);

        let err = "kartini".parse::<ProjectKey>().unwrap_err();
        assert!(matches!(err, ProgressError::UnknownProject { .. }));
    }

    #[test]
    fn test_role_parsing_is_exact() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("petugas".parse::<Role>().unwrap(), Role::Petugas);
        assert!("Admin".parse::<Role>().is_err());
        assert_eq!(Role::default(), Role::Viewer);
    }

    #[test]
    fn test_stage_ref_ids() {
        assert_eq!(StageRef::Number(4).id(), Some(4));
        assert_eq!(StageRef::Text("3".to_string()).id(), Some(3));
        assert_eq!(StageRef::Text("Tahap 12".to_string()).id(), Some(12));
        assert_eq!(StageRef::Text("tanpa".to_string()).id(), None);
    }

    #[test]
    fn test_report_parses_sparse_document() {
        let json = r#"{"nama": "Budi", "stage": "2", "createdAt": "2024-05-01T08:00:00Z"}"#;
        let report: ProgressReport = serde_json::from_str(json).unwrap();

        assert_eq!(report.nama.as_deref(), Some("Budi"));
        assert_eq!(report.stage_id(), Some(2));
        assert_eq!(report.lokasi, None);
        assert!(report.photos.is_empty());
        assert_eq!(
            report.created_at,
            Some("2024-05-01T08:00:00Z".parse::<Timestamp>().unwrap())
        );
    }

    #[test]
    fn test_report_reads_loosely_typed_fields() {
        let json = r#"{"stage": 2.0, "progress_percentage": " 75.5 % "}"#;
        let report: ProgressReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.stage, Some(StageRef::Number(2)));
        assert_eq!(report.progress_percentage, Some(75.5));

        let json = r#"{"stage": 2.5, "progress_percentage": "hampir"}"#;
        let report: ProgressReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.stage, Some(StageRef::Text("2.5".to_string())));
        assert_eq!(report.stage_id(), Some(2));
        assert_eq!(report.progress_percentage, None);

        let json = r#"{"stage": null, "progress_percentage": {"nilai": 3}}"#;
        let report: ProgressReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.stage, None);
        assert_eq!(report.progress_percentage, None);
    }

    #[test]
    fn test_report_body_omits_id_and_empty_fields() {
        let report = ProgressReport {
            id: 42,
            nama: Some("Sari".to_string()),
            ..Default::default()
        };
        let body = serde_json::to_string(&report).unwrap();
        assert_eq!(body, r#"{"nama":"Sari"}"#);
    }
}
