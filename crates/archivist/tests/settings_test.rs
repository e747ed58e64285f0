//! Tests for persisted connection settings.

use archivist::{FieldMapping, RecordField, Settings};

#[test]
fn test_missing_file_is_empty_settings() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load(dir.path().join("settings.toml")).unwrap();
    assert_eq!(settings, Settings::default());
    assert!(settings.destination().is_none());
}

#[test]
fn test_connect_save_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/settings.toml");

    let mut settings = Settings::default();
    let mut mapping = FieldMapping::new();
    mapping.set(RecordField::Name, "item_no");
    mapping.set(RecordField::Description, "body");
    let destination = settings
        .connect(Some("postgres://localhost/scp".to_string()), "dossiers", mapping)
        .unwrap();
    settings.save(&path).unwrap();

    let loaded = Settings::load(&path).unwrap();
    assert_eq!(loaded, settings);
    assert_eq!(loaded.destination(), Some(destination));
    assert_eq!(
        loaded.mapping_for("dossiers").unwrap().column(RecordField::Name),
        Some("item_no")
    );
    assert_eq!(loaded.resolve_database_url().unwrap(), "postgres://localhost/scp");
}

#[test]
fn test_connect_rejects_empty_mapping_without_changes() {
    let mut settings = Settings::default();
    assert!(settings.connect(None, "dossiers", FieldMapping::new()).is_err());
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_mappings_are_kept_per_table() {
    let mut settings = Settings::default();
    settings
        .connect(None, "first", FieldMapping::default_columns())
        .unwrap();
    let mut other = FieldMapping::new();
    other.set(RecordField::Name, "title");
    settings.connect(None, "second", other).unwrap();

    assert_eq!(settings.table_name().as_deref(), Some("second"));
    assert!(settings.mapping_for("first").is_some());
    assert_eq!(settings.destination().unwrap().name_column(), Some("title"));
}

#[test]
fn test_disconnect_removes_active_table_mapping() {
    let mut settings = Settings::default();
    settings
        .connect(
            Some("postgres://localhost/scp".to_string()),
            "first",
            FieldMapping::default_columns(),
        )
        .unwrap();

    assert!(settings.disconnect());
    assert!(settings.database_url().is_none());
    assert!(settings.table_name().is_none());
    assert!(settings.mapping_for("first").is_none());
    assert!(settings.destination().is_none());
    assert!(!settings.disconnect());
}

#[test]
fn test_invalid_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[mappings.t]\nrating = \"stars\"\n").unwrap();

    let err = Settings::load(&path).unwrap_err();
    assert!(err.user_message().contains("Failed to parse settings"));
}
