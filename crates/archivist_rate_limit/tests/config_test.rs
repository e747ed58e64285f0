//! Tests for the layered configuration system.

use archivist_rate_limit::ArchivistConfig;
use std::io::Write;
use std::time::Duration;
use tempfile::Builder;

#[test]
fn test_bundled_defaults_match_builtin_defaults() {
    let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(temp_file, "# empty override").unwrap();

    let config = ArchivistConfig::from_file(temp_file.path()).unwrap();

    assert_eq!(config, ArchivistConfig::default());
    assert_eq!(
        config.throttle().inter_call_delay(),
        Duration::from_secs(30)
    );
    assert_eq!(config.gemini().model(), "gemini-2.5-flash");
    assert_eq!(*config.gemini().rpm(), Some(10));
}

#[test]
fn test_file_overrides_single_values() {
    let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        temp_file,
        r#"
[throttle]
inter_call_delay_secs = 5

[gemini]
model = "gemini-2.5-pro"
generate_images = false
"#
    )
    .unwrap();

    let config = ArchivistConfig::from_file(temp_file.path()).unwrap();

    assert_eq!(*config.throttle().inter_call_delay_secs(), 5);
    assert_eq!(config.gemini().model(), "gemini-2.5-pro");
    assert!(!*config.gemini().generate_images());
    // Untouched keys keep their bundled values
    assert_eq!(config.gemini().image_model(), "imagen-3.0-generate-002");
}

#[test]
fn test_invalid_file_is_config_error() {
    let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(temp_file, "[throttle]\ninter_call_delay_secs = \"soon\"").unwrap();

    let err = ArchivistConfig::from_file(temp_file.path()).unwrap_err();
    assert!(err.user_message().contains("Failed to parse configuration"));
}
