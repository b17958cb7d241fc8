//! Integration tests for logging functionality
//!
//! `init_logging` installs the global subscriber, so only one test in this
//! binary may call it.

use embark::config::LoggingConfig;
use embark::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "/var/log/embark");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_file_logging_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs").join("embark");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };
    assert!(!log_path.exists());

    let guard = init_logging("debug", &config).expect("Failed to initialize logging");
    tracing::info!(index = "documents", "Logging integration test event");
    drop(guard);

    assert!(log_path.is_dir());
    assert!(log_path.join("embark.log").exists());
}

#[test]
fn test_invalid_rotation_rejected_before_subscriber_install() {
    let config = LoggingConfig {
        local_enabled: true,
        local_path: std::env::temp_dir().to_string_lossy().to_string(),
        local_rotation: "weekly".to_string(),
    };
    assert!(init_logging("info", &config).is_err());
}

#[test]
fn test_invalid_level_rejected() {
    assert!(init_logging("verbose", &LoggingConfig::default()).is_err());
}
