use std::fs;

use file_logger::{FileLogger, LoggerConfig};
use log::LevelFilter;

// One process-wide logger per test binary, so everything lives in one test.
#[test]
fn test_installed_as_log_backend() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("facade.log");

    let logger = FileLogger::new(
        LoggerConfig::new()
            .log_directory(dir.path())
            .file_name("facade.log")
            .initiator_label("facade"),
        true,
    );
    assert!(logger.is_ok());
    logger.install(LevelFilter::Info).unwrap();

    log::info!("service started on port {}", 8080);
    log::warn!("cache miss");
    log::error!("upstream failed");
    log::debug!("filtered out by max level");

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with(" (facade)  --- INFO: \"service started on port 8080\""));
    assert!(lines[1].ends_with(" --- WARNING: \"cache miss\""));
    assert!(lines[2].ends_with(" --- ERROR: \"upstream failed\""));
}
