//! Process-wide tracing setup. Kept in its own test binary because it installs
//! the global subscriber.

use mealie_mcp::observability::{init_tracing, LOG_TARGET};
use mealie_mcp::types::ObservabilityConfig;

#[test]
fn test_init_tracing_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server.log");
    let config = ObservabilityConfig {
        log_level: "debug".to_string(),
        json_logs: true,
        log_file: Some(path.clone()),
    };
    init_tracing(&config);
    init_tracing(&config);

    tracing::info!(target: LOG_TARGET, "written to the log file");

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("written to the log file"));
}
