//! # Configured Reporter Tests
//!
//! Loads a TOML config with the file backend, installs it, and drives a
//! failed check through the default handler. The record must land in the
//! mapped file where a post-mortem reader can find it.

use fault_common::config::{load_fault_config, SinkKind};
use fault_reporter::{check_result, install, report_sink, FaultStore, MappedStore};
use std::fs;
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

#[test]
fn failed_check_persists_to_configured_file() {
    let dir = TempDir::new().unwrap();
    let record_path = dir.path().join("faults").join("record.bin");
    let config_path = dir.path().join("fault.toml");
    fs::write(
        &config_path,
        format!(
            r#"[shared]
service_name = "install-test"

[report]
sink = "none"

[store]
backend = "file"
path = "{}"
"#,
            record_path.display()
        ),
    )
    .unwrap();

    let config = load_fault_config(&config_path).unwrap();
    install(&config).unwrap();
    assert_eq!(report_sink(), SinkKind::Silent);

    let worker = thread::spawn(|| check_result(0x0Bu32));

    let reader = MappedStore::open_existing(&record_path).unwrap();
    let deadline = Instant::now() + Duration::from_secs(5);
    let record = loop {
        if let Some(record) = reader.load().unwrap() {
            break record;
        }
        assert!(Instant::now() < deadline, "fault record never persisted");
        thread::sleep(Duration::from_millis(5));
    };

    assert_eq!(record.id, 0x4001);
    assert_eq!(record.pc, 0);
    assert_ne!(record.info, 0);
    assert_eq!(record.code, 0x0B);

    thread::sleep(Duration::from_millis(100));
    assert!(!worker.is_finished());
}
