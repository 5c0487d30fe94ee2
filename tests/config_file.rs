use std::fs;
use std::time::Duration;

use loan_simulator::config::Config;
use tempfile::tempdir;

#[test]
fn missing_config_is_created_with_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let cfg = Config::load_or_default(&path).expect("load");
    assert!(path.exists());
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.chat_number, "15550123456");
    assert_eq!(cfg.submission_delay_ms, 1500);
    assert_eq!(cfg.chat_link_delay_ms, 3000);
    assert_eq!(cfg.annual_rate, 0.02);
    assert_eq!(cfg.language_override(), None);
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "language = \"fr\"\nchat_number = \"34600111222\"\n").expect("write");
    let cfg = Config::load_or_default(&path).expect("load");
    assert_eq!(cfg.language_override(), Some("fr"));
    assert_eq!(cfg.chat_number, "34600111222");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.chat_dispatch().number, "34600111222");
    assert_eq!(cfg.chat_dispatch().delay, Duration::from_millis(3000));
    assert_eq!(cfg.submission_gateway().delay, Duration::from_millis(1500));
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let cfg = Config {
        language: "es".into(),
        submission_delay_ms: 10,
        ..Config::default()
    };
    cfg.save(&path).expect("save");
    assert_eq!(Config::load_or_default(&path).expect("load"), cfg);
}

#[test]
fn malformed_config_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "submission_delay_ms = \"soon\"").expect("write");
    assert!(Config::load_or_default(&path).is_err());
}
