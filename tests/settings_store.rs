#![forbid(unsafe_code)]
use chrono::NaiveTime;
use schichtplan::{SettingsStore, ShiftConfig};
use tempfile::tempdir;

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::new(dir.path().join("settings.json"));
    let config = store.load().unwrap();
    assert_eq!(config, ShiftConfig::default());
}

#[test]
fn save_and_load_roundtrip() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::new(dir.path().join("settings.json"));

    let mut config = ShiftConfig::default();
    config.early.min_staffing = 3;
    config.night.start = NaiveTime::from_hms_opt(21, 30, 0).unwrap();
    store.save(&config).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn zero_staffing_is_rejected() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::new(dir.path().join("settings.json"));

    let mut config = ShiftConfig::default();
    config.late.min_staffing = 0;
    assert!(store.save(&config).is_err());
}

#[test]
fn too_short_window_is_rejected() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::new(dir.path().join("settings.json"));

    let mut config = ShiftConfig::default();
    config.early.end = NaiveTime::from_hms_opt(6, 15, 0).unwrap();
    assert!(store.save(&config).is_err());
}
