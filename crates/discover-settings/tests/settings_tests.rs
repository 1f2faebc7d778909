//! Integration tests for settings persistence

use discover_settings::{DiscoverSettings, QueryListSettings, TelemetrySettings};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let settings = DiscoverSettings::load_from(&dir.path().join("settings.json")).unwrap();

    assert_eq!(settings, DiscoverSettings::default());
    assert_eq!(settings.list.preset_subtitle, "Pre-Built Query");
    assert_eq!(settings.list.transaction_feature, "transaction-events");
    assert!(settings.telemetry.enabled);
}

#[test]
fn test_settings_persistence() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let settings = DiscoverSettings {
        list: QueryListSettings {
            saved_subtitle: "My Query".to_string(),
            ..QueryListSettings::default()
        },
        telemetry: TelemetrySettings {
            enabled: false,
            ..TelemetrySettings::default()
        },
    };
    settings.save_to(&path).unwrap();

    let loaded = DiscoverSettings::load_from(&path).unwrap();
    assert_eq!(loaded, settings);
    assert!(path.exists());
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"telemetry": {"enabled": false}}"#).unwrap();

    let loaded = DiscoverSettings::load_from(&path).unwrap();

    assert!(!loaded.telemetry.enabled);
    assert_eq!(
        loaded.telemetry.preset_click_event,
        "discover_v2.prebuilt_query_click"
    );
    assert_eq!(loaded.list, QueryListSettings::default());
}

#[test]
fn test_invalid_json_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = DiscoverSettings::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse settings JSON"));
}

#[test]
fn test_default_path_is_namespaced() {
    if let Ok(path) = DiscoverSettings::settings_path() {
        assert!(path.ends_with("discover/settings.json"));
    }
}
