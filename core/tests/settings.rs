//! Settings file loading: clamping, comments, fallback rewrites.
//!
//! Each test works on its own file under the system temp directory so
//! the rewrite-on-failure path has somewhere real to write.

use rctimer_core::config::{LoadStatus, MatchSettings};
use std::path::PathBuf;
use std::time::Duration;

fn temp_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("rctimer-{name}-{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

#[test]
fn valid_file_loads_every_field() {
    let path = temp_path("valid");
    std::fs::write(
        &path,
        r#"{
            "VictoryMessage": "Winners!",
            "ReadyTime": 10,
            "SettingTime": 2,
            "PlayTime": 5,
            "AutoMachineLaunchTimeLimit": 20
        }"#,
    )
    .unwrap();

    let loaded = MatchSettings::load(&path);
    assert_eq!(loaded.report.status, LoadStatus::Loaded);
    assert!(loaded.report.out_of_range.is_empty());
    assert_eq!(loaded.settings.victory_message, "Winners!");
    assert_eq!(loaded.settings.ready_time, secs(10));
    assert_eq!(loaded.settings.settings_time, secs(120));
    assert_eq!(loaded.settings.play_time, secs(300));
    assert_eq!(loaded.settings.auto_launch_limit, secs(20));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn block_comments_are_allowed_in_the_file() {
    let path = temp_path("comments");
    std::fs::write(
        &path,
        "{ /* banner */ \"VictoryMessage\": \"V\",\n\
         \"ReadyTime\": 5, /* seconds */\n\
         \"SettingTime\": 1, \"PlayTime\": 3,\n\
         \"AutoMachineLaunchTimeLimit\": 0 }",
    )
    .unwrap();

    let loaded = MatchSettings::load(&path);
    assert_eq!(loaded.report.status, LoadStatus::Loaded);
    assert_eq!(loaded.settings.auto_launch_limit, Duration::ZERO);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn out_of_range_fields_fall_back_individually() {
    let path = temp_path("clamp");
    std::fs::write(
        &path,
        r#"{
            "VictoryMessage": "V",
            "ReadyTime": 99,
            "SettingTime": 2,
            "PlayTime": 0.1,
            "AutoMachineLaunchTimeLimit": 15
        }"#,
    )
    .unwrap();

    let loaded = MatchSettings::load(&path);
    assert_eq!(loaded.report.status, LoadStatus::ValueOutOfRange);
    assert_eq!(loaded.report.out_of_range, vec!["ready_time", "play_time"]);
    // flagged fields get their own defaults, in-range fields keep theirs
    assert_eq!(loaded.settings.ready_time, secs(5));
    assert_eq!(loaded.settings.play_time, secs(180));
    assert_eq!(loaded.settings.settings_time, secs(120));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_file_yields_defaults_and_rewrites_the_file() {
    let path = temp_path("missing");

    let loaded = MatchSettings::load(&path);
    assert_eq!(loaded.report.status, LoadStatus::FileNotFound);
    assert_eq!(loaded.settings, MatchSettings::default());

    // the loader put a commented default file in place; it round-trips
    assert!(path.exists());
    let reloaded = MatchSettings::load(&path);
    assert_eq!(reloaded.report.status, LoadStatus::Loaded);
    assert_eq!(reloaded.settings, MatchSettings::default());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn malformed_json_yields_defaults() {
    let path = temp_path("malformed");
    std::fs::write(&path, "{ not json at all").unwrap();

    let loaded = MatchSettings::load(&path);
    assert_eq!(loaded.report.status, LoadStatus::InvalidFormat);
    assert_eq!(loaded.settings, MatchSettings::default());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_victory_message_is_invalid() {
    let path = temp_path("no-message");
    std::fs::write(
        &path,
        r#"{ "ReadyTime": 5, "SettingTime": 1, "PlayTime": 3 }"#,
    )
    .unwrap();

    let loaded = MatchSettings::load(&path);
    assert_eq!(loaded.report.status, LoadStatus::InvalidFormat);
    assert_eq!(loaded.settings, MatchSettings::default());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn historical_misspelled_launch_key_is_accepted() {
    let path = temp_path("alias");
    std::fs::write(
        &path,
        r#"{
            "VictoryMessage": "V",
            "ReadyTime": 5,
            "SettingTime": 1,
            "PlayTime": 3,
            "AutoMachineLanchTimeLimit": 8
        }"#,
    )
    .unwrap();

    let loaded = MatchSettings::load(&path);
    assert_eq!(loaded.report.status, LoadStatus::Loaded);
    assert_eq!(loaded.settings.auto_launch_limit, secs(8));

    let _ = std::fs::remove_file(&path);
}
