//! Match settings: the `settings.json` loader with range clamping.
//!
//! The loader never fails across the scheduler boundary. Whatever happens
//! to the file — missing, malformed, out-of-range values — the caller
//! always receives a resolved, in-range `MatchSettings`, plus a report
//! saying how it got there. On a broken or missing file the loader also
//! rewrites a commented default `settings.json` next time the operator
//! looks for it.

use crate::error::{TimerError, TimerResult};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

pub const SETTINGS_FILE: &str = "settings.json";

const DEFAULT_VICTORY_MESSAGE: &str = "V-GOAL Congratulations !";
const DEFAULT_READY_SECS: f64 = 5.0;
const DEFAULT_SETTINGS_MINS: f64 = 1.0;
const DEFAULT_PLAY_MINS: f64 = 3.0;
const DEFAULT_AUTO_LAUNCH_SECS: f64 = 15.0;

/// Written back when the settings file is missing or unreadable.
const DEFAULT_SETTINGS_JSON: &str = r#"{
    /* Message shown on the victory screen */
    "VictoryMessage": "V-GOAL Congratulations !",
    /* Ready countdown before each phase, in seconds (3 - 30) */
    "ReadyTime": 5,
    /* Setting time, in minutes (0.25 - 60) */
    "SettingTime": 1,
    /* Play time, in minutes (0.25 - 60) */
    "PlayTime": 3,
    /* Automatic machine launch window, in seconds (0 disables) */
    "AutoMachineLaunchTimeLimit": 15
}
"#;

/// Validated, in-range durations for one session. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSettings {
    pub ready_time: Duration,
    pub settings_time: Duration,
    pub play_time: Duration,
    /// Zero disables the automatic machine launch window.
    pub auto_launch_limit: Duration,
    pub victory_message: String,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            ready_time: Duration::from_secs_f64(DEFAULT_READY_SECS),
            settings_time: mins(DEFAULT_SETTINGS_MINS),
            play_time: mins(DEFAULT_PLAY_MINS),
            auto_launch_limit: Duration::from_secs_f64(DEFAULT_AUTO_LAUNCH_SECS),
            victory_message: DEFAULT_VICTORY_MESSAGE.to_string(),
        }
    }
}

/// On-disk shape. Times are in the units the operators edit by hand:
/// seconds for the short counters, minutes for the long ones.
#[derive(Debug, Clone, Deserialize)]
struct SettingsFile {
    #[serde(rename = "VictoryMessage")]
    victory_message: Option<String>,
    #[serde(rename = "ReadyTime")]
    ready_time: f64,
    #[serde(rename = "SettingTime")]
    setting_time: f64,
    #[serde(rename = "PlayTime")]
    play_time: f64,
    // Older settings files spell this without the "u".
    #[serde(
        rename = "AutoMachineLaunchTimeLimit",
        alias = "AutoMachineLanchTimeLimit",
        default
    )]
    auto_launch_limit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// File read and every field in range.
    Loaded,
    /// File read, but at least one field was replaced by its default.
    ValueOutOfRange,
    FileNotFound,
    InvalidFormat,
    /// Fallback defaults are in effect and the default file could not
    /// be written back.
    RewriteFailed,
    OtherError,
}

/// How the load went: the resolved status plus the names of any fields
/// that were out of range and replaced by their defaults.
/// Serialize-only: the field names borrow `'static` strings, and nothing
/// ever reads a report back in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsReport {
    pub status: LoadStatus,
    pub out_of_range: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSettings {
    pub settings: MatchSettings,
    pub report: SettingsReport,
}

impl MatchSettings {
    /// Load and validate the settings file. Infallible by contract:
    /// any failure resolves to documented defaults with a status flag.
    pub fn load(path: impl AsRef<Path>) -> LoadedSettings {
        let path = path.as_ref();
        let file = match read_settings_file(path) {
            Ok(file) => file,
            Err(TimerError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                return fall_back(path, LoadStatus::FileNotFound);
            }
            Err(TimerError::Io(e)) => {
                log::error!("cannot read {}: {e}", path.display());
                return fall_back(path, LoadStatus::OtherError);
            }
            Err(e) => {
                log::warn!("cannot parse {}: {e}", path.display());
                return fall_back(path, LoadStatus::InvalidFormat);
            }
        };
        let Some(victory_message) = file.victory_message.clone() else {
            log::warn!("{} has no victory message", path.display());
            return fall_back(path, LoadStatus::InvalidFormat);
        };

        let (settings, out_of_range) = Self::from_file(victory_message, &file);
        let status = if out_of_range.is_empty() {
            LoadStatus::Loaded
        } else {
            log::warn!("settings out of range, defaults applied: {out_of_range:?}");
            LoadStatus::ValueOutOfRange
        };
        LoadedSettings {
            settings,
            report: SettingsReport {
                status,
                out_of_range,
            },
        }
    }

    /// Clamp each field into its documented range, collecting the names
    /// of the ones that had to be replaced.
    fn from_file(victory_message: String, file: &SettingsFile) -> (Self, Vec<&'static str>) {
        let mut out_of_range = Vec::new();

        let ready_secs = check_range(
            file.ready_time,
            3.0..=30.0,
            DEFAULT_READY_SECS,
            "ready_time",
            &mut out_of_range,
        );
        let settings_mins = check_range(
            file.setting_time,
            0.25..=60.0,
            DEFAULT_SETTINGS_MINS,
            "settings_time",
            &mut out_of_range,
        );
        let play_mins = check_range(
            file.play_time,
            0.25..=60.0,
            DEFAULT_PLAY_MINS,
            "play_time",
            &mut out_of_range,
        );
        // The launch window has no lower bound beyond zero; a negative or
        // non-finite value is nonsense, not a preference.
        let auto_secs = if file.auto_launch_limit.is_finite() && file.auto_launch_limit >= 0.0 {
            file.auto_launch_limit
        } else {
            out_of_range.push("auto_launch_limit");
            DEFAULT_AUTO_LAUNCH_SECS
        };

        let settings = Self {
            ready_time: Duration::from_secs_f64(ready_secs),
            settings_time: mins(settings_mins),
            play_time: mins(play_mins),
            auto_launch_limit: Duration::from_secs_f64(auto_secs),
            victory_message,
        };
        (settings, out_of_range)
    }
}

fn mins(m: f64) -> Duration {
    Duration::from_secs_f64(m * 60.0)
}

fn check_range(
    value: f64,
    range: std::ops::RangeInclusive<f64>,
    default: f64,
    field: &'static str,
    out_of_range: &mut Vec<&'static str>,
) -> f64 {
    // NaN fails contains() and falls through to the default.
    if range.contains(&value) {
        value
    } else {
        out_of_range.push(field);
        default
    }
}

fn read_settings_file(path: &Path) -> TimerResult<SettingsFile> {
    let text = std::fs::read_to_string(path)?;
    let file = serde_json::from_str(&strip_block_comments(&text))?;
    Ok(file)
}

fn write_default_file(path: &Path) -> TimerResult<()> {
    std::fs::write(path, DEFAULT_SETTINGS_JSON)?;
    log::info!("wrote default settings to {}", path.display());
    Ok(())
}

/// Defaults take effect; also try to put a fresh commented file in place.
fn fall_back(path: &Path, mut status: LoadStatus) -> LoadedSettings {
    if let Err(e) = write_default_file(path) {
        log::error!("cannot rewrite default {}: {e}", path.display());
        status = LoadStatus::RewriteFailed;
    }
    LoadedSettings {
        settings: MatchSettings::default(),
        report: SettingsReport {
            status,
            out_of_range: Vec::new(),
        },
    }
}

/// The settings file allows `/* ... */` comments; strip them before
/// handing the text to the JSON parser. An unterminated comment swallows
/// the rest of the file, which the parser then rejects.
fn strip_block_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find("/*") {
        out.push_str(&rest[..open]);
        match rest[open + 2..].find("*/") {
            Some(close) => rest = &rest[open + 2 + close + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_single_and_multiline_comments() {
        let text = "{ /* one */ \"a\": 1, /* two\nlines */ \"b\": 2 }";
        assert_eq!(strip_block_comments(text), "{  \"a\": 1,  \"b\": 2 }");
    }

    #[test]
    fn unterminated_comment_drops_tail() {
        assert_eq!(strip_block_comments("{ \"a\": 1 /* oops"), "{ \"a\": 1 ");
    }

    #[test]
    fn report_serializes_for_logging() {
        let report = SettingsReport {
            status: LoadStatus::ValueOutOfRange,
            out_of_range: vec!["ready_time"],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("value_out_of_range"));
        assert!(json.contains("ready_time"));
    }

    #[test]
    fn defaults_match_the_documented_values() {
        let d = MatchSettings::default();
        assert_eq!(d.ready_time, Duration::from_secs(5));
        assert_eq!(d.settings_time, Duration::from_secs(60));
        assert_eq!(d.play_time, Duration::from_secs(180));
        assert_eq!(d.auto_launch_limit, Duration::from_secs(15));
        assert_eq!(d.victory_message, DEFAULT_VICTORY_MESSAGE);
    }

    #[test]
    fn default_file_parses_back_to_defaults() {
        let file: SettingsFile =
            serde_json::from_str(&strip_block_comments(DEFAULT_SETTINGS_JSON)).unwrap();
        let (settings, out_of_range) =
            MatchSettings::from_file(file.victory_message.clone().unwrap(), &file);
        assert!(out_of_range.is_empty());
        assert_eq!(settings, MatchSettings::default());
    }
}
