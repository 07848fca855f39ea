//! Pure display projection.
//!
//! Remaining time is computed from the state and the scheduler's elapsed
//! reading on every query; the core stores no display time of its own.

use crate::config::MatchSettings;
use crate::state::AppState;
use crate::types::{MessageColor, TimerColor};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Everything the display collaborator needs to render one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayView {
    pub message: Option<String>,
    pub message_color: MessageColor,
    pub timer_color: TimerColor,
    pub remaining: Duration,
}

/// Banner text per state. `Configuration` renders its own screen and has
/// no banner; `Victory` shows the configured message.
pub fn state_message(state: AppState, victory_message: &str) -> Option<String> {
    let text = match state {
        AppState::TeamSelect => "Team Select",
        AppState::SettingsReady => "Setting Ready ?",
        AppState::SettingsTime => "Setting Time",
        AppState::PlayPreparing => "Play Preparing",
        AppState::PlayReady => "Play Ready ?",
        AppState::PlayTime => "Play Time",
        AppState::GameSet => "Game Set !",
        AppState::Victory => victory_message,
        AppState::Configuration => return None,
    };
    Some(text.to_string())
}

/// Remaining time for the countdown digits.
///
/// Idle states preview the upcoming duration so operators see what the
/// next counter will be. Ready counters round up to whole seconds (the
/// display shows 5, 4, 3, ... rather than fractional seconds). Countdown
/// states saturate at zero.
pub fn remaining_time(state: AppState, settings: &MatchSettings, elapsed: Duration) -> Duration {
    match state {
        AppState::TeamSelect => settings.settings_time,
        AppState::PlayPreparing => settings.play_time,
        AppState::SettingsReady | AppState::PlayReady => {
            ceil_secs(settings.ready_time.saturating_sub(elapsed))
        }
        AppState::SettingsTime => settings.settings_time.saturating_sub(elapsed),
        AppState::PlayTime => settings.play_time.saturating_sub(elapsed),
        AppState::Victory | AppState::GameSet | AppState::Configuration => Duration::ZERO,
    }
}

/// "m:ss.cc" for countdowns, e.g. 3 minutes as "3:00.00".
pub fn format_clock(d: Duration) -> String {
    let total_centis = d.as_millis() / 10;
    let centis = total_centis % 100;
    let seconds = (total_centis / 100) % 60;
    let minutes = total_centis / 6000;
    format!("{minutes}:{seconds:02}.{centis:02}")
}

fn ceil_secs(d: Duration) -> Duration {
    if d.subsec_nanos() == 0 {
        d
    } else {
        Duration::from_secs(d.as_secs() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn ready_counter_rounds_up_to_whole_seconds() {
        let settings = MatchSettings::default(); // ready 5s
        let rem = remaining_time(
            AppState::SettingsReady,
            &settings,
            Duration::from_millis(1400),
        );
        assert_eq!(rem, secs(4));
        // exactly on a boundary: no rounding
        let rem = remaining_time(AppState::PlayReady, &settings, secs(2));
        assert_eq!(rem, secs(3));
    }

    #[test]
    fn countdown_saturates_at_zero() {
        let settings = MatchSettings::default(); // settings 60s
        let rem = remaining_time(AppState::SettingsTime, &settings, secs(75));
        assert_eq!(rem, Duration::ZERO);
    }

    #[test]
    fn idle_states_preview_the_next_duration() {
        let settings = MatchSettings::default();
        assert_eq!(
            remaining_time(AppState::TeamSelect, &settings, secs(40)),
            settings.settings_time
        );
        assert_eq!(
            remaining_time(AppState::PlayPreparing, &settings, Duration::ZERO),
            settings.play_time
        );
    }

    #[test]
    fn clock_format_is_minutes_seconds_centis() {
        assert_eq!(format_clock(secs(180)), "3:00.00");
        assert_eq!(format_clock(Duration::from_millis(59_990)), "0:59.99");
        assert_eq!(format_clock(Duration::ZERO), "0:00.00");
    }

    #[test]
    fn victory_shows_the_configured_message() {
        let msg = state_message(AppState::Victory, "Winners!");
        assert_eq!(msg.as_deref(), Some("Winners!"));
        assert_eq!(state_message(AppState::Configuration, "x"), None);
    }
}
