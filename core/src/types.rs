//! Shared enums used across the timer core.

use serde::{Deserialize, Serialize};

/// One timed segment of a match. Determines which event schedule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    SettingsReady,
    Settings,
    PlayReady,
    Play,
}

/// Sound cues fired at scheduled offsets.
/// `Stop` silences whatever is currently playing (used on cancel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    Ready,
    Start,
    LastThree,
    Finish,
    Stop,
}

/// Banner message color on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageColor {
    Yellow,
    Lime,
}

/// Countdown digit color on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerColor {
    White,
    Aqua,
    HotPink,
}
