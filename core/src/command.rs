//! Operator commands and their per-state enablement.
//!
//! One enum plus one predicate stands in for a per-button command object
//! hierarchy: the UI binds each button to a variant and greys it out when
//! `enabled_in` says no.

use crate::state::AppState;
use serde::{Deserialize, Serialize};

/// Every command an operator can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorCommand {
    StartSettings,
    SkipSettings,
    StartPlay,
    Cancel,
    DeclareVictory,
    BackToTeamSelect,
    OpenConfiguration,
    CloseConfiguration,
    SaveAndCloseConfiguration,
}

impl OperatorCommand {
    /// Whether this command may be issued in the given state. The
    /// controller also checks this, so a stale UI cannot force an
    /// illegal transition.
    pub fn enabled_in(self, state: AppState) -> bool {
        use AppState::*;
        match self {
            Self::StartSettings | Self::SkipSettings => state == TeamSelect,
            Self::StartPlay => state == PlayPreparing,
            Self::Cancel => {
                matches!(state, SettingsReady | SettingsTime | PlayReady | PlayTime)
            }
            Self::DeclareVictory => state == PlayTime,
            Self::BackToTeamSelect => matches!(state, PlayPreparing | Victory | GameSet),
            Self::OpenConfiguration => state != Configuration,
            Self::CloseConfiguration | Self::SaveAndCloseConfiguration => {
                state == Configuration
            }
        }
    }
}
