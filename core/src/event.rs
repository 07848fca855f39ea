//! Everything the core reports outward.
//!
//! RULE: collaborators (audio, display, confirmation UI) are reached only
//! through these events. The core never holds a handle to a speaker or a
//! dialog; the embedding application consumes the event stream returned
//! by `MatchController::handle`, `confirm` and `tick`.

use crate::state::AppState;
use crate::types::{MessageColor, SoundCue, TimerColor};
use serde::{Deserialize, Serialize};

/// Resume token for the two-phase confirmation protocol. A command that
/// needs operator assent emits `ConfirmationRequested` carrying one of
/// these; the embedder passes it back to `MatchController::confirm` on
/// assent, or simply drops it on decline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeAction {
    SkipSettings,
    CancelOperation,
    DeclareVictory,
    BackToTeamSelect,
    SaveAndCloseConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    StateChanged {
        from: AppState,
        to: AppState,
    },
    /// Fire-and-forget request to the audio collaborator.
    CueRequested {
        cue: SoundCue,
    },
    MessageColorChanged {
        color: MessageColor,
    },
    TimerColorChanged {
        color: TimerColor,
    },
    /// First half of the confirmation protocol. State is unchanged until
    /// the embedder calls `confirm(resume)`.
    ConfirmationRequested {
        message: String,
        resume: ResumeAction,
    },
}
