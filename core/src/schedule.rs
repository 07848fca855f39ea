//! Per-phase event schedules.
//!
//! Built exactly once when the settings are known, read-only afterwards.
//! Each phase maps to an ascending list of (offset, actions) pairs; actions
//! registered at the same offset are merged in registration order, never
//! overwritten.
//!
//! Offset policy (applied here and nowhere else): a cue lead time longer
//! than its phase clamps the offset to zero, so the cue still fires at
//! phase start; an auto-launch limit beyond the play time clamps to the
//! play time; a zero limit omits the event entirely.

use crate::config::MatchSettings;
use crate::types::{PhaseKind, SoundCue};
use std::collections::HashMap;
use std::time::Duration;

/// Lead time of the "3, 2, 1" cue before a ready counter ends.
pub const READY_CUE_LEAD: Duration = Duration::from_secs(3);
/// Lead time of the last-ten-seconds notification.
pub const LAST_TEN_LEAD: Duration = Duration::from_secs(10);
/// Lead time of the last-three-seconds cue.
pub const LAST_THREE_LEAD: Duration = Duration::from_secs(3);

/// What a scheduled event asks the controller to do. These are the named
/// callback slots of the schedule, kept as data so the scheduler itself
/// performs no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleAction {
    /// Ask the audio collaborator for a cue.
    Cue(SoundCue),
    /// Ten seconds left in the current countdown.
    LastTenSeconds,
    /// The automatic machine launch window just closed.
    AutoLaunchOver,
    /// Terminal event of the phase: the state machine takes over.
    PhaseComplete,
}

/// One entry in a phase schedule. `actions` fire in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub fires_at: Duration,
    pub actions: Vec<ScheduleAction>,
}

/// PhaseKind -> ascending event list.
#[derive(Debug, Clone)]
pub struct EventSchedule {
    phases: HashMap<PhaseKind, Vec<ScheduledEvent>>,
}

impl EventSchedule {
    pub fn build(settings: &MatchSettings) -> Self {
        let mut phases = HashMap::new();

        // Both ready counters share the same shape: a ready cue three
        // seconds out, then the handoff to the next phase with its start
        // cue. PhaseComplete is registered before the cue so the state
        // transition precedes the sound.
        for kind in [PhaseKind::SettingsReady, PhaseKind::PlayReady] {
            let mut ready = PhaseBuilder::default();
            ready.at(
                settings.ready_time.saturating_sub(READY_CUE_LEAD),
                ScheduleAction::Cue(SoundCue::Ready),
            );
            ready.at(settings.ready_time, ScheduleAction::PhaseComplete);
            ready.at(settings.ready_time, ScheduleAction::Cue(SoundCue::Start));
            phases.insert(kind, ready.finish());
        }

        let mut setting = PhaseBuilder::default();
        setting.at(
            settings.settings_time.saturating_sub(LAST_TEN_LEAD),
            ScheduleAction::LastTenSeconds,
        );
        setting.at(
            settings.settings_time.saturating_sub(LAST_THREE_LEAD),
            ScheduleAction::Cue(SoundCue::LastThree),
        );
        setting.at(settings.settings_time, ScheduleAction::PhaseComplete);
        setting.at(settings.settings_time, ScheduleAction::Cue(SoundCue::Finish));
        phases.insert(PhaseKind::Settings, setting.finish());

        let mut play = PhaseBuilder::default();
        if settings.auto_launch_limit > Duration::ZERO {
            play.at(
                settings.auto_launch_limit.min(settings.play_time),
                ScheduleAction::AutoLaunchOver,
            );
        }
        play.at(
            settings.play_time.saturating_sub(LAST_TEN_LEAD),
            ScheduleAction::LastTenSeconds,
        );
        play.at(
            settings.play_time.saturating_sub(LAST_THREE_LEAD),
            ScheduleAction::Cue(SoundCue::LastThree),
        );
        play.at(settings.play_time, ScheduleAction::PhaseComplete);
        play.at(settings.play_time, ScheduleAction::Cue(SoundCue::Finish));
        phases.insert(PhaseKind::Play, play.finish());

        Self { phases }
    }

    /// Ascending events for one phase kind.
    pub fn events_for(&self, kind: PhaseKind) -> &[ScheduledEvent] {
        self.phases.get(&kind).map_or(&[], Vec::as_slice)
    }
}

/// Collects (offset, action) registrations for one phase, merging actions
/// that share an offset.
#[derive(Debug, Default)]
struct PhaseBuilder {
    events: Vec<ScheduledEvent>,
}

impl PhaseBuilder {
    fn at(&mut self, fires_at: Duration, action: ScheduleAction) {
        match self.events.iter_mut().find(|e| e.fires_at == fires_at) {
            Some(event) => event.actions.push(action),
            None => self.events.push(ScheduledEvent {
                fires_at,
                actions: vec![action],
            }),
        }
    }

    fn finish(mut self) -> Vec<ScheduledEvent> {
        // Stable sort: offsets are unique after merging, but keep
        // registration order as the tiebreak anyway.
        self.events.sort_by_key(|e| e.fires_at);
        self.events
    }
}
