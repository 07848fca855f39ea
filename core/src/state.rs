//! The match state machine.
//!
//! Nine states, one current at any instant, owned here and mutated only
//! through `handle`, `confirm` and `tick`. Commands that need operator
//! assent never transition directly: `handle` emits a
//! `ConfirmationRequested` carrying a `ResumeAction`, and the transition
//! happens only when the embedder feeds that token back to `confirm`.

use crate::clock::TimeSource;
use crate::command::OperatorCommand;
use crate::config::MatchSettings;
use crate::display::{self, DisplayView};
use crate::event::{MatchEvent, ResumeAction};
use crate::schedule::{EventSchedule, ScheduleAction};
use crate::scheduler::PhaseScheduler;
use crate::types::{MessageColor, PhaseKind, SoundCue, TimerColor};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application state. Initial: `TeamSelect`. There is no terminal state;
/// the machine cycles for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppState {
    TeamSelect,
    SettingsReady,
    SettingsTime,
    PlayPreparing,
    PlayReady,
    PlayTime,
    Victory,
    GameSet,
    Configuration,
}

pub struct MatchController {
    state: AppState,
    settings: MatchSettings,
    scheduler: PhaseScheduler,
    message_color: MessageColor,
    timer_color: TimerColor,
}

impl MatchController {
    pub fn new(settings: MatchSettings, source: Box<dyn TimeSource>) -> Self {
        let schedule = EventSchedule::build(&settings);
        Self {
            state: AppState::TeamSelect,
            scheduler: PhaseScheduler::new(schedule, source),
            settings,
            message_color: MessageColor::Yellow,
            timer_color: TimerColor::White,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    /// Current frame for the display collaborator. Remaining time is a
    /// pure function of state and the scheduler's elapsed reading.
    pub fn display(&self) -> DisplayView {
        DisplayView {
            message: display::state_message(self.state, &self.settings.victory_message),
            message_color: self.message_color,
            timer_color: self.timer_color,
            remaining: display::remaining_time(self.state, &self.settings, self.scheduler.elapsed()),
        }
    }

    /// Handle an operator command. Commands not enabled in the current
    /// state are ignored — the enablement predicate is the contract.
    pub fn handle(&mut self, command: OperatorCommand) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        if !command.enabled_in(self.state) {
            log::debug!("{command:?} ignored in {:?}", self.state);
            return events;
        }
        match command {
            OperatorCommand::StartSettings => {
                self.transition(AppState::SettingsReady, &mut events);
                self.scheduler.start_phase(PhaseKind::SettingsReady);
            }
            OperatorCommand::SkipSettings => confirm_request(
                &mut events,
                "Skip the setting time and move on to match preparation?",
                ResumeAction::SkipSettings,
            ),
            OperatorCommand::StartPlay => {
                self.transition(AppState::PlayReady, &mut events);
                self.scheduler.start_phase(PhaseKind::PlayReady);
            }
            OperatorCommand::Cancel => {
                let message = match self.state {
                    AppState::SettingsReady | AppState::SettingsTime => {
                        "Abort the setting time and return to team select?"
                    }
                    _ => "Abort the match?",
                };
                confirm_request(&mut events, message, ResumeAction::CancelOperation);
            }
            OperatorCommand::DeclareVictory => confirm_request(
                &mut events,
                "Finish the match now?",
                ResumeAction::DeclareVictory,
            ),
            OperatorCommand::BackToTeamSelect => {
                // Leaving an unfinished preparation loses the setting
                // result, so that path alone asks first.
                if self.state == AppState::PlayPreparing {
                    confirm_request(
                        &mut events,
                        "Return to team select?",
                        ResumeAction::BackToTeamSelect,
                    );
                } else {
                    self.back_to_team_select(&mut events);
                }
            }
            OperatorCommand::OpenConfiguration => {
                self.transition(AppState::Configuration, &mut events);
            }
            OperatorCommand::CloseConfiguration => {
                self.close_configuration(&mut events);
            }
            OperatorCommand::SaveAndCloseConfiguration => confirm_request(
                &mut events,
                "Save the team name list and close the configuration screen?",
                ResumeAction::SaveAndCloseConfiguration,
            ),
        }
        events
    }

    /// Second half of the confirmation protocol. A token whose
    /// originating state is gone (the schedule moved on while the dialog
    /// was open) is dropped without effect.
    pub fn confirm(&mut self, resume: ResumeAction) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        match (resume, self.state) {
            (ResumeAction::SkipSettings, AppState::TeamSelect) => {
                self.transition(AppState::PlayPreparing, &mut events);
                self.set_message_color(MessageColor::Lime, &mut events);
            }
            (
                ResumeAction::CancelOperation,
                AppState::SettingsReady | AppState::SettingsTime,
            ) => {
                self.abort_phase(&mut events);
                self.transition(AppState::TeamSelect, &mut events);
                self.set_message_color(MessageColor::Yellow, &mut events);
            }
            (ResumeAction::CancelOperation, AppState::PlayReady | AppState::PlayTime) => {
                self.abort_phase(&mut events);
                self.transition(AppState::PlayPreparing, &mut events);
            }
            (ResumeAction::DeclareVictory, AppState::PlayTime) => {
                self.abort_phase(&mut events);
                self.transition(AppState::Victory, &mut events);
            }
            (
                ResumeAction::BackToTeamSelect,
                AppState::PlayPreparing | AppState::Victory | AppState::GameSet,
            ) => {
                self.back_to_team_select(&mut events);
            }
            (ResumeAction::SaveAndCloseConfiguration, AppState::Configuration) => {
                self.close_configuration(&mut events);
            }
            (resume, state) => {
                log::warn!("stale confirmation {resume:?} in {state:?} dropped");
            }
        }
        events
    }

    /// One polling step: drain the scheduler and fold the fired actions
    /// into cues, recolors and state transitions. Never blocks.
    ///
    /// The configuration screen suspends normal flow: no cue or
    /// transition is dispatched while it is open. The only way out is
    /// `close_configuration`, which aborts whatever phase was left
    /// underneath, so suspended events are discarded, never replayed.
    pub fn tick(&mut self) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        if self.state == AppState::Configuration {
            return events;
        }
        for fired in self.scheduler.tick() {
            match fired.action {
                ScheduleAction::Cue(cue) => events.push(MatchEvent::CueRequested { cue }),
                ScheduleAction::LastTenSeconds => {
                    self.set_timer_color(TimerColor::HotPink, &mut events);
                }
                ScheduleAction::AutoLaunchOver => {
                    self.set_timer_color(TimerColor::White, &mut events);
                }
                ScheduleAction::PhaseComplete => self.complete_phase(&mut events),
            }
        }
        events
    }

    /// Remaining time in the active countdown; used by embedders that
    /// poll the value directly instead of going through `display()`.
    pub fn remaining(&self) -> Duration {
        display::remaining_time(self.state, &self.settings, self.scheduler.elapsed())
    }

    pub fn phase_idle(&self) -> bool {
        self.scheduler.active_phase().is_none()
    }

    /// Terminal schedule event of the running phase. Which transition it
    /// drives depends on where the machine currently is.
    fn complete_phase(&mut self, events: &mut Vec<MatchEvent>) {
        match self.state {
            AppState::SettingsReady => {
                self.transition(AppState::SettingsTime, events);
                self.scheduler.start_phase(PhaseKind::Settings);
            }
            AppState::SettingsTime => {
                self.scheduler.stop_phase();
                self.transition(AppState::PlayPreparing, events);
                self.set_message_color(MessageColor::Lime, events);
                self.set_timer_color(TimerColor::White, events);
            }
            AppState::PlayReady => {
                self.transition(AppState::PlayTime, events);
                self.scheduler.start_phase(PhaseKind::Play);
                // aqua marks the open launch window; plain white when
                // the limit is disabled
                let color = if self.settings.auto_launch_limit > Duration::ZERO {
                    TimerColor::Aqua
                } else {
                    TimerColor::White
                };
                self.set_timer_color(color, events);
            }
            AppState::PlayTime => {
                self.scheduler.stop_phase();
                self.transition(AppState::GameSet, events);
                self.set_timer_color(TimerColor::White, events);
            }
            state => log::warn!("phase completion fired in {state:?}, ignored"),
        }
    }

    /// Operator-driven abort of whatever phase is running: silence the
    /// audio, stop the clock, restore the timer color.
    fn abort_phase(&mut self, events: &mut Vec<MatchEvent>) {
        self.scheduler.stop_phase();
        events.push(MatchEvent::CueRequested {
            cue: SoundCue::Stop,
        });
        self.set_timer_color(TimerColor::White, events);
    }

    fn back_to_team_select(&mut self, events: &mut Vec<MatchEvent>) {
        self.transition(AppState::TeamSelect, events);
        self.set_message_color(MessageColor::Yellow, events);
        self.set_timer_color(TimerColor::White, events);
    }

    /// Closing the configuration screen always lands on team select; a
    /// phase left running underneath is stopped so team select is quiet.
    fn close_configuration(&mut self, events: &mut Vec<MatchEvent>) {
        if self.scheduler.active_phase().is_some() {
            self.abort_phase(events);
        }
        self.back_to_team_select(events);
    }

    fn transition(&mut self, to: AppState, events: &mut Vec<MatchEvent>) {
        let from = std::mem::replace(&mut self.state, to);
        log::info!("state {from:?} -> {to:?}");
        events.push(MatchEvent::StateChanged { from, to });
    }

    fn set_message_color(&mut self, color: MessageColor, events: &mut Vec<MatchEvent>) {
        if self.message_color != color {
            self.message_color = color;
            events.push(MatchEvent::MessageColorChanged { color });
        }
    }

    fn set_timer_color(&mut self, color: TimerColor, events: &mut Vec<MatchEvent>) {
        if self.timer_color != color {
            self.timer_color = color;
            events.push(MatchEvent::TimerColorChanged { color });
        }
    }
}

fn confirm_request(events: &mut Vec<MatchEvent>, message: &str, resume: ResumeAction) {
    events.push(MatchEvent::ConfirmationRequested {
        message: message.to_string(),
        resume,
    });
}
