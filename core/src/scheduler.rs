//! The polling scheduler: one active phase, a pending queue, a stopwatch.
//!
//! RULES:
//!   - At most one phase runs at a time; starting a phase stops the last.
//!   - The pending queue is rebuilt fresh at phase start and discarded at
//!     phase stop; it is never shared across runs.
//!   - `tick()` never blocks and performs no I/O. It only reports which
//!     actions came due; side effects belong to the caller.
//!   - An event is dequeued in full before it is reported, so a consumer
//!     that panics mid-dispatch can never see it a second time.

use crate::clock::{Stopwatch, TimeSource};
use crate::schedule::{EventSchedule, ScheduleAction, ScheduledEvent};
use crate::types::PhaseKind;
use std::collections::VecDeque;
use std::time::Duration;

/// One action that came due, tagged with the offset it was scheduled at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredEvent {
    pub offset: Duration,
    pub action: ScheduleAction,
}

pub struct PhaseScheduler {
    schedule: EventSchedule,
    stopwatch: Stopwatch,
    pending: VecDeque<ScheduledEvent>,
    active: Option<PhaseKind>,
}

impl PhaseScheduler {
    pub fn new(schedule: EventSchedule, source: Box<dyn TimeSource>) -> Self {
        Self {
            schedule,
            stopwatch: Stopwatch::new(source),
            pending: VecDeque::new(),
            active: None,
        }
    }

    /// Begin a phase run: fresh queue, stopwatch restarted from zero.
    /// Any phase still running is implicitly stopped first.
    pub fn start_phase(&mut self, kind: PhaseKind) {
        self.pending = self.schedule.events_for(kind).iter().cloned().collect();
        self.active = Some(kind);
        self.stopwatch.start();
        log::debug!("phase {kind:?} started, {} events queued", self.pending.len());
    }

    /// Stop the clock and discard whatever is still queued. Idempotent.
    pub fn stop_phase(&mut self) {
        if let Some(kind) = self.active.take() {
            log::debug!(
                "phase {kind:?} stopped, {} events discarded",
                self.pending.len()
            );
        }
        self.stopwatch.stop();
        self.pending.clear();
    }

    /// One polling step. Pops and reports every event whose offset is
    /// `<=` the current elapsed reading, in ascending order — a lagged
    /// poll fires all overdue events in a single call. A no-op when no
    /// phase is active.
    pub fn tick(&mut self) -> Vec<FiredEvent> {
        let mut fired = Vec::new();
        if self.active.is_none() {
            return fired;
        }
        let elapsed = self.stopwatch.elapsed();
        loop {
            match self.pending.front() {
                Some(event) if event.fires_at <= elapsed => {}
                _ => break,
            }
            if let Some(event) = self.pending.pop_front() {
                let offset = event.fires_at;
                fired.extend(
                    event
                        .actions
                        .into_iter()
                        .map(|action| FiredEvent { offset, action }),
                );
            }
        }
        fired
    }

    /// The phase currently running, if any.
    pub fn active_phase(&self) -> Option<PhaseKind> {
        self.active
    }

    /// Elapsed time in the current phase run; zero when idle.
    pub fn elapsed(&self) -> Duration {
        self.stopwatch.elapsed()
    }

    /// True once the queue has drained (or nothing ever ran). The phase's
    /// own terminal event is responsible for calling `stop_phase`.
    pub fn is_drained(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualSource;
    use crate::config::MatchSettings;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn scheduler() -> (PhaseScheduler, ManualSource) {
        let source = ManualSource::new();
        let schedule = EventSchedule::build(&MatchSettings::default());
        (
            PhaseScheduler::new(schedule, Box::new(source.clone())),
            source,
        )
    }

    #[test]
    fn tick_before_start_fires_nothing() {
        let (mut sched, source) = scheduler();
        source.advance(secs(120));
        assert!(sched.tick().is_empty());
    }

    #[test]
    fn starting_a_phase_replaces_the_previous_run() {
        let (mut sched, source) = scheduler();
        sched.start_phase(PhaseKind::Settings);
        source.advance(secs(55));
        assert!(!sched.tick().is_empty()); // last-ten already due

        sched.start_phase(PhaseKind::Settings);
        // elapsed reset: nothing due again yet
        assert!(sched.tick().is_empty());
        assert_eq!(sched.elapsed(), Duration::ZERO);
    }

    #[test]
    fn stop_discards_pending_events() {
        let (mut sched, source) = scheduler();
        sched.start_phase(PhaseKind::Play);
        sched.stop_phase();
        source.advance(secs(600));
        assert!(sched.tick().is_empty());
        assert!(sched.is_drained());
        assert_eq!(sched.active_phase(), None);
    }
}
