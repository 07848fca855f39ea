//! Competition-timer core for a two-team robotics match.
//!
//! The crate tracks a sequence of timed phases (setting countdown, match
//! countdown, and their ready counters) and fires discrete events — sound
//! cues, display recolors, phase transitions — at precise offsets from
//! each phase start. An external driver polls `MatchController::tick` on
//! a fixed cadence (30 ms in the reference deployment); everything else
//! the core reports back as `MatchEvent` values for the embedding
//! application to act on.
//!
//! RULES:
//!   - `tick()` never blocks and performs no I/O.
//!   - Each scheduled event fires at most once per phase run, ascending.
//!   - All state lives in `MatchController`; single-threaded by design.

pub mod clock;
pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod event;
pub mod schedule;
pub mod scheduler;
pub mod state;
pub mod types;
