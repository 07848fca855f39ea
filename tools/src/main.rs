//! match-runner: headless driver for the timer core.
//!
//! Usage:
//!   match-runner --settings settings.json            # simulated clock
//!   match-runner --settings settings.json --realtime # real 30 ms polling
//!
//! Runs one full match from team select through game set, auto-assenting
//! to every confirmation, and logs each event the core emits. In the
//! default simulated mode a hand-advanced clock steps 30 ms per loop
//! iteration, so a three-minute match finishes instantly.

use anyhow::Result;
use rctimer_core::{
    clock::{ManualSource, SystemSource, TimeSource},
    command::OperatorCommand,
    config::MatchSettings,
    display::format_clock,
    event::MatchEvent,
    state::{AppState, MatchController},
};
use std::env;
use std::time::Duration;

const POLL_PERIOD: Duration = Duration::from_millis(30);

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let settings_path = args
        .windows(2)
        .find(|w| w[0] == "--settings")
        .map(|w| w[1].as_str())
        .unwrap_or(rctimer_core::config::SETTINGS_FILE);
    let realtime = args.iter().any(|a| a == "--realtime");

    let loaded = MatchSettings::load(settings_path);
    println!("match-runner");
    println!("  settings: {settings_path}");
    println!("  status:   {:?}", loaded.report.status);
    if !loaded.report.out_of_range.is_empty() {
        println!("  clamped:  {:?}", loaded.report.out_of_range);
    }
    println!("  ready {:?}, setting {:?}, play {:?}, launch {:?}",
        loaded.settings.ready_time,
        loaded.settings.settings_time,
        loaded.settings.play_time,
        loaded.settings.auto_launch_limit,
    );
    println!();

    // The simulated source is shared with the controller so the runner
    // can advance it; in realtime mode the controller owns its own
    // monotonic source and the runner just sleeps.
    let manual = ManualSource::new();
    let source: Box<dyn TimeSource> = if realtime {
        Box::new(SystemSource::new())
    } else {
        Box::new(manual.clone())
    };
    let mut controller = MatchController::new(loaded.settings, source);

    run_match(&mut controller, |state| {
        if realtime {
            std::thread::sleep(POLL_PERIOD);
        } else {
            manual.advance(POLL_PERIOD);
        }
        let view = state.display();
        log::debug!(
            "remaining {} in {:?}",
            format_clock(view.remaining),
            state.state()
        );
    })?;

    println!("match finished: {:?}", controller.state());
    Ok(())
}

/// Drive one scripted match to completion. `wait` is called once per
/// polling iteration and owns the pacing.
fn run_match(
    controller: &mut MatchController,
    mut wait: impl FnMut(&MatchController),
) -> Result<()> {
    report(controller.handle(OperatorCommand::StartSettings), controller);
    loop {
        wait(controller);
        let events = controller.tick();
        let assents = report(events, controller);
        for resume in assents {
            report(controller.confirm(resume), controller);
        }
        match controller.state() {
            AppState::PlayPreparing => {
                report(controller.handle(OperatorCommand::StartPlay), controller);
            }
            AppState::GameSet => return Ok(()),
            _ => {}
        }
    }
}

/// Print the event stream; collect confirmation tokens for auto-assent.
fn report(
    events: Vec<MatchEvent>,
    controller: &MatchController,
) -> Vec<rctimer_core::event::ResumeAction> {
    let mut assents = Vec::new();
    for event in &events {
        match serde_json::to_string(event) {
            Ok(json) => println!("[{}] {json}", format_clock(controller.display().remaining)),
            Err(e) => log::error!("event serialization failed: {e}"),
        }
        if let MatchEvent::ConfirmationRequested { resume, .. } = event {
            assents.push(*resume);
        }
    }
    assents
}
