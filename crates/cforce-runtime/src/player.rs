//! Real-time script player.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use cforce_engine::{Cue, Event, Finish, FloodEnd, FloodPlan, Script};
use cforce_models::Line;
use tokio::sync::watch;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use crate::terminal::Shared;

/// Shortest tick the flood loop will run at.
const MIN_TICK: Duration = Duration::from_millis(1);

enum Outcome {
    Completed,
    Cancelled,
}

/// Plays a script until it completes or `cancel` flips to true.
pub(crate) async fn play(shared: Arc<Shared>, script: Script, mut cancel: watch::Receiver<bool>) {
    let name = script.name();
    debug!(script = name, "playback started");

    match script {
        Script::Sequence(seq) => match play_cues(&shared, seq.cues, &mut cancel).await {
            Outcome::Completed => {
                shared.apply(Event::Finish(seq.finish)).await;
            }
            Outcome::Cancelled => {
                shared
                    .apply(Event::Emit(Line::warning("[!] Interrupted by user.")))
                    .await;
                shared.apply(Event::Finish(Finish::Idle)).await;
            }
        },
        Script::Flood(plan) => {
            let end = match play_cues(&shared, plan.prelude.cues.clone(), &mut cancel).await {
                Outcome::Completed => flood(&shared, &plan, &mut cancel).await,
                Outcome::Cancelled => FloodEnd::Cancelled,
            };
            shared.apply(Event::FloodEnd(end)).await;
        }
    }

    debug!(script = name, "playback finished");
}

/// Resolves once cancellation is requested or the terminal is gone.
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    let _ = cancel.wait_for(|stop| *stop).await;
}

/// Sleeps for `delay`. Returns false if cancelled first.
async fn pause(delay: Duration, cancel: &mut watch::Receiver<bool>) -> bool {
    if *cancel.borrow() {
        return false;
    }
    if delay.is_zero() {
        return true;
    }
    tokio::select! {
        _ = sleep(delay) => true,
        _ = cancelled(cancel) => false,
    }
}

async fn play_cues(
    shared: &Shared,
    cues: Vec<Cue>,
    cancel: &mut watch::Receiver<bool>,
) -> Outcome {
    let mut queue: VecDeque<Cue> = cues.into();

    while let Some(cue) = queue.pop_front() {
        if !pause(shared.config().scaled(cue.delay), cancel).await {
            return Outcome::Cancelled;
        }

        let effect = cue.effect;
        match shared.update(|s| s.apply_effect(effect)).await {
            Some(Script::Sequence(nested)) => {
                trace!(script = nested.name, "splicing nested sequence");
                for cue in nested.cues.into_iter().rev() {
                    queue.push_front(cue);
                }
            }
            Some(Script::Flood(_)) => debug!("nested flood ignored"),
            None => {}
        }
    }

    Outcome::Completed
}

/// Emits flood ticks until cancelled or the deadline passes.
async fn flood(shared: &Shared, plan: &FloodPlan, cancel: &mut watch::Receiver<bool>) -> FloodEnd {
    let config = shared.config();
    let tick = config.scaled(plan.tick).max(MIN_TICK);
    let deadline = sleep(config.scaled(plan.duration));
    tokio::pin!(deadline);

    let mut ticker = interval_at(Instant::now() + tick, tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    debug!(tick_ms = tick.as_millis() as u64, "flood loop started");
    let mut ticks: u64 = 0;

    let end = loop {
        tokio::select! {
            biased;
            _ = cancelled(cancel) => break FloodEnd::Cancelled,
            _ = ticker.tick() => {
                shared.apply(Event::FloodTick).await;
                ticks += 1;
            }
            _ = &mut deadline => break FloodEnd::Elapsed,
        }
    };

    debug!(ticks, ?end, "flood loop stopped");
    end
}
