//! Owned session: state, config and the seeded random source.

use std::collections::VecDeque;
use std::mem;

use cforce_models::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::config::EngineConfig;
use crate::flood::FloodEnd;
use crate::reduce::reduce;
use crate::script::{Cue, Effect, Script};
use crate::state::{Action, Event, SessionState};

/// A terminal session driven through [`reduce`].
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    config: EngineConfig,
    rng: StdRng,
}

impl Session {
    /// Creates a session showing the greeting banner.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_state(SessionState::new(), config)
    }

    /// Resumes from an existing state.
    pub fn with_state(state: SessionState, config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { state, config, rng }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn context(&self) -> Context {
        self.state.context
    }

    pub fn is_busy(&self) -> bool {
        self.state.busy
    }

    pub fn prompt_label(&self) -> String {
        self.state.prompt_label()
    }

    /// Applies an event and returns the script it started, if any.
    pub fn apply(&mut self, event: Event) -> Option<Script> {
        let state = mem::take(&mut self.state);
        let transition = reduce(state, event, &self.config, &mut self.rng);
        self.state = transition.state;
        transition.script
    }

    /// Submits a typed line.
    pub fn submit(&mut self, line: &str) -> Option<Script> {
        self.apply(Event::Submit(line.to_string()))
    }

    /// Runs a host action.
    pub fn launch(&mut self, action: Action) -> Option<Script> {
        self.apply(Event::Launch(action))
    }

    /// Empties the scrollback.
    pub fn clear(&mut self) {
        self.apply(Event::Clear);
    }

    /// Applies a single cue effect.
    pub fn apply_effect(&mut self, effect: Effect) -> Option<Script> {
        match effect {
            Effect::Emit(line) => self.apply(Event::Emit(line)),
            Effect::ClearScreen => self.apply(Event::Clear),
            Effect::Input(line) => self.apply(Event::Scripted(line)),
            Effect::OpenSession(id) => self.apply(Event::SessionOpened(id)),
        }
    }

    /// Plays a script to completion without waiting.
    ///
    /// Scripts started by replayed input are spliced in place; only the outer
    /// script's finish is applied. A flood is fast-forwarded to its
    /// self-cancel deadline.
    pub fn drain(&mut self, script: Script) {
        debug!(script = script.name(), "draining script");
        match script {
            Script::Sequence(seq) => {
                self.play_cues(seq.cues);
                self.apply(Event::Finish(seq.finish));
            }
            Script::Flood(plan) => {
                let ticks = plan.ticks();
                self.play_cues(plan.prelude.cues);
                for _ in 0..ticks {
                    self.apply(Event::FloodTick);
                }
                self.apply(Event::FloodEnd(FloodEnd::Elapsed));
            }
        }
    }

    /// Submits a line and plays whatever it starts.
    pub fn run(&mut self, line: &str) {
        if let Some(script) = self.submit(line) {
            self.drain(script);
        }
    }

    /// Launches an action and plays whatever it starts.
    pub fn run_action(&mut self, action: Action) {
        if let Some(script) = self.launch(action) {
            self.drain(script);
        }
    }

    fn play_cues(&mut self, cues: Vec<Cue>) {
        let mut queue: VecDeque<Cue> = cues.into();
        while let Some(cue) = queue.pop_front() {
            match self.apply_effect(cue.effect) {
                Some(Script::Sequence(nested)) => {
                    for cue in nested.cues.into_iter().rev() {
                        queue.push_front(cue);
                    }
                }
                Some(Script::Flood(_)) => debug!("nested flood ignored"),
                None => {}
            }
        }
    }
}
