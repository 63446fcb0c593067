//! Declarative scripted sequences.
//!
//! A scripted sequence is data: an ordered list of cues, each applied after a
//! delay relative to the previous cue, plus what happens when the last cue has
//! played. One generic player (the instant [`crate::Session::drain`] or the
//! timed player in `cforce-runtime`) interprets every sequence.

use std::time::Duration;

use cforce_models::Line;

/// What a cue does when it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a line to the scrollback.
    Emit(Line),
    /// Empty the scrollback.
    ClearScreen,
    /// Run an input line as if typed, bypassing the busy gate.
    Input(String),
    /// Record an interactive session as open.
    OpenSession(String),
}

/// A single timed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    /// Delay after the previous cue (or the sequence start).
    pub delay: Duration,
    pub effect: Effect,
}

/// Post-condition applied once a sequence has played through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    /// Clear `busy`.
    Idle,
    /// Clear `busy` and populate the findings list.
    Findings,
}

/// A finite scripted sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// Short name for logs.
    pub name: &'static str,
    pub cues: Vec<Cue>,
    pub finish: Finish,
}

impl Sequence {
    /// Total authored duration.
    pub fn duration(&self) -> Duration {
        self.cues.iter().map(|c| c.delay).sum()
    }
}

/// The flood: a finite prelude followed by an unbounded tick loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloodPlan {
    pub prelude: Sequence,
    /// Emission interval.
    pub tick: Duration,
    /// Self-cancel deadline, measured from the end of the prelude.
    pub duration: Duration,
}

impl FloodPlan {
    /// Number of ticks that fit in the self-cancel window.
    pub fn ticks(&self) -> u64 {
        let tick = self.tick.as_millis();
        if tick == 0 {
            return 0;
        }
        (self.duration.as_millis() / tick) as u64
    }
}

/// Work handed to a player after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Script {
    Sequence(Sequence),
    Flood(FloodPlan),
}

impl Script {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Script::Sequence(seq) => seq.name,
            Script::Flood(_) => "flood",
        }
    }
}

/// Builds a [`Sequence`] from authored pauses and lines.
#[derive(Debug)]
pub(crate) struct SequenceBuilder {
    name: &'static str,
    cues: Vec<Cue>,
    pending: Duration,
}

impl SequenceBuilder {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            cues: Vec::new(),
            pending: Duration::ZERO,
        }
    }

    /// Waits `ms` before the next cue.
    pub(crate) fn pause(mut self, ms: u64) -> Self {
        self.pending += Duration::from_millis(ms);
        self
    }

    pub(crate) fn effect(mut self, effect: Effect) -> Self {
        let delay = std::mem::take(&mut self.pending);
        self.cues.push(Cue { delay, effect });
        self
    }

    pub(crate) fn emit(self, line: Line) -> Self {
        self.effect(Effect::Emit(line))
    }

    pub(crate) fn input(self, line: impl Into<String>) -> Self {
        self.effect(Effect::Input(line.into()))
    }

    pub(crate) fn clear_screen(self) -> Self {
        self.effect(Effect::ClearScreen)
    }

    /// Finishes the sequence. A trailing pause with no cue after it is dropped.
    pub(crate) fn finish(self, finish: Finish) -> Sequence {
        Sequence {
            name: self.name,
            cues: self.cues,
            finish,
        }
    }
}
