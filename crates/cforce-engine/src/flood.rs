//! Flood loop bookkeeping.
//!
//! The flood is text only. Each tick produces pseudo-random "thread" log
//! lines from the injected RNG; nothing is sent anywhere.

use std::time::Duration;

use cforce_models::{Line, LineKind};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Requests added to the counter every tick.
pub const REQUESTS_PER_TICK: u64 = 15;

/// A stats line is emitted whenever the counter is a multiple of this.
pub const STATS_EVERY: u64 = 50;

/// Highest simulated thread id.
const MAX_THREAD: u32 = 1000;

/// Kinds a tick line is drawn from.
const TICK_KINDS: [LineKind; 5] = [
    LineKind::Error,
    LineKind::Success,
    LineKind::Warning,
    LineKind::System,
    LineKind::Plain,
];

/// Number of message templates.
const TEMPLATE_COUNT: usize = 4;

fn message(template: usize, count: u64) -> String {
    match template {
        0 => format!("VIP Method #{} | Status: 200 | Proxy: True", count),
        1 => format!("TLS HELLO Flood #{} | Handshakes: 500", count),
        2 => format!("VIP Method #{} | Connections: 10", count),
        _ => format!("VIP-TLS Combo #{} | Attacks: 2", count),
    }
}

/// How the flood loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloodEnd {
    /// The self-cancel deadline passed.
    Elapsed,
    /// Stopped explicitly.
    Cancelled,
}

/// Counters for a running flood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloodProgress {
    /// Normalized target host.
    pub target: String,
    /// Simulated request counter.
    pub requests: u64,
    /// Ticks emitted so far.
    pub ticks: u64,
    /// Authored tick interval.
    pub tick: Duration,
    /// Authored self-cancel duration.
    pub duration: Duration,
}

impl FloodProgress {
    pub fn new(target: impl Into<String>, tick: Duration, duration: Duration) -> Self {
        Self {
            target: target.into(),
            requests: 0,
            ticks: 0,
            tick,
            duration,
        }
    }

    /// Simulated time spent in the loop.
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.tick.as_millis() as u64 * self.ticks)
    }

    /// Advances one tick and returns the lines it emits.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Line> {
        self.ticks += 1;
        self.requests += REQUESTS_PER_TICK;

        let thread = rng.gen_range(1..=MAX_THREAD);
        let template = rng.gen_range(0..TEMPLATE_COUNT);
        let kind = TICK_KINDS[rng.gen_range(0..TICK_KINDS.len())];

        let mut lines = vec![Line::new(
            format!("[Thread {}] {}", thread, message(template, self.requests)),
            kind,
        )];

        if self.requests % STATS_EVERY == 0 {
            let secs = self.elapsed().as_secs();
            let rate = self.requests / secs.max(1);
            lines.push(Line::system(format!(
                "[*] Time: {}s | Attacks: {} | Rate: {}/s",
                secs, self.requests, rate
            )));
        }

        lines
    }

    /// Summary emitted when the deadline passes.
    pub fn completed(&self) -> Vec<Line> {
        let secs = self.duration.as_secs_f64();
        let power = if secs > 0.0 {
            self.requests as f64 / secs
        } else {
            self.requests as f64
        };

        vec![
            Line::success("[+] Attack duration completed. Stopping threads..."),
            Line::success(format!(
                "[+] SUPER Attack finished. Total requests: {}",
                self.requests
            )),
            Line::success(format!("[+] Attack power: {:.2} requests/second", power)),
            Line::warning("=".repeat(60)),
        ]
    }

    /// Notice emitted when stopped explicitly.
    pub fn stopped(&self) -> Vec<Line> {
        vec![Line::warning(format!(
            "[+] Attack stopped by user. Total requests: {}",
            self.requests
        ))]
    }

    /// Lines for the given ending.
    pub fn finish(&self, end: FloodEnd) -> Vec<Line> {
        match end {
            FloodEnd::Elapsed => self.completed(),
            FloodEnd::Cancelled => self.stopped(),
        }
    }
}
