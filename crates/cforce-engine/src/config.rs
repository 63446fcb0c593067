//! Engine configuration.

use std::time::Duration;

/// Default listener address shown in exploit output.
pub const DEFAULT_LHOST: &str = "10.0.0.5";

/// Configuration for a terminal session.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Multiplier applied to every authored delay. `1.0` plays sequences at
    /// their authored speed, `0.0` plays them instantly.
    pub pace: f64,
    /// Emission interval of the flood loop.
    pub flood_tick: Duration,
    /// Total flood time before it cancels itself.
    pub flood_duration: Duration,
    /// Seed for jitter and flood log content. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Listener address used by the exploit module.
    pub lhost: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pace: 1.0,
            flood_tick: Duration::from_millis(60),
            flood_duration: Duration::from_secs(6),
            seed: None,
            lhost: DEFAULT_LHOST.to_string(),
        }
    }
}

impl EngineConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the delay multiplier.
    pub fn with_pace(mut self, pace: f64) -> Self {
        self.pace = pace;
        self
    }

    /// Sets the flood tick interval.
    pub fn with_flood_tick(mut self, tick: Duration) -> Self {
        self.flood_tick = tick;
        self
    }

    /// Sets the flood self-cancel duration.
    pub fn with_flood_duration(mut self, duration: Duration) -> Self {
        self.flood_duration = duration;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the listener address.
    pub fn with_lhost(mut self, lhost: impl Into<String>) -> Self {
        self.lhost = lhost.into();
        self
    }

    /// Applies the pace multiplier to an authored delay.
    pub fn scaled(&self, delay: Duration) -> Duration {
        if !self.pace.is_finite() || self.pace <= 0.0 {
            return Duration::ZERO;
        }
        delay.mul_f64(self.pace)
    }
}
