use std::time::Duration;

use serde::Deserialize;

// ─── Tunables ────────────────────────────────────────────────────

/// Service tunables. Every field has a default matching the classic
/// deployment, so an empty config file (or none at all) is valid.
///
/// Loaded from a JSON file named by `ADPULSE_CONFIG`, defaults
/// otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Bind address for the HTTP listener.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Stats queries allowed per client per window.
    #[serde(default = "default_rate_limit")]
    pub rate_limit: u32,

    /// Admission window length (seconds).
    #[serde(default = "default_rate_period")]
    pub rate_period_secs: u64,

    /// Reset a stale window even before the budget is spent.
    /// Off by default: the historical limiter only checks elapsed
    /// time once the budget is exhausted.
    #[serde(default)]
    pub strict_window: bool,

    /// Drain-task wakeup period (seconds).
    #[serde(default = "default_aggregate_tick")]
    pub aggregate_tick_secs: u64,

    /// Bounded hand-off capacity between the view path and the drain
    /// task. 1 keeps the near-rendezvous backpressure of the classic
    /// design.
    #[serde(default = "default_handoff_capacity")]
    pub handoff_capacity: usize,

    /// Chance (0–100) that a served view also records a click.
    #[serde(default = "default_click_pct")]
    pub click_pct: u8,

    /// Chance (0–100) that simulated processing fails with a 400.
    #[serde(default)]
    pub failure_pct: u8,

    /// Upper bound for the simulated processing delay (ms).
    #[serde(default = "default_max_latency")]
    pub max_latency_ms: u64,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".into()
}
fn default_rate_limit() -> u32 {
    20
}
fn default_rate_period() -> u64 {
    60
}
fn default_aggregate_tick() -> u64 {
    5
}
fn default_handoff_capacity() -> usize {
    1
}
fn default_click_pct() -> u8 {
    50
}
fn default_max_latency() -> u64 {
    50
}

// ─── Loading ─────────────────────────────────────────────────────

impl Config {
    /// Read the file named by `ADPULSE_CONFIG`, or fall back to
    /// defaults when the variable is unset.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var("ADPULSE_CONFIG") {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path)
                    .map_err(|e| ConfigError::Io(path.clone(), e))?;
                serde_json::from_str(&raw).map_err(|e| ConfigError::Parse(path, e))
            }
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn rate_period(&self) -> Duration {
        Duration::from_secs(self.rate_period_secs)
    }

    pub fn aggregate_tick(&self) -> Duration {
        Duration::from_secs(self.aggregate_tick_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            rate_limit: default_rate_limit(),
            rate_period_secs: default_rate_period(),
            strict_window: false,
            aggregate_tick_secs: default_aggregate_tick(),
            handoff_capacity: default_handoff_capacity(),
            click_pct: default_click_pct(),
            failure_pct: 0,
            max_latency_ms: default_max_latency(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(String, std::io::Error),
    Parse(String, serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(path, e) => write!(f, "cannot read config '{path}': {e}"),
            Self::Parse(path, e) => write!(f, "cannot parse config '{path}': {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ─── Tests ───────────────────────────────────────────────────────
