//! Search tuning knobs.
//!
//! Defaults suit interactive play. `from_env` lets the self-play binary and
//! benches override them without code changes.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Budget used when a caller gives no explicit timeout.
    pub default_timeout_ms: u64,
    /// Iterative deepening never searches past this depth.
    pub max_depth: u8,
    /// Capture-only plies searched past the nominal horizon.
    pub quiescence_plies: u8,
    /// Transposition table slots.
    pub tt_capacity: usize,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Overlay values from `lookup` onto the defaults, ignoring anything
    /// that does not parse.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        EngineConfig {
            default_timeout_ms: lookup("CHESS_ENGINE_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_timeout_ms),
            max_depth: lookup("CHESS_ENGINE_MAX_DEPTH")
                .and_then(|v| v.parse().ok())
                .filter(|&depth| depth > 0)
                .unwrap_or(defaults.max_depth),
            quiescence_plies: lookup("CHESS_ENGINE_QUIESCENCE_PLIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.quiescence_plies),
            tt_capacity: lookup("CHESS_ENGINE_TT_CAPACITY")
                .and_then(|v| v.parse().ok())
                .filter(|&capacity| capacity > 0)
                .unwrap_or(defaults.tt_capacity),
        }
    }

    #[inline]
    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            default_timeout_ms: 500,
            max_depth: 32,
            quiescence_plies: 2,
            tt_capacity: 1 << 16,
        }
    }
}
