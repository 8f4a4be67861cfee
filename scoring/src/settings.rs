//! Engine settings.
//!
//! Process-level knobs read once from [`common::config::AppConfig`] and then passed by value into a
//! [`crate::ScoringEngine`]. Scoring itself never touches global state.

use common::config::AppConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TIE_TOLERANCE: f64 = common::config::DEFAULT_TIE_TOLERANCE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Two dimension scores closer than this are treated as tied.
    #[serde(default = "default_tie_tolerance")]
    pub tie_tolerance: f64,

    /// Seed for the `random` vote tie-breaker. `None` seeds from entropy on every call.
    #[serde(default)]
    pub vote_seed: Option<u64>,
}

fn default_tie_tolerance() -> f64 {
    DEFAULT_TIE_TOLERANCE
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tie_tolerance: default_tie_tolerance(),
            vote_seed: None,
        }
    }
}

impl EngineSettings {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::default()
            .with_tie_tolerance(config.tie_tolerance)
            .with_vote_seed(config.vote_seed)
    }

    /// Settings from the global application configuration.
    pub fn from_env() -> Self {
        Self::from_app_config(&AppConfig::global())
    }

    /// Negative or non-finite tolerances fall back to the default.
    pub fn with_tie_tolerance(mut self, tolerance: f64) -> Self {
        self.tie_tolerance = if tolerance.is_finite() && tolerance >= 0.0 {
            tolerance
        } else {
            DEFAULT_TIE_TOLERANCE
        };
        self
    }

    pub fn with_vote_seed(mut self, seed: Option<u64>) -> Self {
        self.vote_seed = seed;
        self
    }
}
