//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from `.env` and environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.
//!
//! Every value has a default, so loading never fails. Values that are present but cannot be
//! parsed fall back to their default as well.

use std::env;
use std::str::FromStr;
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard};

pub const DEFAULT_TIE_TOLERANCE: f64 = 0.001;

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// `EnvFilter` directives, e.g. `scoring=debug,db=info`.
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    /// SQLite file path, or a full `sqlite:` DSN.
    pub database_path: String,
    /// Dimension scores closer than this are treated as tied.
    pub tie_tolerance: f64,
    /// Fixed seed for the `random` vote tie-breaker. Unset means entropy.
    pub vote_seed: Option<u64>,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "scoring=info,db=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "scoring.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "data/quiz.db".into()),
            tie_tolerance: parsed_or("SCORING_TIE_TOLERANCE", DEFAULT_TIE_TOLERANCE),
            vote_seed: env::var("SCORING_VOTE_SEED")
                .ok()
                .and_then(|raw| raw.trim().parse().ok()),
        }
    }

    fn instance() -> &'static RwLock<AppConfig> {
        CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()))
    }

    /// Returns a shared reference to the global configuration.
    pub fn global() -> RwLockReadGuard<'static, AppConfig> {
        Self::instance()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock.write().unwrap_or_else(PoisonError::into_inner);
            *guard = AppConfig::from_env();
        }
    }

    /// Generic internal setter for any field in the config.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut guard = Self::instance()
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_log_file(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_file = value.into());
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_tie_tolerance(value: f64) {
        AppConfig::set_field(|cfg| cfg.tie_tolerance = value);
    }

    pub fn set_vote_seed(value: Option<u64>) {
        AppConfig::set_field(|cfg| cfg.vote_seed = value);
    }
}

// --- Free accessors ---

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path.clone()
}

pub fn tie_tolerance() -> f64 {
    AppConfig::global().tie_tolerance
}

pub fn vote_seed() -> Option<u64> {
    AppConfig::global().vote_seed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn setters_override_and_reset_restores() {
        let original = AppConfig::global().clone();

        AppConfig::set_database_path("sqlite::memory:");
        AppConfig::set_tie_tolerance(0.5);
        AppConfig::set_vote_seed(Some(9));
        assert_eq!(database_path(), "sqlite::memory:");
        assert_eq!(tie_tolerance(), 0.5);
        assert_eq!(vote_seed(), Some(9));

        AppConfig::reset();
        assert_eq!(*AppConfig::global(), original);
    }

    #[test]
    #[serial]
    fn logging_fields_are_overridable() {
        AppConfig::set_log_level("scoring=trace");
        AppConfig::set_log_to_stdout(true);
        assert_eq!(log_level(), "scoring=trace");
        assert!(log_to_stdout());
        AppConfig::reset();
    }

    #[test]
    fn unparsable_values_use_defaults() {
        assert_eq!(parsed_or("COMMON_TEST_UNSET_VARIABLE", 7u32), 7);
    }
}
