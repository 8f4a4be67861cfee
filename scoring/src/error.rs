//! Scoring Error Types
//!
//! Nothing in the engine is fatal, so these errors never escape [`crate::ScoringEngine::score`].
//! They describe why a collaborator call or a configuration payload could not be used, and the
//! engine turns each of them into a fallback plus a [`crate::report::ScoringWarning`].

/// Failure reported by an [`crate::traits::provider::OptionIndexProvider`] or
/// [`crate::traits::provider::ResultLookupProvider`] implementation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage query failed: {0}")]
    Query(String),
}

/// Reasons a `scoring_config` payload could not be turned into a typed configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigIssue {
    #[error("no scoring configuration supplied")]
    Missing,
    #[error("scoring configuration is not valid JSON: {0}")]
    Malformed(String),
    #[error("scoring configuration is not a JSON object")]
    NotAnObject,
    #[error("dimensions list is missing or empty")]
    IncompleteDimensions,
}
