//! # Scoring Library
//!
//! This crate computes the outcome of a multiple-choice quiz from a respondent's selections.
//! The scoring algorithm is chosen per test by its scoring mode and described by a JSON
//! configuration, so operators change how a quiz scores without touching code.
//!
//! ## Key Concepts
//! - **ScoringEngine**: Entry point for one scoring call; holds only process-level settings.
//! - **Strategies**: `simple`, `range`, `dimensions` and seven `custom` sub-strategies.
//! - **Providers**: Read-only collaborators supplying options, results and question order.
//! - **ScoreResult**: The full outcome of a call, including recoverable warnings.
//!
//! Scoring never fails. Malformed configuration, unresolvable answers and collaborator errors
//! all degrade to a simpler mode or a missing result, and are reported in
//! [`ScoreResult::warnings`] as well as logged through `tracing`.

pub mod answers;
pub mod config;
pub mod error;
pub mod keys;
pub mod memory;
pub mod option_index;
pub mod report;
pub mod resolver;
pub mod settings;
pub mod strategies;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_support;

use tracing::{debug, info_span};

use crate::option_index::OptionIndex;
use crate::report::WarningSink;
use crate::strategies::ScoringContext;

pub use crate::answers::AnswerSet;
pub use crate::config::ConfigPayload;
pub use crate::memory::InMemoryCatalog;
pub use crate::report::{ScoreDetail, ScoreResult, ScoringWarning};
pub use crate::settings::EngineSettings;
pub use crate::traits::provider::{OptionIndexProvider, ResultLookupProvider};
pub use crate::types::{OptionRow, ResultRecord, ScoringMode, Test};

/// Scores submissions against tests.
///
/// The engine is stateless apart from its [`EngineSettings`]; one instance may serve any number
/// of concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    settings: EngineSettings,
}

impl ScoringEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Score `answers` for `test`.
    ///
    /// # Arguments
    /// * `test` - The test being taken, with its mode and raw configuration.
    /// * `answers` - Normalized question -> option selections.
    /// * `options` - Supplies the options of the answered questions.
    /// * `results` - Supplies the test's results and question order.
    ///
    /// # Returns
    /// A fresh [`ScoreResult`]. An empty answer set yields [`ScoreResult::empty`] with an
    /// [`ScoringWarning::EmptyAnswers`] warning.
    pub fn score(
        &self,
        test: &Test,
        answers: &AnswerSet,
        options: &dyn OptionIndexProvider,
        results: &dyn ResultLookupProvider,
    ) -> ScoreResult {
        let span = info_span!("score", test_id = test.id, mode = test.scoring_mode.label());
        let _entered = span.enter();

        let mut warnings = WarningSink::new(test.id);
        if answers.is_empty() {
            warnings.push(ScoringWarning::EmptyAnswers);
            return ScoreResult::empty().with_warnings(warnings.into_inner());
        }

        let index = OptionIndex::load(options, answers).unwrap_or_else(|err| {
            warnings.push(ScoringWarning::OptionLookupFailed {
                message: err.to_string(),
            });
            OptionIndex::default()
        });
        let selections = index.select(answers, &mut warnings);

        let mut ctx = ScoringContext::new(test, selections, results, &self.settings, warnings);
        let outcome = strategies::dispatch(&mut ctx);
        let outcome = outcome.with_warnings(ctx.into_warnings());

        debug!(
            total_score = outcome.total_score,
            result = outcome.result_code().unwrap_or("-"),
            warnings = outcome.warnings.len(),
            "scoring complete"
        );
        outcome
    }
}

/// Score with default settings. See [`ScoringEngine::score`].
pub fn score(
    test: &Test,
    answers: &AnswerSet,
    options: &dyn OptionIndexProvider,
    results: &dyn ResultLookupProvider,
) -> ScoreResult {
    ScoringEngine::default().score(test, answers, options, results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;
    use crate::keys::QuestionPosition;
    use crate::report::LookupTier;
    use crate::test_support::{option, result};
    use crate::types::{QuestionId, TestId};
    use serde_json::json;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(1)
            .with_questions(vec![
                QuestionPosition::sorted_by(501, 3),
                QuestionPosition::sorted_by(502, 1),
                QuestionPosition::sorted_by(503, 2),
            ])
            .with_options(vec![
                option(1, 501, "A", 3),
                option(2, 501, "B", 1),
                option(3, 502, "A", 2),
                option(4, 502, "B", 5),
                option(5, 503, "A", 0),
            ])
            .with_results(vec![result(1, "Low", 0, 5), result(2, "High", 6, 10)])
    }

    struct BrokenOptions;

    impl OptionIndexProvider for BrokenOptions {
        fn options_for(&self, _: &[QuestionId]) -> Result<Vec<OptionRow>, LookupError> {
            Err(LookupError::Unavailable("database is locked".into()))
        }
    }

    /// Serves results normally but cannot report question order.
    struct UnorderedResults(InMemoryCatalog);

    impl ResultLookupProvider for UnorderedResults {
        fn find_by_score(
            &self,
            test_id: TestId,
            score: f64,
        ) -> Result<Option<ResultRecord>, LookupError> {
            self.0.find_by_score(test_id, score)
        }

        fn find_floor_by_score(
            &self,
            test_id: TestId,
            score: f64,
        ) -> Result<Option<ResultRecord>, LookupError> {
            self.0.find_floor_by_score(test_id, score)
        }

        fn find_by_code(
            &self,
            test_id: TestId,
            code: &str,
        ) -> Result<Option<ResultRecord>, LookupError> {
            self.0.find_by_code(test_id, code)
        }

        fn first_for_test(&self, test_id: TestId) -> Result<Option<ResultRecord>, LookupError> {
            self.0.first_for_test(test_id)
        }

        fn ordered_questions(&self, _: TestId) -> Result<Vec<QuestionId>, LookupError> {
            Err(LookupError::Unavailable("question table offline".into()))
        }
    }

    #[test]
    fn simple_total_resolves_high() {
        let catalog = catalog();
        let outcome = score(
            &Test::new(1, ScoringMode::Simple),
            &AnswerSet::from_pairs(vec![(501, 1), (502, 4)]),
            &catalog,
            &catalog,
        );
        assert_eq!(outcome.total_score, 8.0);
        assert_eq!(outcome.result_code(), Some("High"));
    }

    #[test]
    fn empty_answers_short_circuit() {
        let catalog = catalog();
        let outcome = score(
            &Test::new(1, ScoringMode::Dimensions),
            &AnswerSet::from_pairs(vec![(0, 4), (-2, 1)]),
            &catalog,
            &catalog,
        );
        assert_eq!(outcome.total_score, 0.0);
        assert!(outcome.dimension_scores.is_empty());
        assert!(outcome.result.is_none());
        assert_eq!(outcome.warnings, vec![ScoringWarning::EmptyAnswers]);
    }

    #[test]
    fn foreign_answers_are_dropped_with_warning() {
        let catalog = catalog();
        let outcome = score(
            &Test::new(1, ScoringMode::Simple),
            &AnswerSet::from_pairs(vec![(501, 1), (502, 1), (999, 4)]),
            &catalog,
            &catalog,
        );
        assert_eq!(outcome.total_score, 3.0);
        assert_eq!(outcome.warnings.len(), 2);
        assert!(outcome.warnings.contains(&ScoringWarning::UnresolvedAnswer {
            question_id: 502,
            option_id: 1
        }));
    }

    #[test]
    fn option_lookup_failure_still_yields_a_result() {
        let catalog = catalog();
        let outcome = ScoringEngine::default().score(
            &Test::new(1, ScoringMode::Simple),
            &AnswerSet::from_pairs(vec![(501, 1)]),
            &BrokenOptions,
            &catalog,
        );
        assert_eq!(outcome.total_score, 0.0);
        assert_eq!(outcome.result_code(), Some("Low"));
        assert!(matches!(
            outcome.warnings.first(),
            Some(ScoringWarning::OptionLookupFailed { .. })
        ));
    }

    #[test]
    fn q_keys_follow_declared_sort_order_not_ids() {
        let catalog = catalog().with_results(vec![
            result(1, "X", 0, 0),
            result(2, "Y", 0, 0),
            result(3, "Z", 0, 0),
        ]);
        let test = Test::new(1, ScoringMode::Dimensions).with_config(json!({
            "dimensions": ["X", "Y", "Z"],
            "weights": {
                "q1": { "B": { "X": 1 } },
                "q2": { "A": { "Y": 1 } },
                "q3": { "A": { "Z": 5 } }
            }
        }));
        // 502 sorts first (q1), 503 second (q2), 501 last (q3).
        let outcome = score(
            &test,
            &AnswerSet::from_pairs(vec![(502, 4), (503, 5)]),
            &catalog,
            &catalog,
        );
        assert_eq!(outcome.dimension_scores["X"], 1.0);
        assert_eq!(outcome.dimension_scores["Y"], 1.0);
        assert_eq!(outcome.dimension_scores["Z"], 0.0);
        assert_eq!(outcome.result_code(), Some("X"));
    }

    #[test]
    fn unavailable_question_order_zeroes_ordinal_dimensions() {
        let catalog = catalog().with_results(vec![result(1, "X", 0, 0), result(2, "Y", 0, 0)]);
        let results = UnorderedResults(catalog.clone());
        let test = Test::new(1, ScoringMode::Dimensions).with_config(json!({
            "dimensions": ["X", "Y"],
            "weights": { "q1": { "B": { "Y": 4 } } }
        }));

        let outcome = ScoringEngine::default().score(
            &test,
            &AnswerSet::from_pairs(vec![(502, 4)]),
            &catalog,
            &results,
        );

        assert_eq!(outcome.dimension_scores["X"], 0.0);
        assert_eq!(outcome.dimension_scores["Y"], 0.0);
        assert_eq!(outcome.result_code(), Some("X"));
        assert!(matches!(
            outcome.warnings.as_slice(),
            [
                ScoringWarning::LookupFailed {
                    tier: LookupTier::OrderedQuestions,
                    ..
                },
                ScoringWarning::OrdinalKeysUnavailable,
                ScoringWarning::DimensionTie { chosen, .. },
            ] if chosen == "X"
        ));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let catalog = catalog();
        let engine = ScoringEngine::new(EngineSettings::default());
        let test = Test::new(1, ScoringMode::Custom).with_config(
            r#"{"strategy": "multi_result", "dimensions": ["Low", "High"],
                "weights": {"q1": {"A": {"High": 2}}, "q3": {"A": {"Low": 1}}}}"#,
        );
        let answers = AnswerSet::from_pairs(vec![(502, 3), (501, 1)]);

        let first = engine.score(&test, &answers, &catalog, &catalog);
        let first_json = serde_json::to_string(&first).unwrap();
        for _ in 0..5 {
            let again = engine.score(&test, &answers, &catalog, &catalog);
            assert_eq!(again, first);
            assert_eq!(serde_json::to_string(&again).unwrap(), first_json);
        }
        assert_eq!(first.result_code(), Some("High"));
    }

    #[test]
    fn unknown_test_id_has_no_result() {
        let catalog = catalog();
        let other: TestId = 2;
        let outcome = score(
            &Test::new(other, ScoringMode::Simple),
            &AnswerSet::from_pairs(vec![(501, 1)]),
            &catalog,
            &catalog,
        );
        assert_eq!(outcome.total_score, 3.0);
        assert!(outcome.result.is_none());
    }
}
