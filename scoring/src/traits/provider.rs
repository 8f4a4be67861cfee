//! Collaborator Traits
//!
//! The engine reads options and results through these traits and nothing else. Implementations
//! are expected to be cheap, synchronous lookups over data the caller already holds (see
//! [`crate::memory::InMemoryCatalog`]) or a thin wrapper over a storage round trip.
//!
//! Every method may fail with a [`LookupError`]; the engine logs the failure and treats it as
//! "nothing found" at that step, so later fallbacks still run.

use crate::error::LookupError;
use crate::types::{OptionRow, QuestionId, ResultRecord, TestId};

/// Supplies the options of a set of questions.
pub trait OptionIndexProvider: Send + Sync {
    /// All options of the given questions. Must only return options belonging to the test
    /// being scored.
    fn options_for(&self, question_ids: &[QuestionId]) -> Result<Vec<OptionRow>, LookupError>;
}

/// Supplies results (outcomes) and question order for a test.
pub trait ResultLookupProvider: Send + Sync {
    /// The earliest (lowest id) result whose `[min_score, max_score]` contains `score`.
    fn find_by_score(&self, test_id: TestId, score: f64)
        -> Result<Option<ResultRecord>, LookupError>;

    /// The result with the greatest `min_score` not above `score`.
    fn find_floor_by_score(
        &self,
        test_id: TestId,
        score: f64,
    ) -> Result<Option<ResultRecord>, LookupError>;

    /// The earliest result whose `code` equals `code`.
    fn find_by_code(&self, test_id: TestId, code: &str)
        -> Result<Option<ResultRecord>, LookupError>;

    /// The test's first result by id.
    fn first_for_test(&self, test_id: TestId) -> Result<Option<ResultRecord>, LookupError>;

    /// The test's question ids in display order.
    fn ordered_questions(&self, test_id: TestId) -> Result<Vec<QuestionId>, LookupError>;
}
