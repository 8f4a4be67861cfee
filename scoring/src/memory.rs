//! In-memory collaborator.
//!
//! [`InMemoryCatalog`] holds one test's questions, options and results and answers every
//! provider query from them. Storage adapters load a test into it once per request; tests use it
//! directly.

use std::collections::HashSet;

use crate::error::LookupError;
use crate::keys::{QuestionPosition, order_questions};
use crate::traits::provider::{OptionIndexProvider, ResultLookupProvider};
use crate::types::{OptionRow, QuestionId, ResultRecord, TestId};

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    test_id: TestId,
    questions: Vec<QuestionPosition>,
    options: Vec<OptionRow>,
    results: Vec<ResultRecord>,
}

impl InMemoryCatalog {
    pub fn new(test_id: TestId) -> Self {
        Self {
            test_id,
            ..Self::default()
        }
    }

    pub fn with_questions(mut self, questions: Vec<QuestionPosition>) -> Self {
        self.questions = questions;
        self
    }

    pub fn with_options(mut self, options: Vec<OptionRow>) -> Self {
        self.options = options;
        self
    }

    /// Results of other tests are ignored by every lookup.
    pub fn with_results(mut self, results: Vec<ResultRecord>) -> Self {
        self.results = results;
        self
    }

    pub fn test_id(&self) -> TestId {
        self.test_id
    }

    pub fn options(&self) -> &[OptionRow] {
        &self.options
    }

    pub fn results(&self) -> &[ResultRecord] {
        &self.results
    }

    fn results_of(&self, test_id: TestId) -> impl Iterator<Item = &ResultRecord> {
        self.results.iter().filter(move |r| r.test_id == test_id)
    }
}

impl OptionIndexProvider for InMemoryCatalog {
    fn options_for(&self, question_ids: &[QuestionId]) -> Result<Vec<OptionRow>, LookupError> {
        let wanted: HashSet<QuestionId> = question_ids.iter().copied().collect();
        Ok(self
            .options
            .iter()
            .filter(|option| wanted.contains(&option.question_id))
            .cloned()
            .collect())
    }
}

impl ResultLookupProvider for InMemoryCatalog {
    fn find_by_score(
        &self,
        test_id: TestId,
        score: f64,
    ) -> Result<Option<ResultRecord>, LookupError> {
        Ok(self
            .results_of(test_id)
            .filter(|r| r.contains(score))
            .min_by_key(|r| r.id)
            .cloned())
    }

    fn find_floor_by_score(
        &self,
        test_id: TestId,
        score: f64,
    ) -> Result<Option<ResultRecord>, LookupError> {
        Ok(self
            .results_of(test_id)
            .filter(|r| r.min_score as f64 <= score)
            .min_by_key(|r| (std::cmp::Reverse(r.min_score), r.id))
            .cloned())
    }

    fn find_by_code(
        &self,
        test_id: TestId,
        code: &str,
    ) -> Result<Option<ResultRecord>, LookupError> {
        Ok(self
            .results_of(test_id)
            .filter(|r| r.code == code)
            .min_by_key(|r| r.id)
            .cloned())
    }

    fn first_for_test(&self, test_id: TestId) -> Result<Option<ResultRecord>, LookupError> {
        Ok(self.results_of(test_id).min_by_key(|r| r.id).cloned())
    }

    fn ordered_questions(&self, test_id: TestId) -> Result<Vec<QuestionId>, LookupError> {
        if test_id != self.test_id {
            return Ok(Vec::new());
        }
        Ok(order_questions(&self.questions))
    }
}
