//! # Quiz Catalog
//!
//! Storage-backed collaborator for the scoring engine. [`QuizCatalog::load`] reads one test with
//! its questions, options and results in a handful of queries and keeps them in memory, so the
//! engine's synchronous provider calls never touch the database.

use scoring::keys::QuestionPosition;
use scoring::memory::InMemoryCatalog;
use scoring::{
    AnswerSet, OptionIndexProvider, ResultLookupProvider, ScoreResult, ScoringEngine, Test,
};
use scoring::error::LookupError;
use scoring::types::{OptionRow, QuestionId, ResultRecord, TestId};
use sea_orm::{DatabaseConnection, DbErr};
use thiserror::Error;
use tracing::debug;

use crate::models::{quiz_option, quiz_question, quiz_result, quiz_test};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("quiz test {0} not found")]
    TestNotFound(TestId),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// One test and everything needed to score it.
#[derive(Debug, Clone)]
pub struct QuizCatalog {
    test: Test,
    snapshot: InMemoryCatalog,
}

impl QuizCatalog {
    pub async fn load(db: &DatabaseConnection, test_id: TestId) -> Result<Self, CatalogError> {
        let test = quiz_test::Model::get_by_id(db, test_id)
            .await?
            .ok_or(CatalogError::TestNotFound(test_id))?;

        let questions = quiz_question::Model::get_by_test_id(db, test_id).await?;
        let question_ids: Vec<QuestionId> = questions.iter().map(|q| q.id).collect();
        let options = quiz_option::Model::get_by_question_ids(db, &question_ids).await?;
        let results = quiz_result::Model::get_by_test_id(db, test_id).await?;

        debug!(
            test_id,
            questions = questions.len(),
            options = options.len(),
            results = results.len(),
            "loaded quiz catalog"
        );

        let snapshot = InMemoryCatalog::new(test_id)
            .with_questions(questions.iter().map(quiz_question::Model::position).collect())
            .with_options(options.iter().map(quiz_option::Model::to_row).collect())
            .with_results(results.iter().map(quiz_result::Model::to_record).collect());

        Ok(Self {
            test: test.to_test(),
            snapshot,
        })
    }

    pub fn test(&self) -> &Test {
        &self.test
    }

    pub fn snapshot(&self) -> &InMemoryCatalog {
        &self.snapshot
    }

    pub fn score(&self, engine: &ScoringEngine, answers: &AnswerSet) -> ScoreResult {
        engine.score(&self.test, answers, self, self)
    }
}

impl OptionIndexProvider for QuizCatalog {
    fn options_for(&self, question_ids: &[QuestionId]) -> Result<Vec<OptionRow>, LookupError> {
        self.snapshot.options_for(question_ids)
    }
}

impl ResultLookupProvider for QuizCatalog {
    fn find_by_score(
        &self,
        test_id: TestId,
        score: f64,
    ) -> Result<Option<ResultRecord>, LookupError> {
        self.snapshot.find_by_score(test_id, score)
    }

    fn find_floor_by_score(
        &self,
        test_id: TestId,
        score: f64,
    ) -> Result<Option<ResultRecord>, LookupError> {
        self.snapshot.find_floor_by_score(test_id, score)
    }

    fn find_by_code(
        &self,
        test_id: TestId,
        code: &str,
    ) -> Result<Option<ResultRecord>, LookupError> {
        self.snapshot.find_by_code(test_id, code)
    }

    fn first_for_test(&self, test_id: TestId) -> Result<Option<ResultRecord>, LookupError> {
        self.snapshot.first_for_test(test_id)
    }

    fn ordered_questions(&self, test_id: TestId) -> Result<Vec<QuestionId>, LookupError> {
        self.snapshot.ordered_questions(test_id)
    }
}

/// Load `test_id` and score `answers` against it.
pub async fn score_submission(
    db: &DatabaseConnection,
    test_id: TestId,
    answers: &AnswerSet,
    engine: &ScoringEngine,
) -> Result<ScoreResult, CatalogError> {
    let catalog = QuizCatalog::load(db, test_id).await?;
    Ok(catalog.score(engine, answers))
}

/// Question positions of a test, for callers that only need its order.
pub async fn question_positions(
    db: &DatabaseConnection,
    test_id: TestId,
) -> Result<Vec<QuestionPosition>, CatalogError> {
    Ok(quiz_question::Model::get_by_test_id(db, test_id)
        .await?
        .iter()
        .map(quiz_question::Model::position)
        .collect())
}
