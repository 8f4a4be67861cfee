//! Fixtures shared by the unit tests.

use crate::answers::AnswerSet;
use crate::memory::InMemoryCatalog;
use crate::report::ScoreResult;
use crate::settings::EngineSettings;
use crate::types::{OptionId, OptionRow, QuestionId, ResultRecord, Test};
use crate::ScoringEngine;

pub fn option(id: OptionId, question_id: QuestionId, key: &str, score: i64) -> OptionRow {
    OptionRow {
        id,
        question_id,
        option_key: key.to_string(),
        score_value: score,
        map_result_code: None,
    }
}

pub fn coded_option(
    id: OptionId,
    question_id: QuestionId,
    key: &str,
    score: i64,
    code: &str,
) -> OptionRow {
    OptionRow {
        map_result_code: Some(code.to_string()),
        ..option(id, question_id, key, score)
    }
}

/// A result of test 1.
pub fn result(id: i64, code: &str, min: i64, max: i64) -> ResultRecord {
    ResultRecord {
        id,
        test_id: 1,
        code: code.to_string(),
        title: code.to_string(),
        description: String::new(),
        min_score: min,
        max_score: max,
    }
}

pub fn run(test: &Test, catalog: &InMemoryCatalog, answers: AnswerSet) -> ScoreResult {
    run_with(&EngineSettings::default(), test, catalog, answers)
}

pub fn run_with(
    settings: &EngineSettings,
    test: &Test,
    catalog: &InMemoryCatalog,
    answers: AnswerSet,
) -> ScoreResult {
    ScoringEngine::new(settings.clone()).score(test, &answers, catalog, catalog)
}
