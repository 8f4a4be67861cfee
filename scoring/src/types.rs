//! # Types Module
//!
//! Input records consumed by the scoring engine. These mirror the rows a storage layer
//! holds for a quiz: the test itself, the options of its questions, and the results
//! (outcomes) a respondent can land on. The engine only ever reads them.

use serde::{Deserialize, Serialize};

use crate::config::ConfigPayload;

pub type TestId = i64;
pub type QuestionId = i64;
pub type OptionId = i64;

/// Top-level scoring mode declared on a test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    #[default]
    Simple,
    Dimensions,
    Range,
    Custom,
}

impl ScoringMode {
    /// Maps a stored mode label onto a mode. Unknown or empty labels score as `Simple`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "dimensions" => ScoringMode::Dimensions,
            "range" => ScoringMode::Range,
            "custom" => ScoringMode::Custom,
            _ => ScoringMode::Simple,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoringMode::Simple => "simple",
            ScoringMode::Dimensions => "dimensions",
            ScoringMode::Range => "range",
            ScoringMode::Custom => "custom",
        }
    }
}

/// A quiz definition as far as scoring is concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Test {
    pub id: TestId,
    #[serde(default)]
    pub scoring_mode: ScoringMode,
    #[serde(default)]
    pub scoring_config: Option<ConfigPayload>,
}

impl Test {
    pub fn new(id: TestId, scoring_mode: ScoringMode) -> Self {
        Self {
            id,
            scoring_mode,
            scoring_config: None,
        }
    }

    /// Attach a scoring configuration, either as JSON text or an already-decoded value.
    pub fn with_config(mut self, config: impl Into<ConfigPayload>) -> Self {
        self.scoring_config = Some(config.into());
        self
    }
}

/// One selectable option of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRow {
    pub id: OptionId,
    pub question_id: QuestionId,
    /// Operator-chosen key, unique within its question (commonly "A", "B", ...).
    pub option_key: String,
    pub score_value: i64,
    #[serde(default)]
    pub map_result_code: Option<String>,
}

/// A test outcome. Addressed either by a score range or by its `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: i64,
    pub test_id: TestId,
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub min_score: i64,
    pub max_score: i64,
}

impl ResultRecord {
    pub fn contains(&self, score: f64) -> bool {
        self.min_score as f64 <= score && score <= self.max_score as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_mode_labels_fall_back_to_simple() {
        assert_eq!(ScoringMode::from_label("Dimensions"), ScoringMode::Dimensions);
        assert_eq!(ScoringMode::from_label(" range "), ScoringMode::Range);
        assert_eq!(ScoringMode::from_label("custom"), ScoringMode::Custom);
        assert_eq!(ScoringMode::from_label("personality"), ScoringMode::Simple);
        assert_eq!(ScoringMode::from_label(""), ScoringMode::Simple);
    }

    #[test]
    fn result_range_is_inclusive() {
        let result = ResultRecord {
            id: 1,
            test_id: 7,
            code: "mid".into(),
            title: "Middle".into(),
            description: String::new(),
            min_score: 6,
            max_score: 10,
        };
        assert!(result.contains(6.0));
        assert!(result.contains(10.0));
        assert!(!result.contains(10.5));
        assert!(!result.contains(5.0));
    }
}
