//! # Score Report Module
//!
//! Output types of the scoring engine. A [`ScoreResult`] is returned fresh from every call and
//! carries everything a caller may want to log or render: the total, per-dimension scores, the
//! resolved outcome, strategy-specific detail and the recoverable conditions met on the way.
//!
//! ## JSON Output Example
//!
//! ```json
//! {
//!   "total_score": 3.0,
//!   "dimension_scores": { "E": 2.0, "I": 1.0 },
//!   "result": { "id": 4, "test_id": 1, "code": "E", "title": "Extravert", ... },
//!   "secondary": null,
//!   "detail": { "strategy": "dimensions", "ranking": [ ... ] },
//!   "warnings": []
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::config::{RangeBand, TieBreaker};
use crate::types::{OptionId, QuestionId, ResultRecord, ScoringMode, TestId};

/// Final output of one scoring call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub total_score: f64,
    /// Per-dimension totals. Empty outside dimension-based modes.
    pub dimension_scores: BTreeMap<String, f64>,
    pub result: Option<ResultRecord>,
    /// Runner-up dimension, set by the `multi_result` strategy.
    pub secondary: Option<RankedDimension>,
    pub detail: ScoreDetail,
    pub warnings: Vec<ScoringWarning>,
}

impl ScoreResult {
    /// The zero result: no score, no dimensions, no outcome.
    pub fn empty() -> Self {
        Self {
            total_score: 0.0,
            dimension_scores: BTreeMap::new(),
            result: None,
            secondary: None,
            detail: ScoreDetail::Empty,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn with_warnings(mut self, warnings: Vec<ScoringWarning>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn result_code(&self) -> Option<&str> {
        self.result.as_ref().map(|result| result.code.as_str())
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A dimension and its score, as ranked by a dimension-based strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDimension {
    pub code: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteCount {
    pub code: String,
    pub votes: u32,
}

/// Strategy-specific detail of how a score was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ScoreDetail {
    Empty,
    Simple,
    Range {
        matched: Option<RangeBand>,
    },
    Dimensions {
        ranking: Vec<RankedDimension>,
    },
    Percentage {
        percentages: BTreeMap<String, f64>,
    },
    WeightedAverage {
        weighted: BTreeMap<String, f64>,
    },
    Conditional {
        matched_rule: Option<usize>,
        used_default: bool,
    },
    MultiResult {
        ranking: Vec<RankedDimension>,
    },
    Vote {
        tally: Vec<VoteCount>,
        winner: String,
        tied: Vec<String>,
    },
    WeightedSum {
        contributions: BTreeMap<QuestionId, f64>,
    },
    PercentageThreshold {
        percentages: BTreeMap<String, f64>,
        matched_code: Option<String>,
    },
}

/// Result lookup tier at which a collaborator failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupTier {
    ExactScore,
    FloorScore,
    Code,
    FirstForTest,
    OrderedQuestions,
}

/// A recoverable condition met while scoring. None of these stop the computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringWarning {
    EmptyAnswers,
    UnresolvedAnswer {
        question_id: QuestionId,
        option_id: OptionId,
    },
    OptionLookupFailed {
        message: String,
    },
    ConfigUnavailable {
        mode: ScoringMode,
        issue: String,
    },
    DimensionTie {
        dimensions: Vec<String>,
        score: f64,
        chosen: String,
    },
    OrdinalKeysUnavailable,
    NoVotes,
    VoteTie {
        codes: Vec<String>,
        chosen: String,
        tie_breaker: TieBreaker,
    },
    VoteUnresolved {
        code: String,
    },
    LookupFailed {
        tier: LookupTier,
        message: String,
    },
}

impl fmt::Display for ScoringWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringWarning::EmptyAnswers => write!(f, "no usable answers submitted"),
            ScoringWarning::UnresolvedAnswer {
                question_id,
                option_id,
            } => write!(
                f,
                "option {option_id} does not belong to question {question_id}"
            ),
            ScoringWarning::OptionLookupFailed { message } => {
                write!(f, "option lookup failed: {message}")
            }
            ScoringWarning::ConfigUnavailable { mode, issue } => {
                write!(f, "{} config unusable ({issue})", mode.label())
            }
            ScoringWarning::DimensionTie {
                dimensions,
                score,
                chosen,
            } => write!(
                f,
                "dimensions [{}] tied at {score}; picked {chosen}",
                dimensions.join(", ")
            ),
            ScoringWarning::OrdinalKeysUnavailable => {
                write!(f, "question order unavailable for ordinal keys")
            }
            ScoringWarning::NoVotes => write!(f, "no answered option carries a result code"),
            ScoringWarning::VoteTie {
                codes,
                chosen,
                tie_breaker,
            } => write!(
                f,
                "vote tie between [{}] broken by {tie_breaker:?}; picked {chosen}",
                codes.join(", ")
            ),
            ScoringWarning::VoteUnresolved { code } => {
                write!(f, "winning vote code {code} matches no result")
            }
            ScoringWarning::LookupFailed { tier, message } => {
                write!(f, "lookup at tier {tier:?} failed: {message}")
            }
        }
    }
}

/// Collects warnings for one scoring call, logging each one as it arrives.
#[derive(Debug)]
pub(crate) struct WarningSink {
    test_id: TestId,
    entries: Vec<ScoringWarning>,
}

impl WarningSink {
    pub(crate) fn new(test_id: TestId) -> Self {
        Self {
            test_id,
            entries: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, warning: ScoringWarning) {
        warn!(test_id = self.test_id, "{}", warning);
        self.entries.push(warning);
    }

    pub(crate) fn into_inner(self) -> Vec<ScoringWarning> {
        self.entries
    }
}
