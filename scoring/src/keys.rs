//! Question key resolution.
//!
//! Dimension weight tables address questions in one of three ways: by database id, by 1-based
//! position written as bare digits (`"3"`), or by position with a `q` prefix (`"q3"`, any case).
//! The format is detected once from the first key of the table ([`KeyFormat::detect`]). For the
//! positional formats the test's questions are ordered by their configured sort field
//! ([`order_questions`]) and each question id is mapped to its position ([`QuestionKeys`]).

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::report::{LookupTier, ScoringWarning, WarningSink};
use crate::traits::provider::ResultLookupProvider;
use crate::types::{QuestionId, TestId};

lazy_static! {
    static ref ORDINAL_KEY: Regex = Regex::new(r"^\d+$").unwrap();
    static ref PREFIXED_ORDINAL_KEY: Regex = Regex::new(r"(?i)^q(\d+)$").unwrap();
}

/// How a weight table addresses questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyFormat {
    /// Keys are question ids, matched textually.
    #[default]
    QuestionId,
    /// `"1"`, `"2"`, ... by sorted position.
    Ordinal,
    /// `"q1"`, `"Q2"`, ... by sorted position.
    PrefixedOrdinal,
}

impl KeyFormat {
    pub fn detect(first_key: &str) -> Self {
        if ORDINAL_KEY.is_match(first_key) {
            KeyFormat::Ordinal
        } else if PREFIXED_ORDINAL_KEY.is_match(first_key) {
            KeyFormat::PrefixedOrdinal
        } else {
            KeyFormat::QuestionId
        }
    }

    pub fn is_positional(&self) -> bool {
        !matches!(self, KeyFormat::QuestionId)
    }

    /// Canonical spelling of a config key under this format, or `None` if the key does not fit.
    /// `"Q03"` becomes `"q3"` and `"03"` becomes `"3"`.
    pub fn canonical(&self, key: &str) -> Option<String> {
        match self {
            KeyFormat::QuestionId => Some(key.to_string()),
            KeyFormat::Ordinal => {
                if !ORDINAL_KEY.is_match(key) {
                    return None;
                }
                key.parse::<u64>().ok().map(|n| n.to_string())
            }
            KeyFormat::PrefixedOrdinal => {
                let digits = PREFIXED_ORDINAL_KEY.captures(key)?.get(1)?.as_str();
                digits.parse::<u64>().ok().map(|n| format!("q{n}"))
            }
        }
    }

    fn key_for_position(&self, position: usize) -> String {
        match self {
            KeyFormat::PrefixedOrdinal => format!("q{position}"),
            _ => position.to_string(),
        }
    }
}

/// Maps answered question ids onto the canonical keys of a weight table.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKeys {
    ById,
    Positional {
        format: KeyFormat,
        positions: HashMap<QuestionId, usize>,
    },
}

impl QuestionKeys {
    /// Resolve the key mapping for a table in `format` whose canonical keys are `table_keys`,
    /// fetching the question order only when needed. If the order cannot be fetched no question
    /// resolves, and a warning is recorded.
    ///
    /// A bare-digit table whose keys are all question ids of the test, at least one of them
    /// beyond the question count, cannot be positional and is read by id instead.
    pub(crate) fn resolve(
        format: KeyFormat,
        table_keys: &[&str],
        test_id: TestId,
        catalog: &dyn ResultLookupProvider,
        warnings: &mut WarningSink,
    ) -> Self {
        if !format.is_positional() {
            return QuestionKeys::ById;
        }

        let ordered = match catalog.ordered_questions(test_id) {
            Ok(ordered) => ordered,
            Err(err) => {
                warnings.push(ScoringWarning::LookupFailed {
                    tier: LookupTier::OrderedQuestions,
                    message: err.to_string(),
                });
                Vec::new()
            }
        };

        if ordered.is_empty() {
            warnings.push(ScoringWarning::OrdinalKeysUnavailable);
        } else if format == KeyFormat::Ordinal && addresses_ids(table_keys, &ordered) {
            debug!(test_id, "digit keys name question ids, reading table by id");
            return QuestionKeys::ById;
        }

        Self::from_order(format, &ordered)
    }

    pub fn from_order(format: KeyFormat, ordered: &[QuestionId]) -> Self {
        if !format.is_positional() {
            return QuestionKeys::ById;
        }
        let positions = ordered
            .iter()
            .enumerate()
            .map(|(index, question_id)| (*question_id, index + 1))
            .collect();
        QuestionKeys::Positional { format, positions }
    }

    pub fn key_for(&self, question_id: QuestionId) -> Option<String> {
        match self {
            QuestionKeys::ById => Some(question_id.to_string()),
            QuestionKeys::Positional { format, positions } => positions
                .get(&question_id)
                .map(|position| format.key_for_position(*position)),
        }
    }
}

fn addresses_ids(table_keys: &[&str], ordered: &[QuestionId]) -> bool {
    let ids: Vec<QuestionId> = table_keys
        .iter()
        .filter_map(|key| key.parse::<QuestionId>().ok())
        .collect();
    !ids.is_empty()
        && ids.len() == table_keys.len()
        && ids.iter().all(|id| ordered.contains(id))
        && ids.iter().any(|id| *id > ordered.len() as QuestionId)
}

/// A question's id and whichever ordering columns its storage provides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPosition {
    pub id: QuestionId,
    #[serde(default)]
    pub sort_order: Option<i64>,
    #[serde(default)]
    pub order_number: Option<i64>,
    #[serde(default)]
    pub display_order: Option<i64>,
}

impl QuestionPosition {
    pub fn new(id: QuestionId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn sorted_by(id: QuestionId, sort_order: i64) -> Self {
        Self {
            id,
            sort_order: Some(sort_order),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortField {
    SortOrder,
    OrderNumber,
    DisplayOrder,
    Id,
}

impl SortField {
    fn value(&self, question: &QuestionPosition) -> Option<i64> {
        match self {
            SortField::SortOrder => question.sort_order,
            SortField::OrderNumber => question.order_number,
            SortField::DisplayOrder => question.display_order,
            SortField::Id => Some(question.id),
        }
    }
}

/// Order question ids by the first populated field of `sort_order`, `order_number`,
/// `display_order`, falling back to id. Rows missing the chosen field sort last; equal values
/// keep id order.
pub fn order_questions(questions: &[QuestionPosition]) -> Vec<QuestionId> {
    let field = [
        SortField::SortOrder,
        SortField::OrderNumber,
        SortField::DisplayOrder,
    ]
    .into_iter()
    .find(|field| questions.iter().any(|q| field.value(q).is_some()))
    .unwrap_or(SortField::Id);

    let mut ordered: Vec<&QuestionPosition> = questions.iter().collect();
    ordered.sort_by_key(|q| (field.value(q).is_none(), field.value(q), q.id));
    ordered.into_iter().map(|q| q.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryCatalog;

    #[test]
    fn detects_formats_from_first_key() {
        assert_eq!(KeyFormat::detect("12"), KeyFormat::Ordinal);
        assert_eq!(KeyFormat::detect("q3"), KeyFormat::PrefixedOrdinal);
        assert_eq!(KeyFormat::detect("Q3"), KeyFormat::PrefixedOrdinal);
        assert_eq!(KeyFormat::detect("question-12"), KeyFormat::QuestionId);
        assert_eq!(KeyFormat::detect("q"), KeyFormat::QuestionId);
        assert_eq!(KeyFormat::detect(" 1"), KeyFormat::QuestionId);
    }

    #[test]
    fn canonical_keys_normalise_case_and_padding() {
        assert_eq!(KeyFormat::PrefixedOrdinal.canonical("Q03"), Some("q3".into()));
        assert_eq!(KeyFormat::PrefixedOrdinal.canonical("3"), None);
        assert_eq!(KeyFormat::Ordinal.canonical("007"), Some("7".into()));
        assert_eq!(KeyFormat::Ordinal.canonical("q7"), None);
        assert_eq!(KeyFormat::QuestionId.canonical("abc"), Some("abc".into()));
    }

    #[test]
    fn positional_keys_follow_given_order() {
        let keys = QuestionKeys::from_order(KeyFormat::PrefixedOrdinal, &[30, 10, 20]);
        assert_eq!(keys.key_for(30).as_deref(), Some("q1"));
        assert_eq!(keys.key_for(20).as_deref(), Some("q3"));
        assert_eq!(keys.key_for(99), None);

        let keys = QuestionKeys::from_order(KeyFormat::Ordinal, &[30, 10]);
        assert_eq!(keys.key_for(10).as_deref(), Some("2"));

        let keys = QuestionKeys::from_order(KeyFormat::QuestionId, &[30]);
        assert_eq!(keys.key_for(77).as_deref(), Some("77"));
    }

    #[test]
    fn digit_tables_naming_question_ids_read_by_id() {
        let catalog = InMemoryCatalog::new(1).with_questions(vec![
            QuestionPosition::new(100),
            QuestionPosition::new(200),
        ]);
        let mut warnings = WarningSink::new(1);

        let keys =
            QuestionKeys::resolve(KeyFormat::Ordinal, &["100", "200"], 1, &catalog, &mut warnings);
        assert_eq!(keys, QuestionKeys::ById);

        let keys =
            QuestionKeys::resolve(KeyFormat::Ordinal, &["1", "2"], 1, &catalog, &mut warnings);
        assert_eq!(keys.key_for(200).as_deref(), Some("2"));
        assert!(warnings.into_inner().is_empty());
    }

    #[test]
    fn unknown_question_order_warns() {
        let catalog = InMemoryCatalog::new(1);
        let mut warnings = WarningSink::new(1);
        let keys = QuestionKeys::resolve(
            KeyFormat::PrefixedOrdinal,
            &["q1"],
            1,
            &catalog,
            &mut warnings,
        );
        assert_eq!(keys.key_for(5), None);
        assert_eq!(warnings.into_inner(), vec![ScoringWarning::OrdinalKeysUnavailable]);
    }

    #[test]
    fn orders_by_first_populated_field() {
        let questions = vec![
            QuestionPosition {
                id: 1,
                order_number: Some(3),
                display_order: Some(1),
                ..Default::default()
            },
            QuestionPosition {
                id: 2,
                order_number: Some(1),
                ..Default::default()
            },
            QuestionPosition {
                id: 3,
                order_number: Some(2),
                ..Default::default()
            },
        ];
        assert_eq!(order_questions(&questions), vec![2, 3, 1]);
    }

    #[test]
    fn rows_without_sort_value_go_last() {
        let questions = vec![
            QuestionPosition::new(5),
            QuestionPosition::sorted_by(9, 2),
            QuestionPosition::sorted_by(7, 2),
            QuestionPosition::sorted_by(8, 1),
        ];
        assert_eq!(order_questions(&questions), vec![8, 7, 9, 5]);
    }

    #[test]
    fn falls_back_to_id_order() {
        let questions = vec![
            QuestionPosition::new(40),
            QuestionPosition::new(4),
            QuestionPosition::new(14),
        ];
        assert_eq!(order_questions(&questions), vec![4, 14, 40]);
    }
}
