//! Answer normalisation.
//!
//! Submitted answers arrive in whatever shape the request layer produced: JSON objects with
//! string keys, string maps from form posts, or already-typed maps. [`AnswerSet`] reduces all of
//! them to positive `question_id -> option_id` pairs, one selection per question. Pairs that do
//! not coerce to positive integers are dropped silently.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::types::{OptionId, QuestionId};

/// Normalised selections, ordered by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerSet(BTreeMap<QuestionId, OptionId>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from typed pairs. Non-positive ids are dropped; a repeated question keeps the last
    /// option seen.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let mut answers = BTreeMap::new();
        for (question_id, option_id) in pairs {
            if question_id > 0 && option_id > 0 {
                answers.insert(question_id, option_id);
            }
        }
        Self(answers)
    }

    /// Build from a string-keyed map such as a decoded form post.
    pub fn from_strings<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::from_pairs(pairs.into_iter().filter_map(|(question, option)| {
            Some((parse_id(question.as_ref())?, parse_id(option.as_ref())?))
        }))
    }

    /// Build from a JSON payload. Anything other than an object yields an empty set.
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        Self::from_pairs(object.iter().filter_map(|(question, option)| {
            Some((parse_id(question)?, coerce_id(option)?))
        }))
    }

    pub fn insert(&mut self, question_id: QuestionId, option_id: OptionId) {
        if question_id > 0 && option_id > 0 {
            self.0.insert(question_id, option_id);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, question_id: QuestionId) -> Option<OptionId> {
        self.0.get(&question_id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, OptionId)> + '_ {
        self.0.iter().map(|(question, option)| (*question, *option))
    }

    pub fn question_ids(&self) -> Vec<QuestionId> {
        self.0.keys().copied().collect()
    }
}

impl FromIterator<(i64, i64)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (i64, i64)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

fn coerce_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(raw) => parse_id(raw),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_payload_keeps_only_positive_integer_pairs() {
        let answers = AnswerSet::from_json(&json!({
            "1": 11,
            "2": "12",
            "3": 13.0,
            "4": -5,
            "0": 14,
            "x": 15,
            "5": "abc",
            "6": null,
            "7": [1]
        }));

        assert_eq!(answers.len(), 3);
        assert_eq!(answers.get(1), Some(11));
        assert_eq!(answers.get(2), Some(12));
        assert_eq!(answers.get(3), Some(13));
        assert_eq!(answers.get(4), None);
    }

    #[test]
    fn non_object_payloads_are_empty() {
        assert!(AnswerSet::from_json(&json!([1, 2, 3])).is_empty());
        assert!(AnswerSet::from_json(&json!("1=2")).is_empty());
        assert!(AnswerSet::from_json(&Value::Null).is_empty());
    }

    #[test]
    fn string_pairs_are_trimmed_and_filtered() {
        let answers = AnswerSet::from_strings(vec![(" 4 ", "40"), ("5", "0"), ("six", "60")]);
        assert_eq!(answers.iter().collect::<Vec<_>>(), vec![(4, 40)]);
    }

    #[test]
    fn later_pairs_replace_earlier_ones() {
        let answers: AnswerSet = vec![(1, 10), (1, 11), (2, 20)].into_iter().collect();
        assert_eq!(answers.get(1), Some(11));
        assert_eq!(answers.question_ids(), vec![1, 2]);
    }
}
