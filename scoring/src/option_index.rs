//! Option lookup for one scoring call.
//!
//! [`OptionIndex`] maps `(question_id, option_id)` to the option row so each answered pair can be
//! resolved in constant time. Pairs the index cannot resolve are dropped with a warning.

use std::collections::HashMap;

use crate::answers::AnswerSet;
use crate::error::LookupError;
use crate::report::{ScoringWarning, WarningSink};
use crate::traits::provider::OptionIndexProvider;
use crate::types::{OptionId, OptionRow, QuestionId};

#[derive(Debug, Clone, Default)]
pub struct OptionIndex {
    entries: HashMap<(QuestionId, OptionId), OptionRow>,
}

/// An answered question together with the option chosen for it.
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    pub question_id: QuestionId,
    pub option: &'a OptionRow,
}

impl OptionIndex {
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = OptionRow>,
    {
        Self {
            entries: rows
                .into_iter()
                .map(|row| ((row.question_id, row.id), row))
                .collect(),
        }
    }

    /// Fetch the options of the answered questions from `provider`.
    pub fn load(
        provider: &dyn OptionIndexProvider,
        answers: &AnswerSet,
    ) -> Result<Self, LookupError> {
        provider
            .options_for(&answers.question_ids())
            .map(Self::from_rows)
    }

    pub fn get(&self, question_id: QuestionId, option_id: OptionId) -> Option<&OptionRow> {
        self.entries.get(&(question_id, option_id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve every answer, in question id order.
    pub(crate) fn select<'a>(
        &'a self,
        answers: &AnswerSet,
        warnings: &mut WarningSink,
    ) -> Vec<Selection<'a>> {
        answers
            .iter()
            .filter_map(|(question_id, option_id)| match self.get(question_id, option_id) {
                Some(option) => Some(Selection {
                    question_id,
                    option,
                }),
                None => {
                    warnings.push(ScoringWarning::UnresolvedAnswer {
                        question_id,
                        option_id,
                    });
                    None
                }
            })
            .collect()
    }
}
