//! # Dimensions Scorer
//!
//! Every declared dimension starts at zero. Each answered option contributes the weights the
//! configuration assigns to `weights[question-key][option_key]`; contributions to undeclared
//! dimensions are ignored, and questions or options absent from the table contribute nothing.
//!
//! The outcome is the result whose `code` equals the top dimension. Scores within the configured
//! tie tolerance of the maximum count as tied, and the first declared of them wins.

use std::collections::BTreeMap;

use tracing::trace;

use super::{ScoringContext, pick_top, rank};
use crate::config::DimensionsConfig;
use crate::keys::QuestionKeys;
use crate::report::{RankedDimension, ScoreDetail, ScoreResult};
use crate::types::ResultRecord;

/// Raw per-dimension totals in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DimensionTally {
    pub names: Vec<String>,
    pub scores: Vec<f64>,
}

impl DimensionTally {
    pub(crate) fn total(&self) -> f64 {
        self.scores.iter().sum()
    }

    pub(crate) fn as_map(&self) -> BTreeMap<String, f64> {
        self.named(&self.scores)
    }

    /// Pair each dimension name with the value at the same position.
    pub(crate) fn named(&self, values: &[f64]) -> BTreeMap<String, f64> {
        self.names
            .iter()
            .cloned()
            .zip(values.iter().copied())
            .collect()
    }

    pub(crate) fn ranking(&self) -> Vec<RankedDimension> {
        rank(&self.names, &self.scores)
    }

    /// Same dimensions with derived values, such as percentages.
    pub(crate) fn map_values<F>(&self, derive: F) -> Vec<f64>
    where
        F: Fn(usize, f64) -> f64,
    {
        self.scores
            .iter()
            .enumerate()
            .map(|(index, score)| derive(index, *score))
            .collect()
    }
}

pub(crate) fn tally(ctx: &mut ScoringContext<'_>, config: &DimensionsConfig) -> DimensionTally {
    let mut scores = vec![0.0; config.dimensions.len()];

    if !config.weights.is_empty() {
        let keys = QuestionKeys::resolve(
            config.weights.format,
            &config.weights.question_keys(),
            ctx.test.id,
            ctx.catalog,
            &mut ctx.warnings,
        );

        for selection in &ctx.selections {
            let Some(key) = keys.key_for(selection.question_id) else {
                continue;
            };
            let Some(weights) = config.weights.lookup(&key, &selection.option.option_key) else {
                trace!(
                    question_id = selection.question_id,
                    key = %key,
                    option_key = %selection.option.option_key,
                    "no weights configured for answer"
                );
                continue;
            };
            for (dimension, weight) in weights {
                if let Some(index) = config.position(dimension) {
                    scores[index] += weight;
                }
            }
        }
    }

    DimensionTally {
        names: config.dimensions.clone(),
        scores,
    }
}

/// Resolve the highest of `values` to a result by its dimension code. With nothing to rank,
/// the raw total is resolved by score instead.
pub(crate) fn resolve_top(
    ctx: &mut ScoringContext<'_>,
    names: &[String],
    values: &[f64],
    total: f64,
) -> Option<ResultRecord> {
    match pick_top(names, values, ctx.settings.tie_tolerance, &mut ctx.warnings) {
        Some(index) => ctx.resolver.by_code(&names[index], &mut ctx.warnings),
        None => ctx.resolver.by_score(total, &mut ctx.warnings),
    }
}

/// Builds a result carrying the raw tally; the strategy supplies outcome and detail.
pub(crate) fn tally_result(
    tally: &DimensionTally,
    result: Option<ResultRecord>,
    detail: ScoreDetail,
) -> ScoreResult {
    ScoreResult {
        total_score: tally.total(),
        dimension_scores: tally.as_map(),
        result,
        secondary: None,
        detail,
        warnings: Vec::new(),
    }
}

pub(crate) fn score(ctx: &mut ScoringContext<'_>, config: &DimensionsConfig) -> ScoreResult {
    let tally = tally(ctx, config);
    let result = resolve_top(ctx, &tally.names, &tally.scores, tally.total());
    tally_result(
        &tally,
        result,
        ScoreDetail::Dimensions {
            ranking: tally.ranking(),
        },
    )
}
