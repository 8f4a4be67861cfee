//! # Custom Scorer
//!
//! Sub-dispatch on the configured `strategy`. `vote` and `weighted_sum` work on option scores and
//! result codes alone; every other strategy starts from a dimensions tally and therefore needs a
//! declared `dimensions` list. Without one those strategies score as `simple`.

pub mod conditional;
pub mod multi_result;
pub mod percentage;
pub mod percentage_threshold;
pub mod vote;
pub mod weighted_average;
pub mod weighted_sum;

use super::{ScoringContext, dimensions, simple};
use crate::config::{CustomConfig, CustomStrategy, DimensionsConfig};
use crate::error::ConfigIssue;
use crate::report::{ScoreResult, ScoringWarning};
use crate::types::ScoringMode;

pub(crate) fn score(ctx: &mut ScoringContext<'_>, config: &CustomConfig) -> ScoreResult {
    match &config.strategy {
        CustomStrategy::Vote(vote) => vote::score(ctx, vote),
        CustomStrategy::WeightedSum(sum) => weighted_sum::score(ctx, sum),
        CustomStrategy::Dimensions => with_dimensions(ctx, config, dimensions::score),
        CustomStrategy::Percentage => with_dimensions(ctx, config, percentage::score),
        CustomStrategy::MultiResult => with_dimensions(ctx, config, multi_result::score),
        CustomStrategy::WeightedAverage(weights) => with_dimensions(ctx, config, |ctx, dims| {
            weighted_average::score(ctx, dims, weights)
        }),
        CustomStrategy::Conditional(rules) => with_dimensions(ctx, config, |ctx, dims| {
            conditional::score(ctx, dims, rules)
        }),
        CustomStrategy::PercentageThreshold(thresholds) => {
            with_dimensions(ctx, config, |ctx, dims| {
                percentage_threshold::score(ctx, dims, thresholds)
            })
        }
    }
}

fn with_dimensions<F>(
    ctx: &mut ScoringContext<'_>,
    config: &CustomConfig,
    strategy: F,
) -> ScoreResult
where
    F: FnOnce(&mut ScoringContext<'_>, &DimensionsConfig) -> ScoreResult,
{
    match &config.dimensions {
        Some(dimensions) => strategy(ctx, dimensions),
        None => {
            ctx.warnings.push(ScoringWarning::ConfigUnavailable {
                mode: ScoringMode::Custom,
                issue: ConfigIssue::IncompleteDimensions.to_string(),
            });
            simple::score(ctx)
        }
    }
}
