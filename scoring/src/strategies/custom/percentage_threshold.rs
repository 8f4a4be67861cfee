//! # Percentage Thresholds
//!
//! Dimension percentages, as computed by [`super::percentage`], checked against a `thresholds`
//! table of `result_code -> constraint` in the order the table lists them. A constraint bounds a
//! single dimension, bounds each of several named dimensions, or bounds every declared dimension
//! alike. The first satisfied entry names the result; otherwise `default_result_code`, otherwise
//! the dimension with the highest percentage.

use super::percentage;
use crate::config::{DimensionsConfig, ThresholdConfig, ThresholdConstraint};
use crate::report::{ScoreDetail, ScoreResult};
use crate::strategies::ScoringContext;
use crate::strategies::dimensions;

fn satisfied(
    constraint: &ThresholdConstraint,
    config: &DimensionsConfig,
    shares: &[f64],
) -> bool {
    let share_of = |dimension: &str| config.position(dimension).map(|index| shares[index]);

    match constraint {
        ThresholdConstraint::Dimension { dimension, bounds } => {
            share_of(dimension).is_some_and(|share| bounds.contains(share))
        }
        ThresholdConstraint::AllDimensions(per_dimension) => {
            !per_dimension.is_empty()
                && per_dimension.iter().all(|(dimension, bounds)| {
                    share_of(dimension).is_some_and(|share| bounds.contains(share))
                })
        }
        ThresholdConstraint::Global(bounds) => shares.iter().all(|share| bounds.contains(*share)),
    }
}

pub(crate) fn score(
    ctx: &mut ScoringContext<'_>,
    config: &DimensionsConfig,
    thresholds: &ThresholdConfig,
) -> ScoreResult {
    let tally = dimensions::tally(ctx, config);
    let shares = percentage::percentages(&tally);

    let matched_code = thresholds
        .thresholds
        .iter()
        .find(|rule| satisfied(&rule.constraint, config, &shares))
        .map(|rule| rule.result_code.clone());

    let result = match matched_code
        .as_deref()
        .or(thresholds.default_result_code.as_deref())
    {
        Some(code) => ctx.resolver.by_code(code, &mut ctx.warnings),
        None => dimensions::resolve_top(ctx, &tally.names, &shares, tally.total()),
    };

    dimensions::tally_result(
        &tally,
        result,
        ScoreDetail::PercentageThreshold {
            percentages: tally.named(&shares),
            matched_code,
        },
    )
}
