//! Dimension scores as shares of their sum; the largest share wins.

use crate::config::DimensionsConfig;
use crate::report::{ScoreDetail, ScoreResult};
use crate::strategies::ScoringContext;
use crate::strategies::dimensions::{self, DimensionTally};

/// Each dimension as a percentage of the tally's sum. All zero when the sum is not positive.
pub(crate) fn percentages(tally: &DimensionTally) -> Vec<f64> {
    let sum = tally.total();
    tally.map_values(|_, score| if sum > 0.0 { score / sum * 100.0 } else { 0.0 })
}

pub(crate) fn score(ctx: &mut ScoringContext<'_>, config: &DimensionsConfig) -> ScoreResult {
    let tally = dimensions::tally(ctx, config);
    let shares = percentages(&tally);
    let result = dimensions::resolve_top(ctx, &tally.names, &shares, tally.total());

    dimensions::tally_result(
        &tally,
        result,
        ScoreDetail::Percentage {
            percentages: tally.named(&shares),
        },
    )
}
