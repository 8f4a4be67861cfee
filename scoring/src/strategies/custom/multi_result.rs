//! Dimensions scoring that also reports the runner-up dimension as `secondary`.

use crate::config::DimensionsConfig;
use crate::report::{ScoreDetail, ScoreResult};
use crate::strategies::dimensions;
use crate::strategies::{ScoringContext, pick_top};

pub(crate) fn score(ctx: &mut ScoringContext<'_>, config: &DimensionsConfig) -> ScoreResult {
    let tally = dimensions::tally(ctx, config);
    let ranking = tally.ranking();

    let primary = pick_top(
        &tally.names,
        &tally.scores,
        ctx.settings.tie_tolerance,
        &mut ctx.warnings,
    )
    .map(|index| tally.names[index].clone());

    let result = match primary.as_deref() {
        Some(code) => ctx.resolver.by_code(code, &mut ctx.warnings),
        None => ctx.resolver.by_score(tally.total(), &mut ctx.warnings),
    };
    let secondary = ranking
        .iter()
        .find(|ranked| Some(ranked.code.as_str()) != primary.as_deref())
        .cloned();

    ScoreResult {
        secondary,
        ..dimensions::tally_result(&tally, result, ScoreDetail::MultiResult { ranking })
    }
}
