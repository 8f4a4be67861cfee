//! Ordered rules over raw dimension scores. The first rule whose condition holds names the result
//! code; otherwise `default_result_code`, otherwise the plain dimensions outcome.

use tracing::debug;

use crate::config::{ConditionalConfig, DimensionsConfig};
use crate::report::{ScoreDetail, ScoreResult};
use crate::strategies::ScoringContext;
use crate::strategies::dimensions::{self, DimensionTally};

fn first_match(
    tally: &DimensionTally,
    config: &DimensionsConfig,
    rules: &ConditionalConfig,
) -> Option<usize> {
    rules.rules.iter().position(|rule| {
        // Rules on undeclared dimensions never match.
        config
            .position(&rule.dimension)
            .is_some_and(|index| rule.matches(tally.scores[index]))
    })
}

pub(crate) fn score(
    ctx: &mut ScoringContext<'_>,
    config: &DimensionsConfig,
    rules: &ConditionalConfig,
) -> ScoreResult {
    let tally = dimensions::tally(ctx, config);
    let matched_rule = first_match(&tally, config, rules);

    let (result, used_default) = match (matched_rule, rules.default_result_code.as_deref()) {
        (Some(index), _) => {
            let rule = &rules.rules[index];
            debug!(rule = index, code = %rule.result_code, "conditional rule matched");
            (ctx.resolver.by_code(&rule.result_code, &mut ctx.warnings), false)
        }
        (None, Some(code)) => (ctx.resolver.by_code(code, &mut ctx.warnings), true),
        (None, None) => (
            dimensions::resolve_top(ctx, &tally.names, &tally.scores, tally.total()),
            false,
        ),
    };

    dimensions::tally_result(
        &tally,
        result,
        ScoreDetail::Conditional {
            matched_rule,
            used_default,
        },
    )
}
