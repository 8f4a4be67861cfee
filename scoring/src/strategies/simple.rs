//! # Simple Scorer
//!
//! Sums the `score_value` of every answered option and resolves the total through the score
//! lookup chain. Also the fallback for every other mode when its configuration is unusable.

use std::collections::BTreeMap;

use super::ScoringContext;
use crate::report::{ScoreDetail, ScoreResult};

/// Sum of the answered option scores, saturating at the `i64` bounds.
pub(crate) fn total(ctx: &ScoringContext<'_>) -> i64 {
    ctx.selections
        .iter()
        .map(|selection| selection.option.score_value)
        .fold(0i64, i64::saturating_add)
}

pub(crate) fn score(ctx: &mut ScoringContext<'_>) -> ScoreResult {
    let total_score = total(ctx) as f64;
    let result = ctx.resolver.by_score(total_score, &mut ctx.warnings);

    ScoreResult {
        total_score,
        dimension_scores: BTreeMap::new(),
        result,
        secondary: None,
        detail: ScoreDetail::Simple,
        warnings: Vec::new(),
    }
}
