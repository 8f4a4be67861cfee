//! # Range Scorer
//!
//! Computes the same total as [`super::simple`], then checks the operator's `ranges` table in
//! declared order. The first band containing the total decides the outcome: by its `code` when it
//! names one, otherwise by score. No table, or no matching band, resolves exactly as `simple` does.

use std::collections::BTreeMap;

use super::{ScoringContext, simple};
use crate::config::RangeConfig;
use crate::report::{ScoreDetail, ScoreResult};

pub(crate) fn score(ctx: &mut ScoringContext<'_>, config: Option<&RangeConfig>) -> ScoreResult {
    let total_score = simple::total(ctx) as f64;
    let matched = config.and_then(|config| config.matching(total_score)).cloned();

    let result = match matched.as_ref().and_then(|band| band.code.as_deref()) {
        Some(code) => ctx.resolver.by_code(code, &mut ctx.warnings),
        None => ctx.resolver.by_score(total_score, &mut ctx.warnings),
    };

    ScoreResult {
        total_score,
        dimension_scores: BTreeMap::new(),
        result,
        secondary: None,
        detail: ScoreDetail::Range { matched },
        warnings: Vec::new(),
    }
}
