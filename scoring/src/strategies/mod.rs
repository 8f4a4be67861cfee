//! # Strategies
//!
//! One module per scoring mode, plus the custom sub-strategies under [`custom`]. Every strategy
//! takes the per-call [`ScoringContext`] and returns a fresh [`ScoreResult`]; none keeps state
//! between calls.
//!
//! - [`simple`]: sum of option scores, resolved by score.
//! - [`range`]: the same sum, resolved through an operator-defined range table.
//! - [`dimensions`]: weighted per-dimension tallies, resolved by the top dimension's code.
//! - [`custom`]: seven configurable variations built mostly on top of [`dimensions`].

pub mod custom;
pub mod dimensions;
pub mod range;
pub mod simple;

use tracing::debug;

use crate::config::{self, ScoringConfig};
use crate::error::ConfigIssue;
use crate::option_index::Selection;
use crate::report::{RankedDimension, ScoreResult, ScoringWarning, WarningSink};
use crate::resolver::ResultResolver;
use crate::settings::EngineSettings;
use crate::traits::provider::ResultLookupProvider;
use crate::types::{ScoringMode, Test};

/// Everything a strategy needs for one scoring call.
pub(crate) struct ScoringContext<'a> {
    pub test: &'a Test,
    /// Resolved answers, in question id order.
    pub selections: Vec<Selection<'a>>,
    pub catalog: &'a dyn ResultLookupProvider,
    pub resolver: ResultResolver<'a>,
    pub settings: &'a EngineSettings,
    pub warnings: WarningSink,
}

impl<'a> ScoringContext<'a> {
    pub(crate) fn new(
        test: &'a Test,
        selections: Vec<Selection<'a>>,
        catalog: &'a dyn ResultLookupProvider,
        settings: &'a EngineSettings,
        warnings: WarningSink,
    ) -> Self {
        Self {
            test,
            selections,
            catalog,
            resolver: ResultResolver::new(catalog, test.id),
            settings,
            warnings,
        }
    }

    pub(crate) fn into_warnings(self) -> Vec<ScoringWarning> {
        self.warnings.into_inner()
    }
}

/// Route to the strategy for the test's mode.
///
/// Unusable configuration never fails the call: `dimensions` and `custom` fall back to
/// [`simple`], `range` falls back to score-bucket resolution.
pub(crate) fn dispatch(ctx: &mut ScoringContext<'_>) -> ScoreResult {
    let mode = ctx.test.scoring_mode;
    debug!(
        test_id = ctx.test.id,
        mode = mode.label(),
        answers = ctx.selections.len(),
        "dispatching scoring mode"
    );

    match config::parse(mode, ctx.test.scoring_config.as_ref()) {
        Ok(ScoringConfig::Simple) => simple::score(ctx),
        Ok(ScoringConfig::Dimensions(config)) => dimensions::score(ctx, &config),
        Ok(ScoringConfig::Range(config)) => range::score(ctx, Some(&config)),
        Ok(ScoringConfig::Custom(config)) => custom::score(ctx, &config),
        Err(issue) => {
            // A range test without a table is ordinary; it scores by result ranges.
            if !(mode == ScoringMode::Range && issue == ConfigIssue::Missing) {
                ctx.warnings.push(ScoringWarning::ConfigUnavailable {
                    mode,
                    issue: issue.to_string(),
                });
            }
            match mode {
                ScoringMode::Range => range::score(ctx, None),
                _ => simple::score(ctx),
            }
        }
    }
}

/// Index of the highest value. Values within `tolerance` of the maximum are tied, and the tie
/// goes to the first in declaration order with a warning.
pub(crate) fn pick_top(
    names: &[String],
    values: &[f64],
    tolerance: f64,
    warnings: &mut WarningSink,
) -> Option<usize> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let tied: Vec<usize> = values
        .iter()
        .enumerate()
        .filter(|(_, value)| (max - **value).abs() <= tolerance)
        .map(|(index, _)| index)
        .collect();

    let winner = *tied.first()?;
    if tied.len() > 1 {
        warnings.push(ScoringWarning::DimensionTie {
            dimensions: tied.iter().map(|index| names[*index].clone()).collect(),
            score: max,
            chosen: names[winner].clone(),
        });
    }
    Some(winner)
}

/// Dimensions sorted by descending value. Equal values keep declaration order.
pub(crate) fn rank(names: &[String], values: &[f64]) -> Vec<RankedDimension> {
    let mut ranking: Vec<RankedDimension> = names
        .iter()
        .zip(values)
        .map(|(code, score)| RankedDimension {
            code: code.clone(),
            score: *score,
        })
        .collect();
    ranking.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranking
}
