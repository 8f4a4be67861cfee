//! # Vote
//!
//! Each answered option carrying a `map_result_code` casts one vote for that code; dimension
//! weights play no part. Codes below `vote_threshold` are discarded, the most voted code wins and
//! is resolved by exact code.
//!
//! Ties follow `tie_breaker`. `first` picks the code that received its first vote earliest, in
//! question id order. `random` draws among the tied codes, seeded from the engine settings when a
//! seed is configured. `all` reports every tied code in the detail but still resolves only the
//! first of them.
//!
//! No votes, or a winner matching no result, scores exactly as `simple` would.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::config::{TieBreaker, VoteConfig};
use crate::report::{ScoreDetail, ScoreResult, ScoringWarning, VoteCount};
use crate::strategies::{ScoringContext, simple};

/// Votes per code, ordered by each code's first vote.
fn tally(ctx: &ScoringContext<'_>) -> Vec<VoteCount> {
    let mut counts: Vec<VoteCount> = Vec::new();
    let codes = ctx.selections.iter().filter_map(|selection| {
        selection
            .option
            .map_result_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    });

    for code in codes {
        match counts.iter_mut().find(|count| count.code == code) {
            Some(count) => count.votes += 1,
            None => counts.push(VoteCount {
                code: code.to_string(),
                votes: 1,
            }),
        }
    }
    counts
}

fn break_tie(tied: &[String], tie_breaker: TieBreaker, seed: Option<u64>) -> Option<String> {
    match tie_breaker {
        TieBreaker::First | TieBreaker::All => tied.first().cloned(),
        TieBreaker::Random => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            tied.choose(&mut rng).cloned()
        }
    }
}

pub(crate) fn score(ctx: &mut ScoringContext<'_>, config: &VoteConfig) -> ScoreResult {
    let mut counts = tally(ctx);
    if let Some(threshold) = config.vote_threshold {
        counts.retain(|count| count.votes >= threshold);
    }

    let Some(max_votes) = counts.iter().map(|count| count.votes).max() else {
        ctx.warnings.push(ScoringWarning::NoVotes);
        return simple::score(ctx);
    };

    let tied: Vec<String> = counts
        .iter()
        .filter(|count| count.votes == max_votes)
        .map(|count| count.code.clone())
        .collect();

    let Some(winner) = break_tie(&tied, config.tie_breaker, ctx.settings.vote_seed) else {
        ctx.warnings.push(ScoringWarning::NoVotes);
        return simple::score(ctx);
    };

    if tied.len() > 1 {
        ctx.warnings.push(ScoringWarning::VoteTie {
            codes: tied.clone(),
            chosen: winner.clone(),
            tie_breaker: config.tie_breaker,
        });
    }

    let Some(result) = ctx.resolver.by_code_exact(&winner, &mut ctx.warnings) else {
        ctx.warnings.push(ScoringWarning::VoteUnresolved { code: winner });
        return simple::score(ctx);
    };

    debug!(winner = %winner, votes = max_votes, "vote winner resolved");
    ScoreResult {
        total_score: simple::total(ctx) as f64,
        dimension_scores: BTreeMap::new(),
        result: Some(result),
        secondary: None,
        detail: ScoreDetail::Vote {
            tally: counts,
            winner,
            tied: if tied.len() > 1 { tied } else { Vec::new() },
        },
        warnings: Vec::new(),
    }
}
