//! Option scores multiplied by per-question weights, resolved by the rounded total.

use std::collections::BTreeMap;

use crate::config::WeightedSumConfig;
use crate::report::{ScoreDetail, ScoreResult};
use crate::strategies::ScoringContext;

pub(crate) fn score(ctx: &mut ScoringContext<'_>, config: &WeightedSumConfig) -> ScoreResult {
    let contributions: BTreeMap<_, f64> = ctx
        .selections
        .iter()
        .map(|selection| {
            let weight = config.weight_for(selection.question_id);
            (selection.question_id, selection.option.score_value as f64 * weight)
        })
        .collect();

    let total_score: f64 = contributions.values().sum();
    let result = ctx.resolver.by_score(total_score.round(), &mut ctx.warnings);

    ScoreResult {
        total_score,
        dimension_scores: BTreeMap::new(),
        result,
        secondary: None,
        detail: ScoreDetail::WeightedSum { contributions },
        warnings: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::answers::AnswerSet;
    use crate::memory::InMemoryCatalog;
    use crate::report::ScoreDetail;
    use crate::test_support::{option, result, run};
    use crate::types::{ScoringMode, Test};

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(1)
            .with_options(vec![
                option(11, 1, "A", 4),
                option(21, 2, "A", 3),
                option(31, 3, "A", 1),
            ])
            .with_results(vec![
                result(1, "novice", 0, 5),
                result(2, "skilled", 6, 10),
                result(3, "expert", 11, 20),
            ])
    }

    #[test]
    fn weights_scale_each_question() {
        let test = Test::new(1, ScoringMode::Custom).with_config(json!({
            "strategy": "weighted_sum",
            "question_weights": { "1": 2.5, "3": 0.5 }
        }));
        let outcome = run(
            &test,
            &catalog(),
            AnswerSet::from_pairs(vec![(1, 11), (2, 21), (3, 31)]),
        );

        // 4 * 2.5 + 3 * 1 + 1 * 0.5
        assert_eq!(outcome.total_score, 13.5);
        assert_eq!(outcome.result_code(), Some("expert"));
        let ScoreDetail::WeightedSum { contributions } = outcome.detail else {
            panic!("expected weighted sum detail");
        };
        assert_eq!(contributions[&1], 10.0);
        assert_eq!(contributions[&2], 3.0);
    }

    #[test]
    fn rounded_total_picks_the_bucket() {
        let test = Test::new(1, ScoringMode::Custom).with_config(json!({
            "strategy": "weighted_sum",
            "question_weights": { "1": 1.4 }
        }));
        // 4 * 1.4 = 5.6, rounds to 6.
        let outcome = run(&test, &catalog(), AnswerSet::from_pairs(vec![(1, 11)]));
        assert!((outcome.total_score - 5.6).abs() < 1e-9);
        assert_eq!(outcome.result_code(), Some("skilled"));
    }

    #[test]
    fn without_weights_matches_simple_total() {
        let test =
            Test::new(1, ScoringMode::Custom).with_config(json!({ "strategy": "weighted_sum" }));
        let outcome = run(&test, &catalog(), AnswerSet::from_pairs(vec![(1, 11), (2, 21)]));
        assert_eq!(outcome.total_score, 7.0);
        assert_eq!(outcome.result_code(), Some("skilled"));
    }
}
