//! Dimension scores scaled by per-dimension multipliers and normalized by the total multiplier.
//! Without configured multipliers this is plain dimensions scoring.

use crate::config::{DimensionsConfig, WeightedAverageConfig};
use crate::report::{ScoreDetail, ScoreResult};
use crate::strategies::ScoringContext;
use crate::strategies::dimensions;

pub(crate) fn score(
    ctx: &mut ScoringContext<'_>,
    config: &DimensionsConfig,
    weights: &WeightedAverageConfig,
) -> ScoreResult {
    if weights.dimension_weights.is_empty() {
        return dimensions::score(ctx, config);
    }

    let tally = dimensions::tally(ctx, config);
    let multiplier = |index: usize| {
        weights
            .dimension_weights
            .get(&tally.names[index])
            .copied()
            .unwrap_or(1.0)
    };

    let total_weight: f64 = (0..tally.names.len()).map(multiplier).sum();
    let weighted = tally.map_values(|index, score| {
        let scaled = score * multiplier(index);
        if total_weight.abs() > f64::EPSILON {
            scaled / total_weight
        } else {
            scaled
        }
    });

    let result = dimensions::resolve_top(ctx, &tally.names, &weighted, tally.total());
    dimensions::tally_result(
        &tally,
        result,
        ScoreDetail::WeightedAverage {
            weighted: tally.named(&weighted),
        },
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::answers::AnswerSet;
    use crate::keys::QuestionPosition;
    use crate::memory::InMemoryCatalog;
    use crate::report::ScoreDetail;
    use crate::test_support::{option, result, run};
    use crate::types::{ScoringMode, Test};

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(1)
            .with_questions(vec![QuestionPosition::new(1)])
            .with_options(vec![option(11, 1, "A", 0)])
            .with_results(vec![result(1, "T", 0, 0), result(2, "F", 0, 0)])
    }

    #[test]
    fn multipliers_can_change_the_winner() {
        let test = Test::new(1, ScoringMode::Custom).with_config(json!({
            "strategy": "weighted_average",
            "dimensions": ["T", "F"],
            "weights": { "q1": { "A": { "T": 3, "F": 2 } } },
            "dimension_weights": { "F": 3 }
        }));
        let outcome = run(&test, &catalog(), AnswerSet::from_pairs(vec![(1, 11)]));

        // Raw scores stay in dimension_scores.
        assert_eq!(outcome.dimension_scores["T"], 3.0);
        assert_eq!(outcome.dimension_scores["F"], 2.0);
        assert_eq!(outcome.result_code(), Some("F"));
        let ScoreDetail::WeightedAverage { weighted } = outcome.detail else {
            panic!("expected weighted average detail");
        };
        // T: 3 * 1 / 4, F: 2 * 3 / 4
        assert_eq!(weighted["T"], 0.75);
        assert_eq!(weighted["F"], 1.5);
    }

    #[test]
    fn without_multipliers_matches_dimensions() {
        let test = Test::new(1, ScoringMode::Custom).with_config(json!({
            "strategy": "weighted_average",
            "dimensions": ["T", "F"],
            "weights": { "q1": { "A": { "T": 3, "F": 2 } } }
        }));
        let plain = Test::new(1, ScoringMode::Dimensions).with_config(json!({
            "dimensions": ["T", "F"],
            "weights": { "q1": { "A": { "T": 3, "F": 2 } } }
        }));
        let answers = || AnswerSet::from_pairs(vec![(1, 11)]);

        assert_eq!(run(&test, &catalog(), answers()), run(&plain, &catalog(), answers()));
    }
}
