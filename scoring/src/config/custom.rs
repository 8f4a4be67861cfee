use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{Bounds, DimensionsConfig, JsonObject, number, text};
use crate::types::QuestionId;

/// Configuration for `custom` mode: a sub-strategy plus the shared dimensions block.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomConfig {
    pub strategy: CustomStrategy,
    /// `None` when the payload declares no dimensions. Dimension-based strategies then score as
    /// `simple`.
    pub dimensions: Option<DimensionsConfig>,
}

impl CustomConfig {
    pub fn from_object(object: &JsonObject) -> Self {
        Self {
            strategy: CustomStrategy::from_object(object),
            dimensions: DimensionsConfig::from_object(object).ok(),
        }
    }
}

/// The custom sub-strategies. Absent or unknown `strategy` values select `Dimensions`.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomStrategy {
    Dimensions,
    Percentage,
    WeightedAverage(WeightedAverageConfig),
    Conditional(ConditionalConfig),
    MultiResult,
    Vote(VoteConfig),
    WeightedSum(WeightedSumConfig),
    PercentageThreshold(ThresholdConfig),
}

impl CustomStrategy {
    pub fn from_object(object: &JsonObject) -> Self {
        let label = object
            .get("strategy")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_ascii_lowercase())
            .unwrap_or_default();

        match label.as_str() {
            "percentage" => CustomStrategy::Percentage,
            "weighted_average" => {
                CustomStrategy::WeightedAverage(WeightedAverageConfig::from_object(object))
            }
            "conditional" => CustomStrategy::Conditional(ConditionalConfig::from_object(object)),
            "multi_result" => CustomStrategy::MultiResult,
            "vote" => CustomStrategy::Vote(VoteConfig::from_object(object)),
            "weighted_sum" => CustomStrategy::WeightedSum(WeightedSumConfig::from_object(object)),
            "percentage_threshold" => {
                CustomStrategy::PercentageThreshold(ThresholdConfig::from_object(object))
            }
            other => {
                if !other.is_empty() {
                    debug!(strategy = other, "unknown custom strategy, using dimensions");
                }
                CustomStrategy::Dimensions
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CustomStrategy::Dimensions => "dimensions",
            CustomStrategy::Percentage => "percentage",
            CustomStrategy::WeightedAverage(_) => "weighted_average",
            CustomStrategy::Conditional(_) => "conditional",
            CustomStrategy::MultiResult => "multi_result",
            CustomStrategy::Vote(_) => "vote",
            CustomStrategy::WeightedSum(_) => "weighted_sum",
            CustomStrategy::PercentageThreshold(_) => "percentage_threshold",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedAverageConfig {
    /// Per-dimension multipliers from `dimension_weights`. Empty when not configured.
    pub dimension_weights: HashMap<String, f64>,
}

impl WeightedAverageConfig {
    fn from_object(object: &JsonObject) -> Self {
        let dimension_weights = object
            .get("dimension_weights")
            .and_then(Value::as_object)
            .map(|weights| {
                weights
                    .iter()
                    .filter_map(|(dimension, weight)| Some((dimension.clone(), number(weight)?)))
                    .collect()
            })
            .unwrap_or_default();

        Self { dimension_weights }
    }
}

/// Comparison operators accepted in conditional rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
    Ne,
}

impl Operator {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            ">" => Some(Operator::Gt),
            ">=" => Some(Operator::Gte),
            "<" => Some(Operator::Lt),
            "<=" => Some(Operator::Lte),
            "==" | "=" => Some(Operator::Eq),
            "!=" | "<>" => Some(Operator::Ne),
            _ => None,
        }
    }

    pub fn apply(&self, left: f64, right: f64) -> bool {
        match self {
            Operator::Gt => left > right,
            Operator::Gte => left >= right,
            Operator::Lt => left < right,
            Operator::Lte => left <= right,
            Operator::Eq => (left - right).abs() < f64::EPSILON,
            Operator::Ne => (left - right).abs() >= f64::EPSILON,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalRule {
    pub dimension: String,
    pub operator: Operator,
    pub value: f64,
    pub result_code: String,
}

impl ConditionalRule {
    fn from_value(value: &Value) -> Option<Self> {
        let rule = value.as_object()?;
        let condition = rule.get("condition")?.as_object()?;
        Some(Self {
            dimension: condition.get("dimension").and_then(text)?,
            operator: condition
                .get("operator")
                .and_then(Value::as_str)
                .and_then(Operator::parse)?,
            value: condition.get("value").and_then(number)?,
            result_code: rule.get("result_code").and_then(text)?,
        })
    }

    pub fn matches(&self, score: f64) -> bool {
        self.operator.apply(score, self.value)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionalConfig {
    /// Rules in declared order; malformed rules are skipped at parse time.
    pub rules: Vec<ConditionalRule>,
    pub default_result_code: Option<String>,
}

impl ConditionalConfig {
    fn from_object(object: &JsonObject) -> Self {
        let rules = object
            .get("rules")
            .or_else(|| object.get("conditions"))
            .and_then(Value::as_array)
            .map(|rules| rules.iter().filter_map(ConditionalRule::from_value).collect())
            .unwrap_or_default();

        Self {
            rules,
            default_result_code: object.get("default_result_code").and_then(text),
        }
    }
}

/// How the `vote` strategy settles a tie between codes with equal votes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreaker {
    /// Code that received its first vote earliest.
    #[default]
    First,
    Random,
    /// Reports every tied code but still resolves the first one.
    All,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoteConfig {
    /// Codes with fewer votes are discarded before picking a winner.
    pub vote_threshold: Option<u32>,
    pub tie_breaker: TieBreaker,
}

impl VoteConfig {
    fn from_object(object: &JsonObject) -> Self {
        let vote_threshold = object
            .get("vote_threshold")
            .and_then(number)
            .filter(|threshold| *threshold >= 1.0)
            .map(|threshold| threshold.ceil() as u32);

        let tie_breaker = match object
            .get("tie_breaker")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_ascii_lowercase())
            .as_deref()
        {
            Some("random") => TieBreaker::Random,
            Some("all") => TieBreaker::All,
            _ => TieBreaker::First,
        };

        Self {
            vote_threshold,
            tie_breaker,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedSumConfig {
    /// Multiplier per question id. Unlisted questions weigh 1.0.
    pub question_weights: HashMap<QuestionId, f64>,
}

impl WeightedSumConfig {
    fn from_object(object: &JsonObject) -> Self {
        let question_weights = object
            .get("question_weights")
            .and_then(Value::as_object)
            .map(|weights| {
                weights
                    .iter()
                    .filter_map(|(question, weight)| {
                        Some((question.trim().parse::<QuestionId>().ok()?, number(weight)?))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { question_weights }
    }

    pub fn weight_for(&self, question_id: QuestionId) -> f64 {
        self.question_weights.get(&question_id).copied().unwrap_or(1.0)
    }
}

/// The three constraint shapes a `thresholds` entry may take.
#[derive(Debug, Clone, PartialEq)]
pub enum ThresholdConstraint {
    /// `{"dimension": "E", "min": 40, "max": 100}`
    Dimension { dimension: String, bounds: Bounds },
    /// `{"all_dimensions": {"E": {"min": 40}, "I": {"max": 30}}}`
    AllDimensions(Vec<(String, Bounds)>),
    /// `{"min": 10, "max": 60}` applied to every declared dimension.
    Global(Bounds),
}

impl ThresholdConstraint {
    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        if let Some(dimension) = object.get("dimension").and_then(text) {
            return Some(ThresholdConstraint::Dimension {
                dimension,
                bounds: Bounds::from_object(object),
            });
        }

        if let Some(all) = object.get("all_dimensions").and_then(Value::as_object) {
            let per_dimension = all
                .iter()
                .filter_map(|(dimension, bounds)| {
                    Some((dimension.clone(), Bounds::from_object(bounds.as_object()?)))
                })
                .collect();
            return Some(ThresholdConstraint::AllDimensions(per_dimension));
        }

        let global = Bounds::from_object(object);
        (!global.is_unbounded()).then_some(ThresholdConstraint::Global(global))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdRule {
    pub result_code: String,
    pub constraint: ThresholdConstraint,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdConfig {
    /// Entries in the order they appear in the `thresholds` object.
    pub thresholds: Vec<ThresholdRule>,
    pub default_result_code: Option<String>,
}

impl ThresholdConfig {
    fn from_object(object: &JsonObject) -> Self {
        let thresholds = object
            .get("thresholds")
            .and_then(Value::as_object)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|(code, constraint)| {
                        Some(ThresholdRule {
                            result_code: code.clone(),
                            constraint: ThresholdConstraint::from_value(constraint)?,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            thresholds,
            default_result_code: object.get("default_result_code").and_then(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn custom(value: Value) -> CustomConfig {
        CustomConfig::from_object(value.as_object().unwrap())
    }

    #[test]
    fn unknown_or_absent_strategy_is_dimensions() {
        assert_eq!(custom(json!({})).strategy, CustomStrategy::Dimensions);
        assert_eq!(
            custom(json!({ "strategy": "astrology" })).strategy,
            CustomStrategy::Dimensions
        );
        assert_eq!(
            custom(json!({ "strategy": " Percentage " })).strategy,
            CustomStrategy::Percentage
        );
    }

    #[test]
    fn dimensions_block_is_optional() {
        let config = custom(json!({ "strategy": "vote" }));
        assert!(config.dimensions.is_none());
        let config = custom(json!({ "strategy": "multi_result", "dimensions": ["A", "B"] }));
        assert_eq!(config.dimensions.unwrap().dimensions, vec!["A", "B"]);
    }

    #[test]
    fn conditional_rules_skip_malformed_entries() {
        let config = custom(json!({
            "strategy": "conditional",
            "rules": [
                {
                    "condition": { "dimension": "E", "operator": ">=", "value": 3 },
                    "result_code": "outgoing"
                },
                {
                    "condition": { "dimension": "E", "operator": "~", "value": 3 },
                    "result_code": "bad"
                },
                { "condition": { "dimension": "I", "operator": "<", "value": "2" } },
                {
                    "condition": { "dimension": "I", "operator": "!=", "value": "2" },
                    "result_code": "calm"
                }
            ],
            "default_result_code": "balanced"
        }));
        let CustomStrategy::Conditional(conditional) = config.strategy else {
            panic!("expected conditional strategy");
        };
        assert_eq!(conditional.rules.len(), 2);
        assert_eq!(conditional.rules[0].operator, Operator::Gte);
        assert_eq!(conditional.rules[1].result_code, "calm");
        assert_eq!(conditional.default_result_code.as_deref(), Some("balanced"));
    }

    #[test]
    fn operators_compare_as_written() {
        assert!(Operator::Gt.apply(3.0, 2.0));
        assert!(!Operator::Gt.apply(2.0, 2.0));
        assert!(Operator::Gte.apply(2.0, 2.0));
        assert!(Operator::Lt.apply(1.0, 2.0));
        assert!(Operator::Lte.apply(2.0, 2.0));
        assert!(Operator::Eq.apply(2.0, 2.0));
        assert!(Operator::Ne.apply(2.0, 2.5));
        assert_eq!(Operator::parse("=>"), None);
    }

    #[test]
    fn vote_settings_parse_with_defaults() {
        let CustomStrategy::Vote(vote) = custom(json!({ "strategy": "vote" })).strategy else {
            panic!("expected vote strategy");
        };
        assert_eq!(vote, VoteConfig::default());

        let CustomStrategy::Vote(vote) = custom(json!({
            "strategy": "vote",
            "vote_threshold": "2",
            "tie_breaker": "ALL"
        }))
        .strategy
        else {
            panic!("expected vote strategy");
        };
        assert_eq!(vote.vote_threshold, Some(2));
        assert_eq!(vote.tie_breaker, TieBreaker::All);
    }

    #[test]
    fn question_weights_default_to_one() {
        let CustomStrategy::WeightedSum(sum) = custom(json!({
            "strategy": "weighted_sum",
            "question_weights": { "10": 2, "11": "0.5", "abc": 3 }
        }))
        .strategy
        else {
            panic!("expected weighted_sum strategy");
        };
        assert_eq!(sum.weight_for(10), 2.0);
        assert_eq!(sum.weight_for(11), 0.5);
        assert_eq!(sum.weight_for(12), 1.0);
        assert_eq!(sum.question_weights.len(), 2);
    }

    #[test]
    fn threshold_shapes_are_recognised_in_order() {
        let CustomStrategy::PercentageThreshold(config) = custom(json!({
            "strategy": "percentage_threshold",
            "thresholds": {
                "leader": { "dimension": "D", "min": 40 },
                "balanced": { "all_dimensions": { "D": { "max": 40 }, "S": { "max": 40 } } },
                "even": { "min": 20, "max": 30 },
                "ignored": {}
            }
        }))
        .strategy
        else {
            panic!("expected percentage_threshold strategy");
        };

        let codes: Vec<&str> = config
            .thresholds
            .iter()
            .map(|rule| rule.result_code.as_str())
            .collect();
        assert_eq!(codes, vec!["leader", "balanced", "even"]);
        assert!(matches!(
            config.thresholds[0].constraint,
            ThresholdConstraint::Dimension { .. }
        ));
        assert!(matches!(
            config.thresholds[1].constraint,
            ThresholdConstraint::AllDimensions(ref dims) if dims.len() == 2
        ));
        assert!(matches!(
            config.thresholds[2].constraint,
            ThresholdConstraint::Global(_)
        ));
    }
}
