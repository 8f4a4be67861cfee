//! Scoring configuration parsing.
//!
//! A test's `scoring_config` is operator-written JSON stored next to the test. Storage may hand it
//! over as text or as an already-decoded value, so [`ConfigPayload`] accepts both. [`parse`] turns
//! the payload into a typed [`ScoringConfig`] variant for the test's mode, or a [`ConfigIssue`]
//! explaining why it could not. Unknown fields are ignored and invalid optional fields become
//! `None`.

mod custom;
mod dimensions;
mod range;

pub use custom::{
    ConditionalConfig, ConditionalRule, CustomConfig, CustomStrategy, Operator, ThresholdConfig,
    ThresholdConstraint, ThresholdRule, TieBreaker, VoteConfig, WeightedAverageConfig,
    WeightedSumConfig,
};
pub use dimensions::{DimensionsConfig, OptionWeights, WeightSource, WeightTable};
pub use range::{RangeBand, RangeConfig};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigIssue;
use crate::types::ScoringMode;

pub type JsonObject = Map<String, Value>;

/// Raw configuration as delivered by storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigPayload {
    Text(String),
    Json(Value),
}

impl ConfigPayload {
    /// Decode into a JSON object.
    pub fn decode(&self) -> Result<JsonObject, ConfigIssue> {
        match self {
            ConfigPayload::Text(text) => decode_text(text),
            ConfigPayload::Json(value) => decode_value(value),
        }
    }
}

impl From<&str> for ConfigPayload {
    fn from(value: &str) -> Self {
        ConfigPayload::Text(value.to_string())
    }
}

impl From<String> for ConfigPayload {
    fn from(value: String) -> Self {
        ConfigPayload::Text(value)
    }
}

impl From<Value> for ConfigPayload {
    fn from(value: Value) -> Self {
        ConfigPayload::Json(value)
    }
}

fn decode_text(text: &str) -> Result<JsonObject, ConfigIssue> {
    if text.trim().is_empty() {
        return Err(ConfigIssue::Missing);
    }
    let value: Value =
        serde_json::from_str(text).map_err(|e| ConfigIssue::Malformed(e.to_string()))?;
    decode_value(&value)
}

fn decode_value(value: &Value) -> Result<JsonObject, ConfigIssue> {
    match value {
        Value::Null => Err(ConfigIssue::Missing),
        Value::Object(object) => Ok(object.clone()),
        // Double-encoded payloads show up when a text column is serialized as JSON.
        Value::String(text) => decode_text(text),
        _ => Err(ConfigIssue::NotAnObject),
    }
}

/// Typed configuration, one variant per scoring mode.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringConfig {
    Simple,
    Dimensions(DimensionsConfig),
    Range(RangeConfig),
    Custom(CustomConfig),
}

/// Parse the payload for `mode`.
///
/// `Simple` never needs a payload. `Dimensions` requires a non-empty `dimensions` list and reports
/// [`ConfigIssue::IncompleteDimensions`] otherwise. `Range` and `Custom` accept any object.
pub fn parse(
    mode: ScoringMode,
    payload: Option<&ConfigPayload>,
) -> Result<ScoringConfig, ConfigIssue> {
    if mode == ScoringMode::Simple {
        return Ok(ScoringConfig::Simple);
    }

    let object = payload.ok_or(ConfigIssue::Missing)?.decode()?;

    match mode {
        ScoringMode::Simple => Ok(ScoringConfig::Simple),
        ScoringMode::Dimensions => {
            DimensionsConfig::from_object(&object).map(ScoringConfig::Dimensions)
        }
        ScoringMode::Range => Ok(ScoringConfig::Range(RangeConfig::from_object(&object))),
        ScoringMode::Custom => Ok(ScoringConfig::Custom(CustomConfig::from_object(&object))),
    }
}

/// Inclusive numeric bounds. A missing side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    pub(crate) fn from_object(object: &JsonObject) -> Self {
        Self {
            min: object.get("min").and_then(number),
            max: object.get("max").and_then(number),
        }
    }

    pub(crate) fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Read a number, accepting numeric strings as operators often quote them.
pub(crate) fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Read a non-empty string, trimming whitespace.
pub(crate) fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
